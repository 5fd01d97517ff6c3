//! Provider plugins and the plugin registry
//!
//! A plugin is a static descriptor of a DDNS service: where to ask for the
//! current address, where to send updates, and which response substrings mean
//! success. Plugins are registered by name and looked up through the
//! [`PluginLookup`] trait when sections are validated and built.
//!
//! ## Registration
//!
//! Plugin crates install themselves during initialization:
//!
//! ```rust,ignore
//! use ddns_config::PluginRegistry;
//!
//! let mut plugins = PluginRegistry::new();
//! ddns_plugins::register(&mut plugins);
//! ```

use crate::traits::PluginLookup;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the synthetic plugin used by `custom` sections
pub const CUSTOM_PLUGIN: &str = "custom";

/// Prefix of the default plugin for a service domain
pub const DEFAULT_PLUGIN_PREFIX: &str = "default@";

/// Success substrings used when neither user nor plugin supplies any
pub const GENERIC_RESPONSES: &[&str] = &["OK", "good", "true", "updated"];

/// Checkip service used when a plugin does not name its own
pub const DEFAULT_CHECKIP_SERVER: &str = "checkip.dyndns.org";

/// Static descriptor of a DDNS service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPlugin {
    name: String,
    checkip_server: String,
    checkip_path: String,
    update_server: String,
    update_path: String,
    responses: Vec<String>,
}

impl ProviderPlugin {
    /// Create a plugin with the default checkip service and no update endpoint
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checkip_server: DEFAULT_CHECKIP_SERVER.to_string(),
            checkip_path: "/".to_string(),
            update_server: String::new(),
            update_path: String::new(),
            responses: Vec::new(),
        }
    }

    /// The synthetic plugin behind `custom` sections
    ///
    /// Its update endpoint is empty; custom sections always supply one.
    pub fn custom() -> Self {
        Self::new(CUSTOM_PLUGIN).with_responses(GENERIC_RESPONSES.iter().copied())
    }

    /// Set the checkip server (`host[:port]`) and path
    pub fn with_checkip(mut self, server: impl Into<String>, path: impl Into<String>) -> Self {
        self.checkip_server = server.into();
        self.checkip_path = path.into();
        self
    }

    /// Set the update server (`host[:port]`) and path
    pub fn with_update(mut self, server: impl Into<String>, path: impl Into<String>) -> Self {
        self.update_server = server.into();
        self.update_path = path.into();
        self
    }

    /// Set the expected success-response substrings, in order
    pub fn with_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default checkip server, `host[:port]`
    pub fn checkip_server(&self) -> &str {
        &self.checkip_server
    }

    /// Default checkip URL path
    pub fn checkip_path(&self) -> &str {
        &self.checkip_path
    }

    /// Default update server, `host[:port]`
    pub fn update_server(&self) -> &str {
        &self.update_server
    }

    /// Default update URL path
    pub fn update_path(&self) -> &str {
        &self.update_path
    }

    /// Expected success-response substrings
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Whether this is the custom plugin
    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_PLUGIN
    }
}

/// Registry of provider plugins, keyed by name
///
/// Lookups of a bare service name such as `dyndns.org` fall back to the
/// `default@dyndns.org` plugin.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<ProviderPlugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its own name
    ///
    /// Returns the plugin previously registered under that name, if any.
    pub fn register(&mut self, plugin: ProviderPlugin) -> Option<Arc<ProviderPlugin>> {
        let name = plugin.name().to_string();
        tracing::debug!("Registering DDNS plugin {}", name);
        self.plugins.insert(name, Arc::new(plugin))
    }

    /// Check if a plugin answers to `name`
    pub fn has_plugin(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// List all registered plugin names, sorted
    pub fn list_plugins(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginLookup for PluginRegistry {
    fn find(&self, name: &str) -> Option<Arc<ProviderPlugin>> {
        if let Some(plugin) = self.plugins.get(name) {
            return Some(Arc::clone(plugin));
        }

        if name.contains('@') {
            return None;
        }

        self.plugins
            .get(&format!("{DEFAULT_PLUGIN_PREFIX}{name}"))
            .map(Arc::clone)
    }
}
