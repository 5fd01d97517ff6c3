//! Test doubles and common utilities for configuration contract tests
//!
//! Provides a small plugin set, a lookup double that counts calls, and a
//! helper for writing configuration files to disk.

#![allow(dead_code)]

use ddns_config::{PluginLookup, PluginRegistry, ProviderPlugin};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

/// A valid standard provider section
pub const DYNDNS_SECTION: &str = r#"
[[provider]]
name = "dyndns.org"
username = "u"
password = "p"
hostname = ["h.dyndns.org"]
"#;

/// Plugins known to every contract test
pub fn test_plugins() -> PluginRegistry {
    let mut plugins = PluginRegistry::new();
    plugins.register(
        ProviderPlugin::new("default@dyndns.org")
            .with_checkip("checkip.dyndns.org", "/")
            .with_update("members.dyndns.org", "/nic/update?hostname=")
            .with_responses(["good", "nochg"]),
    );
    plugins.register(
        ProviderPlugin::new("default@no-ip.com")
            .with_checkip("ip1.dynupdate.no-ip.com", "/")
            .with_update("dynupdate.no-ip.com", "/nic/update?hostname="),
    );
    plugins.register(ProviderPlugin::custom());
    plugins
}

/// Plugin lookup that counts how often it is consulted
pub struct CountingPlugins {
    inner: PluginRegistry,
    lookups: AtomicUsize,
}

impl CountingPlugins {
    /// Wrap the standard test plugins
    pub fn new() -> Self {
        Self {
            inner: test_plugins(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of lookups so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl PluginLookup for CountingPlugins {
    fn find(&self, name: &str) -> Option<Arc<ProviderPlugin>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find(name)
    }
}

/// Write `text` to a temporary configuration file
pub fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
