//! Configuration loader
//!
//! Ties the pieces together: parse the TOML document, run the validation
//! pass, extract the global settings and build one provider record per
//! accepted section.
//!
//! A load either yields a complete [`LoadedConfig`] or an [`Error`]:
//!
//! - unreadable file → [`Error::Read`]
//! - malformed document → [`Error::Syntax`]
//! - any rejected section → [`Error::Invalid`] with every diagnostic
//!
//! Rejected sections never stop their siblings from being checked, so a
//! single run reports every problem in the file.

use crate::builder::ProviderBuilder;
use crate::error::{Diagnostic, Error, Result};
use crate::limits::ERROR_UPDATE_PERIOD;
use crate::model::ConfigFile;
use crate::registry::ProviderRegistry;
use crate::traits::PluginLookup;
use crate::validate::Validator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Origin reported for documents that were not read from a file
const INLINE_ORIGIN: &str = "<inline>";

/// Settings given on the command line that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Interface name, replaces `iface` from the file
    pub iface: Option<String>,

    /// Run a single update iteration
    pub once: bool,
}

/// Global daemon settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalConfig {
    /// Seconds between address checks, already clamped
    pub update_period_secs: u64,

    /// Seconds after which an update is sent even if the address is unchanged
    pub forced_update_period_secs: u64,

    /// Seconds before retrying after a failed update
    pub error_update_period_secs: u64,

    /// Number of update iterations, 0 runs forever
    pub total_iterations: u64,

    /// Cache directory for last-known addresses
    pub cache_dir: PathBuf,

    /// Force updates with a synthetic address
    pub fake_address: bool,

    /// Interface to read the address from
    pub iface: Option<String>,
}

impl GlobalConfig {
    fn extract(config: &ConfigFile, overrides: &Overrides) -> Self {
        Self {
            // Validation has already clamped the period
            update_period_secs: config.period as u64,
            forced_update_period_secs: config.forced_update,
            error_update_period_secs: ERROR_UPDATE_PERIOD,
            total_iterations: if overrides.once { 1 } else { config.iterations },
            cache_dir: config.cache_dir.clone(),
            fake_address: config.fake_address,
            iface: overrides.iface.clone().or_else(|| config.iface.clone()),
        }
    }

    /// Update period as a [`Duration`]
    pub fn update_period(&self) -> Duration {
        Duration::from_secs(self.update_period_secs)
    }

    /// Forced update period as a [`Duration`]
    pub fn forced_update_period(&self) -> Duration {
        Duration::from_secs(self.forced_update_period_secs)
    }

    /// Error retry period as a [`Duration`]
    pub fn error_update_period(&self) -> Duration {
        Duration::from_secs(self.error_update_period_secs)
    }

    /// Whether the daemon runs until stopped
    pub fn runs_forever(&self) -> bool {
        self.total_iterations == 0
    }
}

/// Result of a successful load
#[derive(Debug)]
pub struct LoadedConfig {
    /// Global settings
    pub global: GlobalConfig,

    /// One record per section, `provider` sections first
    pub providers: ProviderRegistry,
}

/// Loads configuration documents against a set of plugins
pub struct ConfigLoader<'a> {
    plugins: &'a dyn PluginLookup,
    overrides: Overrides,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader resolving providers through `plugins`
    pub fn new(plugins: &'a dyn PluginLookup) -> Self {
        Self {
            plugins,
            overrides: Overrides::default(),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Read and load the file at `path`
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_source(&path.display().to_string(), &text)
    }

    /// Load an in-memory TOML document
    pub fn load_str(&self, text: &str) -> Result<LoadedConfig> {
        self.load_source(INLINE_ORIGIN, text)
    }

    fn load_source(&self, origin: &str, text: &str) -> Result<LoadedConfig> {
        let mut config =
            ConfigFile::from_toml(text).map_err(|e| Error::syntax(origin, e.to_string()))?;

        let diagnostics = Validator::new(self.plugins).validate(&mut config);
        if !diagnostics.is_empty() {
            return Err(reject(origin, diagnostics));
        }

        let global = GlobalConfig::extract(&config, &self.overrides);

        let builder = ProviderBuilder::new(self.plugins);
        let mut providers = ProviderRegistry::new();
        let mut diagnostics = Vec::new();

        for (id, section) in config.sections() {
            if let Err(error) = providers.create(section, &builder) {
                diagnostics.push(Diagnostic::new(id, error));
            }
        }

        if !diagnostics.is_empty() {
            return Err(reject(origin, diagnostics));
        }

        info!(
            "Loaded {} DDNS provider(s) from {}, update period {}s",
            providers.len(),
            origin,
            global.update_period_secs
        );

        Ok(LoadedConfig { global, providers })
    }
}

fn reject(origin: &str, diagnostics: Vec<Diagnostic>) -> Error {
    for diagnostic in &diagnostics {
        error!("{}: {}", origin, diagnostic);
    }
    Error::Invalid { diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SectionError;
    use crate::limits::{DEFAULT_PERIOD, FORCED_UPDATE_PERIOD, MAX_PERIOD};
    use crate::plugin::{PluginRegistry, ProviderPlugin};

    fn plugins() -> PluginRegistry {
        let mut plugins = PluginRegistry::new();
        plugins.register(
            ProviderPlugin::new("default@dyndns.org")
                .with_update("members.dyndns.org", "/nic/update?hostname="),
        );
        plugins.register(ProviderPlugin::custom());
        plugins
    }

    const MINIMAL: &str = r#"
        [[provider]]
        name = "dyndns.org"
        username = "u"
        password = "p"
        hostname = "h.dyndns.org"
    "#;

    #[test]
    fn test_defaults_applied() {
        let plugins = plugins();
        let loaded = ConfigLoader::new(&plugins).load_str(MINIMAL).unwrap();

        assert_eq!(loaded.global.update_period_secs, DEFAULT_PERIOD);
        assert_eq!(loaded.global.forced_update_period_secs, FORCED_UPDATE_PERIOD);
        assert_eq!(loaded.global.error_update_period_secs, ERROR_UPDATE_PERIOD);
        assert!(loaded.global.runs_forever());
        assert_eq!(loaded.global.iface, None);
        assert_eq!(loaded.providers.len(), 1);
    }

    #[test]
    fn test_period_clamped_high() {
        let plugins = plugins();
        let text = format!("period = 99999999\n{MINIMAL}");
        let loaded = ConfigLoader::new(&plugins).load_str(&text).unwrap();

        assert_eq!(loaded.global.update_period_secs, MAX_PERIOD);
        assert_eq!(loaded.global.update_period(), Duration::from_secs(MAX_PERIOD));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let plugins = plugins();
        let text = format!("iterations = 7\niface = \"eth0\"\n{MINIMAL}");
        let loaded = ConfigLoader::new(&plugins)
            .with_overrides(Overrides {
                iface: Some("wlan0".to_string()),
                once: true,
            })
            .load_str(&text)
            .unwrap();

        assert_eq!(loaded.global.total_iterations, 1);
        assert_eq!(loaded.global.iface.as_deref(), Some("wlan0"));

        // Without overrides the file wins
        let loaded = ConfigLoader::new(&plugins).load_str(&text).unwrap();
        assert_eq!(loaded.global.total_iterations, 7);
        assert_eq!(loaded.global.iface.as_deref(), Some("eth0"));
    }

    #[test]
    fn test_syntax_error_names_origin() {
        let plugins = plugins();
        let err = ConfigLoader::new(&plugins).load_str("period = ").unwrap_err();

        match err {
            Error::Syntax { origin, .. } => assert_eq!(origin, INLINE_ORIGIN),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_syntax_error() {
        let plugins = plugins();
        let err = ConfigLoader::new(&plugins).load_str("period = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_every_rejected_section_reported() {
        let plugins = plugins();
        let text = r#"
            [[provider]]
            name = "dyndns.org"
            hostname = "h.dyndns.org"

            [[provider]]
            name = "example.invalid"
            username = "u"
            password = "p"
            hostname = "h.example.invalid"

            [[custom]]
            hostname = "home.example.net"
        "#;

        let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
        let errors: Vec<&SectionError> = err.diagnostics().iter().map(|d| &d.error).collect();

        assert_eq!(
            errors,
            vec![
                &SectionError::MissingCredential {
                    provider: "dyndns.org".to_string(),
                    field: "username",
                },
                &SectionError::UnknownProvider("example.invalid".to_string()),
                &SectionError::MissingServer,
            ]
        );
    }
}
