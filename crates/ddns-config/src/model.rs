//! Typed configuration tree
//!
//! This is what the parser hands to the validation pass: global scalars plus
//! two repeatable, titled section kinds, `provider` and `custom`.
//!
//! ## File Format
//!
//! ```toml
//! period        = 600
//! forced-update = 604800
//!
//! [[provider]]
//! name     = "default@freedns.afraid.org"
//! username = "example"
//! password = "secret"
//! hostname = ["example.homenet.org", "example.afraid.org"]
//!
//! [[provider]]
//! name     = "default@dyndns.org"
//! ssl      = true
//! username = "admin"
//! password = "supersecret"
//! hostname = "example.dyndns.org"
//!
//! [[custom]]
//! name          = "home"
//! ddns-server   = "update.example.net:8080"
//! ddns-path     = "/nic/update?hostname="
//! ddns-response = ["good", "nochg"]
//! hostname      = "home.example.net"
//! ```
//!
//! Unknown keys are ignored. List options also accept a single string.

use crate::limits::{DEFAULT_CACHE_DIR, DEFAULT_ITERATIONS, DEFAULT_PERIOD, FORCED_UPDATE_PERIOD};
use crate::plugin::CUSTOM_PLUGIN;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root of a parsed configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Update period in seconds, clamped during validation
    pub period: i64,

    /// Forced update period in seconds
    pub forced_update: u64,

    /// Number of update iterations, 0 runs forever
    pub iterations: u64,

    /// Force updates with a synthetic address (testing)
    pub fake_address: bool,

    /// Cache directory for last-known addresses
    pub cache_dir: PathBuf,

    /// Network interface to check the address of
    pub iface: Option<String>,

    /// Standard provider sections, in declaration order
    pub provider: Vec<ProviderSection>,

    /// Custom provider sections, in declaration order
    pub custom: Vec<CustomSection>,
}

impl ConfigFile {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Every section in load order: standard providers, then custom ones
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, SectionRef<'_>)> {
        let providers = self.provider.iter().enumerate().map(|(index, section)| {
            (
                SectionId::new(SectionKind::Provider, index, section.name.clone()),
                SectionRef::Provider(section),
            )
        });
        let customs = self.custom.iter().enumerate().map(|(index, section)| {
            (
                SectionId::new(SectionKind::Custom, index, section.common.name.clone()),
                SectionRef::Custom(section),
            )
        });
        providers.chain(customs)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD as i64,
            forced_update: FORCED_UPDATE_PERIOD,
            iterations: DEFAULT_ITERATIONS,
            fake_address: false,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            iface: None,
            provider: Vec::new(),
            custom: Vec::new(),
        }
    }
}

/// Options shared by `provider` and `custom` sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProviderSection {
    /// Section title; the plugin name for standard providers
    pub name: Option<String>,

    /// Account username
    pub username: Option<String>,

    /// Account password
    pub password: Option<String>,

    /// Hostnames to keep updated
    #[serde(deserialize_with = "one_or_many")]
    pub hostname: Vec<String>,

    /// Deprecated name for `hostname`
    #[serde(deserialize_with = "one_or_many")]
    pub alias: Vec<String>,

    /// Use HTTPS for updates
    pub ssl: bool,

    /// Request wildcard records
    pub wildcard: bool,
}

/// A fully user-specified provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CustomSection {
    /// Options shared with standard providers
    #[serde(flatten)]
    pub common: ProviderSection,

    /// Append the current address to the update request
    #[serde(default)]
    pub append_myip: bool,

    /// Update server, `host[:port]`
    #[serde(default)]
    pub ddns_server: Option<String>,

    /// Update URL path
    #[serde(default)]
    pub ddns_path: Option<String>,

    /// Expected success-response substrings
    #[serde(default, deserialize_with = "one_or_many")]
    pub ddns_response: Vec<String>,

    /// Checkip server override, `host[:port]`
    #[serde(default)]
    pub checkip_server: Option<String>,

    /// Checkip URL path override
    #[serde(default)]
    pub checkip_path: Option<String>,
}

/// Accept either `key = "value"` or `key = ["a", "b"]`
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Kind of a provider-like section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Built-in plugin looked up by title
    Provider,
    /// User-specified endpoints
    Custom,
}

impl SectionKind {
    /// Option-schema name of the section kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Provider => "provider",
            SectionKind::Custom => "custom",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a section for diagnostics and logs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId {
    /// Section kind
    pub kind: SectionKind,
    /// Zero-based position among sections of the same kind
    pub index: usize,
    /// Section title, if any
    pub title: Option<String>,
}

impl SectionId {
    /// Create a section identifier
    pub fn new(kind: SectionKind, index: usize, title: Option<String>) -> Self {
        Self { kind, index, title }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => write!(f, "{} '{}'", self.kind, title),
            _ => write!(f, "{} #{}", self.kind, self.index + 1),
        }
    }
}

/// Borrowed view of either section kind
#[derive(Debug, Clone, Copy)]
pub enum SectionRef<'a> {
    /// A `provider` section
    Provider(&'a ProviderSection),
    /// A `custom` section
    Custom(&'a CustomSection),
}

impl<'a> SectionRef<'a> {
    /// Options shared by both kinds
    pub fn common(&self) -> &'a ProviderSection {
        match self {
            SectionRef::Provider(section) => section,
            SectionRef::Custom(section) => &section.common,
        }
    }

    /// Whether this is a `custom` section
    pub fn is_custom(&self) -> bool {
        matches!(self, SectionRef::Custom(_))
    }

    /// Section kind
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionRef::Provider(_) => SectionKind::Provider,
            SectionRef::Custom(_) => SectionKind::Custom,
        }
    }

    /// Name used for plugin lookup
    ///
    /// Standard providers are looked up by title, custom sections always by
    /// the custom plugin.
    pub fn plugin_name(&self) -> Option<&'a str> {
        match self {
            SectionRef::Provider(section) => {
                section.name.as_deref().filter(|name| !name.is_empty())
            }
            SectionRef::Custom(_) => Some(CUSTOM_PLUGIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_file() {
        let config = ConfigFile::from_toml("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.period, DEFAULT_PERIOD as i64);
        assert_eq!(config.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
    }

    #[test]
    fn test_single_string_accepted_for_lists() {
        let config = ConfigFile::from_toml(
            r#"
            [[provider]]
            name = "dyndns.org"
            hostname = "a.example.org"
            alias = ["b.example.org", "c.example.org"]
            "#,
        )
        .unwrap();

        let section = &config.provider[0];
        assert_eq!(section.hostname, vec!["a.example.org"]);
        assert_eq!(section.alias, vec!["b.example.org", "c.example.org"]);
    }

    #[test]
    fn test_custom_section_flattens_common_options() {
        let config = ConfigFile::from_toml(
            r#"
            [[custom]]
            name = "home"
            username = "u"
            ssl = true
            append-myip = true
            ddns-server = "update.example.net:8080"
            ddns-response = "good"
            hostname = ["home.example.net"]
            "#,
        )
        .unwrap();

        let custom = &config.custom[0];
        assert_eq!(custom.common.name.as_deref(), Some("home"));
        assert_eq!(custom.common.username.as_deref(), Some("u"));
        assert!(custom.common.ssl);
        assert!(custom.append_myip);
        assert_eq!(custom.ddns_server.as_deref(), Some("update.example.net:8080"));
        assert_eq!(custom.ddns_response, vec!["good"]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = ConfigFile::from_toml(
            r#"
            verbose = true
            [[provider]]
            name = "dyndns.org"
            colour = "blue"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.len(), 1);
    }

    #[test]
    fn test_sections_visit_providers_before_customs() {
        let config = ConfigFile::from_toml(
            r#"
            [[custom]]
            name = "first-custom"
            [[provider]]
            name = "a"
            [[provider]]
            name = "b"
            "#,
        )
        .unwrap();

        let order: Vec<String> = config.sections().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, vec!["provider 'a'", "provider 'b'", "custom 'first-custom'"]);
    }

    #[test]
    fn test_custom_sections_use_custom_plugin() {
        let custom = CustomSection::default();
        let section = SectionRef::Custom(&custom);
        assert!(section.is_custom());
        assert_eq!(section.plugin_name(), Some(CUSTOM_PLUGIN));

        let untitled = ProviderSection::default();
        assert_eq!(SectionRef::Provider(&untitled).plugin_name(), None);
    }
}
