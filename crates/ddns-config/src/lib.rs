// # ddns-config
//
// Configuration layer of the DDNS daemon.
//
// ## Architecture Overview
//
// Turns a declarative configuration file into the in-memory provider registry
// the update engine iterates:
// - **ConfigLoader**: Parses the TOML file and drives the stages below
// - **Validator**: Cross-field checks over the parsed tree, returning diagnostics
// - **ProviderBuilder**: Merges a section with its plugin's defaults
// - **ProviderRegistry**: Ordered provider records with a caller-held cursor
// - **PluginLookup**: Seam through which plugins are resolved by name
//
// ## Design Principles
//
// 1. **Validate Then Build**: Records are only built from a fully validated tree
// 2. **Report Everything**: One bad section never hides the problems of another
// 3. **Plugin-Based**: Provider defaults come from registered plugins, no hard-coded services
// 4. **No Truncation**: Bounded values either fit or are rejected explicitly

pub mod bounded;
pub mod builder;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod limits;
pub mod loader;
pub mod model;
pub mod plugin;
pub mod record;
pub mod registry;
pub mod traits;
pub mod validate;

// Re-export core types for convenience
pub use bounded::{Admission, BoundedList, BoundedString, Overflow};
pub use builder::ProviderBuilder;
pub use endpoint::Endpoint;
pub use error::{Diagnostic, EndpointError, Error, Result, SectionError};
pub use http::HttpClient;
pub use loader::{ConfigLoader, GlobalConfig, LoadedConfig, Overrides};
pub use model::{ConfigFile, CustomSection, ProviderSection, SectionId, SectionKind, SectionRef};
pub use plugin::{PluginRegistry, ProviderPlugin};
pub use record::{Credentials, ProviderRecord};
pub use registry::{Cursor, ProviderRegistry};
pub use traits::PluginLookup;
pub use validate::Validator;
