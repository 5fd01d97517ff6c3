//! Error types for the DDNS configuration layer
//!
//! Errors come in three tiers:
//!
//! - [`Error`]: load-level outcome. `Read` and `Syntax` abort a load before any
//!   section is looked at; `Invalid` carries every section diagnostic of a load
//!   that got past parsing but could not be accepted as a whole.
//! - [`SectionError`]: a single provider section is unusable. It is logged
//!   with the section's context, the section is skipped and its siblings are
//!   still processed.
//! - [`EndpointError`]: a `host[:port]` string could not be resolved.

use crate::bounded::Overflow;
use crate::model::SectionId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the configuration layer
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Read {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not well-formed
    #[error("Error parsing configuration file {origin}: {message}")]
    Syntax {
        /// File path or `<inline>`
        origin: String,
        /// Parser message, including position
        message: String,
    },

    /// One or more provider sections were rejected
    #[error("{} provider section(s) rejected: {}", diagnostics.len(), summarize(diagnostics))]
    Invalid {
        /// Every rejected section, in declaration order
        diagnostics: Vec<Diagnostic>,
    },

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Create a syntax error
    pub fn syntax(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Diagnostics of a rejected load, empty for every other error
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Invalid { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Endpoint resolution errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointError {
    /// Host part does not fit the server name capacity
    #[error("server name too long ({len} > {capacity})")]
    TooLong {
        /// Length of the host part
        len: usize,
        /// Server name capacity
        capacity: usize,
    },
}

impl From<Overflow> for EndpointError {
    fn from(overflow: Overflow) -> Self {
        Self::TooLong {
            len: overflow.len,
            capacity: overflow.capacity,
        }
    }
}

/// Reasons a single provider section is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// `provider` section without a title
    #[error("Missing DDNS provider name")]
    MissingName,

    /// Deprecated `alias` cannot be merged into a non-empty `hostname`
    #[error("Both 'hostname' and 'alias' set, cannot convert deprecated 'alias' to 'hostname'")]
    AliasConflict,

    /// `hostname` absent or empty
    #[error("No hostnames listed in DDNS provider {provider}")]
    MissingHostnames {
        /// Plugin name of the section
        provider: String,
    },

    /// A `hostname` entry exceeds the name capacity
    #[error("Too long DDNS hostname ({hostname}) in provider {provider}")]
    HostnameTooLong {
        /// Plugin name of the section
        provider: String,
        /// Offending entry
        hostname: String,
    },

    /// No plugin answers to the section's name
    #[error("Invalid DDNS provider {0}")]
    UnknownProvider(String),

    /// `username` or `password` missing on a standard provider
    #[error("Missing {field} setting for DDNS provider {provider}")]
    MissingCredential {
        /// Plugin name of the section
        provider: String,
        /// `username` or `password`
        field: &'static str,
    },

    /// Custom section without `ddns-server`
    #[error("Missing 'ddns-server' for custom DDNS provider")]
    MissingServer,

    /// Plugin disappeared between validation and build
    #[error("Cannot find a DDNS plugin for provider '{0}'")]
    PluginLookupFailed(String),

    /// A plugin default or user override exceeds a fixed capacity
    #[error("Value of '{field}' is too long ({len} > {capacity})")]
    ConfigOverflow {
        /// Option or plugin field that overflowed
        field: &'static str,
        /// Length of the value
        len: usize,
        /// Capacity of the field
        capacity: usize,
    },

    /// HTTP client for the record could not be constructed
    #[error("Cannot set up HTTP client for '{field}': {message}")]
    HttpClient {
        /// `checkip` or `update`
        field: &'static str,
        /// Underlying failure
        message: String,
    },
}

impl SectionError {
    /// Create an overflow error for `field`
    pub fn overflow(field: &'static str, overflow: Overflow) -> Self {
        Self::ConfigOverflow {
            field,
            len: overflow.len,
            capacity: overflow.capacity,
        }
    }

    /// Configuration option the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SectionError::MissingName | SectionError::UnknownProvider(_) => Some("name"),
            SectionError::AliasConflict => Some("alias"),
            SectionError::MissingHostnames { .. } | SectionError::HostnameTooLong { .. } => {
                Some("hostname")
            }
            SectionError::MissingCredential { field, .. } => Some(*field),
            SectionError::MissingServer => Some("ddns-server"),
            SectionError::ConfigOverflow { field, .. } | SectionError::HttpClient { field, .. } => {
                Some(*field)
            }
            SectionError::PluginLookupFailed(_) => None,
        }
    }
}

/// A section-level error together with the section it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Section that was rejected
    pub section: SectionId,
    /// Option the error refers to, if any
    pub field: Option<&'static str>,
    /// What went wrong
    pub error: SectionError,
}

impl Diagnostic {
    /// Attach `error` to `section`
    pub fn new(section: SectionId, error: SectionError) -> Self {
        Self {
            field: error.field(),
            section,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{} ({}): {}", self.section, field, self.error),
            None => write!(f, "{}: {}", self.section, self.error),
        }
    }
}
