//! Provider records
//!
//! A [`ProviderRecord`] is everything the update engine needs for one
//! configured provider: the plugin it was built from, resolved checkip and
//! update endpoints, credentials, the hostnames to update and, for custom
//! providers, the response substrings that mean success.
//!
//! Records are created once by the [`ProviderBuilder`](crate::ProviderBuilder)
//! and are read-only afterwards, except for the encoded password which the
//! HTTP layer fills in later.

use crate::bounded::{BoundedList, BoundedString};
use crate::endpoint::Endpoint;
use crate::http::HttpClient;
use crate::limits::{
    MAX_HOSTNAMES, MAX_RESPONSES, NAME_CAPACITY, PASSWORD_CAPACITY, PATH_CAPACITY,
    RESPONSE_CAPACITY, USERNAME_CAPACITY,
};
use crate::model::SectionKind;
use crate::plugin::ProviderPlugin;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A hostname to keep updated
pub type Hostname = BoundedString<NAME_CAPACITY>;

/// A checkip or update URL path
pub type UrlPath = BoundedString<PATH_CAPACITY>;

/// Provider account username
pub type Username = BoundedString<USERNAME_CAPACITY>;

/// Provider account password
pub type Password = BoundedString<PASSWORD_CAPACITY>;

/// An expected success-response substring
pub type Response = BoundedString<RESPONSE_CAPACITY>;

/// Hostnames of a record, in declaration order
pub type HostnameSet = BoundedList<Hostname, MAX_HOSTNAMES>;

/// Expected responses of a custom record, in declaration order
pub type ResponseList = BoundedList<Response, MAX_RESPONSES>;

/// Provider account credentials
///
/// # Security
///
/// Neither the password nor its encoded form is serialized or shown by the
/// `Debug` implementation.
#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    username: Option<Username>,
    #[serde(skip)]
    password: Option<Password>,
    #[serde(skip)]
    encoded_password: Option<String>,
}

// Custom Debug implementation that hides the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |present: bool| if present { Some("<REDACTED>") } else { None };
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &redacted(self.password.is_some()))
            .field("encoded_password", &redacted(self.encoded_password.is_some()))
            .finish()
    }
}

impl Credentials {
    /// Create credentials, dropping values that exceed their capacity
    pub fn new(username: Option<&str>, password: Option<&str>) -> Self {
        Self::from_parts(
            username.and_then(|value| Username::new(value).ok()),
            password.and_then(|value| Password::new(value).ok()),
        )
    }

    /// Create credentials from already bounded values
    pub fn from_parts(username: Option<Username>, password: Option<Password>) -> Self {
        Self {
            username,
            password,
            encoded_password: None,
        }
    }

    /// Account username
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Account password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Encoded password produced by the HTTP layer
    pub fn encoded_password(&self) -> Option<&str> {
        self.encoded_password.as_deref()
    }

    /// Store the encoded password, replacing any previous one
    pub fn set_encoded_password(&mut self, encoded: impl Into<String>) {
        self.encoded_password = Some(encoded.into());
    }

    /// Release the encoded password
    pub fn clear_encoded_password(&mut self) -> Option<String> {
        self.encoded_password.take()
    }
}

/// One configured provider, ready for the update engine
#[derive(Debug, Serialize)]
pub struct ProviderRecord {
    pub(crate) name: String,
    pub(crate) kind: SectionKind,
    #[serde(serialize_with = "plugin_name")]
    pub(crate) plugin: Arc<ProviderPlugin>,
    pub(crate) checkip: Endpoint,
    pub(crate) checkip_path: UrlPath,
    pub(crate) update: Endpoint,
    pub(crate) update_path: UrlPath,
    pub(crate) wildcard: bool,
    pub(crate) ssl_enabled: bool,
    pub(crate) append_myip: bool,
    pub(crate) credentials: Credentials,
    pub(crate) hostnames: HostnameSet,
    pub(crate) responses: ResponseList,
    #[serde(skip)]
    pub(crate) checkip_client: HttpClient,
    #[serde(skip)]
    pub(crate) update_client: HttpClient,
}

fn plugin_name<S: Serializer>(
    plugin: &Arc<ProviderPlugin>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(plugin.name())
}

impl ProviderRecord {
    /// Section title, or the plugin name for untitled custom sections
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of section the record was built from
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Whether the record was built from a `custom` section
    pub fn is_custom(&self) -> bool {
        self.kind == SectionKind::Custom
    }

    /// Plugin the record was built from
    pub fn plugin(&self) -> &Arc<ProviderPlugin> {
        &self.plugin
    }

    /// Checkip endpoint
    pub fn checkip(&self) -> &Endpoint {
        &self.checkip
    }

    /// Checkip URL path
    pub fn checkip_path(&self) -> &str {
        self.checkip_path.as_str()
    }

    /// Update endpoint
    pub fn update(&self) -> &Endpoint {
        &self.update
    }

    /// Update URL path
    pub fn update_path(&self) -> &str {
        self.update_path.as_str()
    }

    /// Request wildcard records
    pub fn wildcard(&self) -> bool {
        self.wildcard
    }

    /// Use HTTPS for updates
    pub fn ssl_enabled(&self) -> bool {
        self.ssl_enabled
    }

    /// Append the current address to update requests (custom only)
    pub fn append_myip(&self) -> bool {
        self.append_myip
    }

    /// Account credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Mutable credentials, for storing the encoded password
    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Hostnames to update
    pub fn hostnames(&self) -> &HostnameSet {
        &self.hostnames
    }

    /// Expected success-response substrings (custom only)
    pub fn responses(&self) -> &ResponseList {
        &self.responses
    }

    /// Client for the checkip endpoint
    pub fn checkip_client(&self) -> &HttpClient {
        &self.checkip_client
    }

    /// Client for the update endpoint
    pub fn update_client(&self) -> &HttpClient {
        &self.update_client
    }
}
