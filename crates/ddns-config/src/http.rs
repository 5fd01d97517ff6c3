//! HTTP client handles carried by provider records
//!
//! Records get one handle for the checkip endpoint and one for the update
//! endpoint at load time. Building a handle performs no network I/O; the
//! update engine is the only user of the underlying `reqwest` client.

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::limits::{DEFAULT_PORT, DEFAULT_SSL_PORT};
use crate::record::Credentials;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;

/// Default HTTP timeout for provider requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every provider request
const USER_AGENT: &str = concat!("ddnsd/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to a single provider endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    endpoint: Endpoint,
    ssl: bool,
    client: reqwest::Client,
}

impl HttpClient {
    /// Construct a client for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the TLS backend cannot be initialized.
    pub fn new(endpoint: Endpoint, ssl: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            ssl,
            client,
        })
    }

    /// Endpoint as configured
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether requests use HTTPS
    pub fn is_ssl(&self) -> bool {
        self.ssl
    }

    /// Port requests go to
    ///
    /// With SSL enabled, the plain HTTP default port is swapped for 443.
    pub fn port(&self) -> u16 {
        if self.ssl && self.endpoint.port() == DEFAULT_PORT {
            DEFAULT_SSL_PORT
        } else {
            self.endpoint.port()
        }
    }

    /// URL for `path` on this endpoint
    pub fn url(&self, path: &str) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        let separator = if path.starts_with('/') { "" } else { "/" };
        format!(
            "{}://{}:{}{}{}",
            scheme,
            self.endpoint.name(),
            self.port(),
            separator,
            path
        )
    }

    /// Underlying client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

/// Base64 of `username:password`, as sent in a Basic `Authorization` header
pub fn basic_auth_token(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

/// Populate the encoded password of `credentials`
///
/// Returns `false` and leaves the credentials untouched when there is no
/// password to encode.
pub fn encode_credentials(credentials: &mut Credentials) -> bool {
    let Some(password) = credentials.password() else {
        return false;
    };
    let token = basic_auth_token(credentials.username().unwrap_or_default(), password);
    credentials.set_encoded_password(token);
    true
}
