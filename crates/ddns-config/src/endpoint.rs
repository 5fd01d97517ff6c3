//! `host[:port]` endpoint resolution
//!
//! `server:port` resolves to `{server, port}`; a missing, malformed or zero
//! port falls back to the default port instead of failing. Only a host part
//! longer than [`NAME_CAPACITY`] is an error.

use crate::bounded::BoundedString;
use crate::error::EndpointError;
use crate::limits::{DEFAULT_PORT, NAME_CAPACITY};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Server name with the fixed name capacity
pub type ServerName = BoundedString<NAME_CAPACITY>;

/// A resolved server endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    name: ServerName,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from its parts
    pub fn new(name: ServerName, port: u16) -> Self {
        Self { name, port }
    }

    /// Resolve `host` or `host:port`, defaulting to port 80
    ///
    /// # Example
    ///
    /// ```rust
    /// use ddns_config::Endpoint;
    ///
    /// let endpoint = Endpoint::resolve("members.dyndns.org:8245").unwrap();
    /// assert_eq!(endpoint.name(), "members.dyndns.org");
    /// assert_eq!(endpoint.port(), 8245);
    ///
    /// let endpoint = Endpoint::resolve("members.dyndns.org:http").unwrap();
    /// assert_eq!(endpoint.port(), 80);
    /// ```
    pub fn resolve(raw: &str) -> Result<Self, EndpointError> {
        // Split at the first `:`
        let (host, port) = match raw.split_once(':') {
            Some((host, port)) => (host, parse_port(port).unwrap_or(DEFAULT_PORT)),
            None => (raw, DEFAULT_PORT),
        };

        let name = ServerName::new(host)?;
        Ok(Self { name, port })
    }

    /// Server name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.port)
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}
