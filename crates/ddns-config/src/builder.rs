//! Provider record construction
//!
//! Merges a validated section with its plugin's static defaults:
//!
//! 1. Look up the plugin (section title, or `custom`)
//! 2. Seed checkip and update endpoints and paths from the plugin
//! 3. Copy flags and credentials
//! 4. Copy hostnames
//! 5. Custom sections: apply server/path overrides and expected responses
//! 6. Construct the checkip and update HTTP clients
//!
//! Any step can reject the section with a [`SectionError`]; the loader logs
//! it and carries on with the next section.
//!
//! Two capacity policies are deliberately lenient: credentials over capacity
//! are dropped with a warning, and hostnames or responses beyond the list
//! capacity are dropped with a single warning per section.

use crate::bounded::Overflow;
use crate::endpoint::Endpoint;
use crate::error::{EndpointError, SectionError};
use crate::http::HttpClient;
use crate::limits::{MAX_HOSTNAMES, MAX_RESPONSES};
use crate::model::{CustomSection, ProviderSection, SectionRef};
use crate::plugin::{GENERIC_RESPONSES, ProviderPlugin};
use crate::record::{
    Credentials, Hostname, HostnameSet, Password, ProviderRecord, Response, ResponseList,
    Username, UrlPath,
};
use crate::traits::PluginLookup;
use tracing::{debug, warn};

/// Builds provider records from validated sections
pub struct ProviderBuilder<'a> {
    plugins: &'a dyn PluginLookup,
}

impl<'a> ProviderBuilder<'a> {
    /// Create a builder resolving plugins through `plugins`
    pub fn new(plugins: &'a dyn PluginLookup) -> Self {
        Self { plugins }
    }

    /// Build the record for one section
    ///
    /// The section is expected to have passed validation; the plugin lookup
    /// is repeated here and fails with [`SectionError::PluginLookupFailed`]
    /// if the plugin has gone missing.
    pub fn build(&self, section: SectionRef<'_>) -> Result<ProviderRecord, SectionError> {
        let plugin_name = section.plugin_name().ok_or(SectionError::MissingName)?;
        let plugin = self
            .plugins
            .find(plugin_name)
            .ok_or_else(|| SectionError::PluginLookupFailed(plugin_name.to_string()))?;

        let common = section.common();
        let name = common
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| plugin.name().to_string());

        let mut checkip = resolve("checkip-server", plugin.checkip_server())?;
        let mut checkip_path = url_path("checkip-path", plugin.checkip_path())?;
        let mut update = resolve("ddns-server", plugin.update_server())?;
        let mut update_path = url_path("ddns-path", plugin.update_path())?;

        let credentials = Credentials::from_parts(
            lenient::<Username>(&name, "username", common.username.as_deref()),
            lenient::<Password>(&name, "password", common.password.as_deref()),
        );
        let hostnames = collect_hostnames(&name, common)?;

        let mut append_myip = false;
        let mut responses = ResponseList::new();

        if let SectionRef::Custom(custom) = section {
            append_myip = custom.append_myip;

            if let Some(server) = custom.checkip_server.as_deref() {
                checkip = resolve("checkip-server", server)?;
            }
            if let Some(path) = custom.checkip_path.as_deref() {
                checkip_path = url_path("checkip-path", path)?;
            }
            if let Some(server) = custom.ddns_server.as_deref() {
                update = resolve("ddns-server", server)?;
            }
            if let Some(path) = custom.ddns_path.as_deref() {
                update_path = url_path("ddns-path", path)?;
            }

            responses = collect_responses(&name, custom, &plugin);
        }

        // Checkip services are plain HTTP; only updates honour `ssl`.
        let checkip_client = HttpClient::new(checkip.clone(), false).map_err(|e| {
            SectionError::HttpClient {
                field: "checkip",
                message: e.to_string(),
            }
        })?;
        let update_client = HttpClient::new(update.clone(), common.ssl).map_err(|e| {
            SectionError::HttpClient {
                field: "update",
                message: e.to_string(),
            }
        })?;

        debug!(
            "Provider {} ({}): update via {}, checkip via {}, {} hostname(s)",
            name,
            plugin.name(),
            update,
            checkip,
            hostnames.len()
        );

        Ok(ProviderRecord {
            name,
            kind: section.kind(),
            plugin,
            checkip,
            checkip_path,
            update,
            update_path,
            wildcard: common.wildcard,
            ssl_enabled: common.ssl,
            append_myip,
            credentials,
            hostnames,
            responses,
            checkip_client,
            update_client,
        })
    }
}

fn resolve(field: &'static str, server: &str) -> Result<Endpoint, SectionError> {
    Endpoint::resolve(server).map_err(|err| match err {
        EndpointError::TooLong { len, capacity } => SectionError::ConfigOverflow {
            field,
            len,
            capacity,
        },
    })
}

fn url_path(field: &'static str, path: &str) -> Result<UrlPath, SectionError> {
    UrlPath::new(path).map_err(|overflow| SectionError::overflow(field, overflow))
}

/// Admit a credential, dropping it with a warning if it does not fit
fn lenient<T>(provider: &str, field: &'static str, value: Option<&str>) -> Option<T>
where
    T: for<'v> TryFrom<&'v str, Error = Overflow>,
{
    let value = value?;
    match T::try_from(value) {
        Ok(admitted) => Some(admitted),
        Err(overflow) => {
            warn!(
                "Ignoring {} for provider {}: {} bytes exceeds capacity of {}",
                field, provider, overflow.len, overflow.capacity
            );
            None
        }
    }
}

fn collect_hostnames(
    provider: &str,
    section: &ProviderSection,
) -> Result<HostnameSet, SectionError> {
    let mut hostnames = HostnameSet::new();
    let mut dropped = 0;

    for name in &section.hostname {
        let hostname = Hostname::new(name.as_str()).map_err(|_| SectionError::HostnameTooLong {
            provider: provider.to_string(),
            hostname: name.clone(),
        })?;
        if !hostnames.push(hostname).is_accepted() {
            dropped += 1;
        }
    }

    if dropped > 0 {
        warn!(
            "Skipping {} hostname(s) in provider {}, only {} hostnames supported",
            dropped, provider, MAX_HOSTNAMES
        );
    }

    Ok(hostnames)
}

/// User-supplied responses, or the plugin's (then generic) defaults
fn collect_responses(
    provider: &str,
    section: &CustomSection,
    plugin: &ProviderPlugin,
) -> ResponseList {
    let mut responses = ResponseList::new();

    if section.ddns_response.is_empty() {
        let defaults: Vec<&str> = if plugin.responses().is_empty() {
            GENERIC_RESPONSES.to_vec()
        } else {
            plugin.responses().iter().map(String::as_str).collect()
        };
        let admitted = defaults
            .into_iter()
            .filter_map(|response| Response::new(response).ok())
            .take(MAX_RESPONSES);
        let _ = responses.extend_bounded(admitted);
        return responses;
    }

    let mut oversized = 0;
    let admitted = section.ddns_response.iter().filter_map(|response| {
        let admitted = Response::new(response.as_str()).ok();
        if admitted.is_none() {
            oversized += 1;
        }
        admitted
    });
    let dropped = responses.extend_bounded(admitted);

    if oversized > 0 {
        warn!(
            "Skipping {} over-long response(s) in provider {}",
            oversized, provider
        );
    }
    if dropped > 0 {
        warn!(
            "Skipping {} response(s) in provider {}, only {} custom responses supported",
            dropped, provider, MAX_RESPONSES
        );
    }

    responses
}
