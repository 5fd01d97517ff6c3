//! Validation pass over a parsed configuration tree
//!
//! Runs after parsing and before any provider record is built. Each
//! provider-like section goes through the same pipeline, in this order:
//!
//! 1. Deprecated `alias` migration into `hostname`
//! 2. `username` / `password` presence (standard providers only)
//! 3. Plugin existence
//! 4. Hostname list checks
//!
//! Custom sections additionally need a `ddns-server`, checked first.
//!
//! A section stops at its first error. One rejected section never stops the
//! others from being checked; every rejection is returned as a
//! [`Diagnostic`] so the loader can report them together.
//!
//! The global `period` is clamped into `[MIN_PERIOD, MAX_PERIOD]` rather than
//! rejected.

use crate::error::{Diagnostic, SectionError};
use crate::limits::{MAX_PERIOD, MIN_PERIOD, NAME_CAPACITY};
use crate::model::{ConfigFile, CustomSection, ProviderSection, SectionId, SectionKind};
use crate::plugin::CUSTOM_PLUGIN;
use crate::traits::PluginLookup;
use tracing::{debug, warn};

/// Clamp an update period into `[MIN_PERIOD, MAX_PERIOD]`
///
/// Out-of-range values are corrected, never rejected.
pub fn clamp_period(period: i64) -> u64 {
    if period < MIN_PERIOD as i64 {
        MIN_PERIOD
    } else if period > MAX_PERIOD as i64 {
        MAX_PERIOD
    } else {
        period as u64
    }
}

/// Move deprecated `alias` entries into `hostname`
///
/// Returns `Ok(true)` if entries were migrated. Having both options set is
/// ambiguous and rejected.
pub fn migrate_alias(section: &mut ProviderSection) -> Result<bool, SectionError> {
    if section.alias.is_empty() {
        return Ok(false);
    }

    if !section.hostname.is_empty() {
        return Err(SectionError::AliasConflict);
    }

    warn!(
        "Converting deprecated 'alias' to 'hostname' ({} entries)",
        section.alias.len()
    );
    section.hostname = std::mem::take(&mut section.alias);
    Ok(true)
}

/// Check that a section lists at least one hostname and that all fit
pub fn validate_hostnames(provider: &str, hostnames: &[String]) -> Result<(), SectionError> {
    if hostnames.is_empty() {
        return Err(SectionError::MissingHostnames {
            provider: provider.to_string(),
        });
    }

    if let Some(hostname) = hostnames.iter().find(|name| name.len() > NAME_CAPACITY) {
        return Err(SectionError::HostnameTooLong {
            provider: provider.to_string(),
            hostname: hostname.clone(),
        });
    }

    Ok(())
}

/// Section validator backed by a plugin lookup
pub struct Validator<'a> {
    plugins: &'a dyn PluginLookup,
}

impl<'a> Validator<'a> {
    /// Create a validator that checks plugin names against `plugins`
    pub fn new(plugins: &'a dyn PluginLookup) -> Self {
        Self { plugins }
    }

    /// Validate every section and clamp the period, in place
    ///
    /// Returns the diagnostics of all rejected sections, in load order. An
    /// empty result means the whole file is acceptable.
    pub fn validate(&self, config: &mut ConfigFile) -> Vec<Diagnostic> {
        let clamped = clamp_period(config.period);
        if clamped as i64 != config.period {
            debug!("Period {} out of range, using {}", config.period, clamped);
        }
        config.period = clamped as i64;

        let mut diagnostics = Vec::new();

        for (index, section) in config.provider.iter_mut().enumerate() {
            if let Err(error) = self.validate_provider(section) {
                let id = SectionId::new(SectionKind::Provider, index, section.name.clone());
                diagnostics.push(Diagnostic::new(id, error));
            }
        }

        for (index, section) in config.custom.iter_mut().enumerate() {
            if let Err(error) = self.validate_custom(section) {
                let id = SectionId::new(SectionKind::Custom, index, section.common.name.clone());
                diagnostics.push(Diagnostic::new(id, error));
            }
        }

        diagnostics
    }

    /// Validate a standard `provider` section
    pub fn validate_provider(&self, section: &mut ProviderSection) -> Result<(), SectionError> {
        let provider = match section.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(SectionError::MissingName),
        };

        self.validate_common(section, &provider, false)
    }

    /// Validate a `custom` section
    pub fn validate_custom(&self, section: &mut CustomSection) -> Result<(), SectionError> {
        // A bare `:port` names no host
        let host = section
            .ddns_server
            .as_deref()
            .map(|server| server.split_once(':').map_or(server, |(host, _)| host).trim());
        if host.is_none_or(str::is_empty) {
            return Err(SectionError::MissingServer);
        }

        self.validate_common(&mut section.common, CUSTOM_PLUGIN, true)
    }

    /// Checks shared by both section kinds
    ///
    /// Custom providers may use anonymous update endpoints, so credentials
    /// are only required for standard ones.
    fn validate_common(
        &self,
        section: &mut ProviderSection,
        provider: &str,
        custom: bool,
    ) -> Result<(), SectionError> {
        migrate_alias(section)?;

        if !custom {
            if section.username.is_none() {
                return Err(SectionError::MissingCredential {
                    provider: provider.to_string(),
                    field: "username",
                });
            }
            if section.password.is_none() {
                return Err(SectionError::MissingCredential {
                    provider: provider.to_string(),
                    field: "password",
                });
            }
        }

        if !self.plugins.contains(provider) {
            return Err(SectionError::UnknownProvider(provider.to_string()));
        }

        validate_hostnames(provider, &section.hostname)
    }
}
