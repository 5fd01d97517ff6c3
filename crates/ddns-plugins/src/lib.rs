// # Built-in DDNS Plugins
//
// Static descriptors for the DDNS services the daemon knows out of the box.
//
// Each plugin names the service's checkip endpoint, its update endpoint and
// the response substrings that signal success. Standard `provider` sections
// pick a plugin by title; `provider "dyndns.org"` resolves to the
// `default@dyndns.org` plugin registered here.
//
// ## Usage
//
// ```rust,ignore
// use ddns_config::{ConfigLoader, PluginRegistry};
//
// let mut plugins = PluginRegistry::new();
// ddns_plugins::register(&mut plugins);
//
// let loaded = ConfigLoader::new(&plugins).load_file("/etc/ddnsd.toml")?;
// ```

use ddns_config::{PluginRegistry, ProviderPlugin};

/// Descriptors of every built-in service, including the custom plugin
pub fn builtin() -> Vec<ProviderPlugin> {
    vec![
        ProviderPlugin::new("default@dyndns.org")
            .with_checkip("checkip.dyndns.org", "/")
            .with_update("members.dyndns.org", "/nic/update?hostname=")
            .with_responses(["good", "nochg"]),
        ProviderPlugin::new("default@freedns.afraid.org")
            .with_update("freedns.afraid.org", "/dynamic/update.php?")
            .with_responses(["Updated", "has not changed"]),
        ProviderPlugin::new("default@no-ip.com")
            .with_checkip("ip1.dynupdate.no-ip.com", "/")
            .with_update("dynupdate.no-ip.com", "/nic/update?hostname=")
            .with_responses(["good", "nochg"]),
        ProviderPlugin::new("default@duckdns.org")
            .with_update("www.duckdns.org", "/update?domains=")
            .with_responses(["OK"]),
        ProviderPlugin::new("default@dynu.com")
            .with_update("api.dynu.com", "/nic/update?hostname=")
            .with_responses(["good", "nochg"]),
        ProviderPlugin::new("default@changeip.com")
            .with_checkip("ip.changeip.com", "/")
            .with_update("nic.changeip.com", "/nic/update?hostname=")
            .with_responses(["200 Successful Update"]),
        ProviderPlugin::new("default@tunnelbroker.net")
            .with_checkip("checkip.dns.he.net", "/")
            .with_update("ipv4.tunnelbroker.net", "/nic/update?hostname=")
            .with_responses(["good", "nochg"]),
        ProviderPlugin::custom(),
    ]
}

/// Register every built-in plugin
///
/// Plugins already registered under the same name are replaced.
pub fn register(registry: &mut PluginRegistry) {
    for plugin in builtin() {
        if registry.register(plugin).is_some() {
            tracing::debug!("Replaced previously registered DDNS plugin");
        }
    }
}

/// A registry holding only the built-in plugins
pub fn default_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    register(&mut registry);
    registry
}
