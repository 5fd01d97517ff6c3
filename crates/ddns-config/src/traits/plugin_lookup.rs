// # Plugin Lookup Trait
//
// Defines how the configuration layer finds the static descriptor behind a
// provider name.
//
// ## Implementations
//
// - `PluginRegistry`: map-backed registry filled by plugin crates
// - Test doubles in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use ddns_config::traits::PluginLookup;
//
// fn describe(plugins: &dyn PluginLookup, name: &str) {
//     match plugins.find(name) {
//         Some(plugin) => println!("{} updates via {}", name, plugin.update_server()),
//         None => println!("{} is not a known provider", name),
//     }
// }
// ```

use crate::plugin::ProviderPlugin;
use std::sync::Arc;

/// Trait for resolving a provider name to its plugin
///
/// Lookups are expected to be cheap and side-effect free. Validation and
/// record construction both call [`find`](PluginLookup::find) for the same
/// section, and must see the same answer.
pub trait PluginLookup {
    /// Find the plugin registered under `name`
    ///
    /// # Returns
    ///
    /// - `Some(plugin)`: the shared descriptor
    /// - `None`: no plugin answers to `name`
    fn find(&self, name: &str) -> Option<Arc<ProviderPlugin>>;

    /// Check whether a plugin answers to `name`
    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}
