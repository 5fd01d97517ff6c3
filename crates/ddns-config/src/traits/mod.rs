//! Core traits for the DDNS configuration layer
//!
//! - [`PluginLookup`]: Resolve a provider name to its static plugin descriptor

pub mod plugin_lookup;

pub use plugin_lookup::PluginLookup;
