//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Every key with a non-trivial default is seeded here so partial files merge
/// key-by-key instead of replacing whole tables.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("instance.mode", "local")?
        .set_default("instance.instance_url", crate::config::DEFAULT_INSTANCE_URL)?
        .set_default("selection.capacity", crate::selection::DEFAULT_CAPACITY as i64)?
        .set_default("generation.endpoint", crate::config::DEFAULT_GENERATION_ENDPOINT)?
        .set_default("generation.connect_timeout_secs", 10)?
        .set_default("generation.request_timeout_secs", 60)?
        .set_default("generation.event_capacity", 256)?
        .set_default("registry.registry_address", "0x1")?
        .set_default("registry.node_url", crate::config::DEFAULT_NODE_URL)?
        .set_default("registry.explorer_url", crate::config::DEFAULT_EXPLORER_URL)
}
