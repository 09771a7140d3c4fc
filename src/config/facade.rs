//! Config loader facade: assembles sources in precedence order and deserializes.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::SkillwrightConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`SkillwrightConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence, lowest to highest: defaults, global file, `config/config.toml`,
    /// `config/{SKILLWRIGHT_ENV}.toml`, `SKILLWRIGHT__SECTION__KEY` environment variables.
    pub fn load(workspace_root: &Path) -> Result<SkillwrightConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(Self::environment());

        let config: SkillwrightConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace_root = %workspace_root.display(),
            capacity = config.selection.capacity,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single explicit file (plus defaults).
    pub fn load_from_file(path: &Path) -> Result<SkillwrightConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only.
    pub fn default() -> SkillwrightConfig {
        SkillwrightConfig::default()
    }

    /// Location of the user-level config file, if a config dir can be resolved.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn environment() -> Environment {
        Environment::with_prefix("SKILLWRIGHT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}
