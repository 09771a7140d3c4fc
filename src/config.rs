//! Configuration System
//!
//! Layered configuration: built-in defaults, the user-level file, workspace files and
//! `SKILLWRIGHT__SECTION__KEY` environment overrides, validated before use.

use crate::error::ApiError;
use crate::logging::{validate_logging_config, LoggingConfig};
use crate::selection::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

pub const DEFAULT_INSTANCE_URL: &str = "http://localhost:3284";
pub const DEFAULT_GENERATION_ENDPOINT: &str = "http://localhost:3000/api/skill-builder";
pub const DEFAULT_NODE_URL: &str = "https://aptos.testnet.porto.movementlabs.xyz/v1";
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.movementnetwork.xyz/txn";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillwrightConfig {
    /// Agent instance the generated skills are installed into
    #[serde(default)]
    pub instance: InstanceConfig,

    /// Selection limits
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Generation service settings
    #[serde(default)]
    pub generation: GenerationServiceConfig,

    /// Registration service settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the agent instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    #[serde(default)]
    pub mode: DeploymentMode,

    #[serde(default = "default_instance_url")]
    pub instance_url: String,
}

fn default_instance_url() -> String {
    DEFAULT_INSTANCE_URL.to_string()
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::Local,
            instance_url: default_instance_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Maximum number of simultaneously selected items
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationServiceConfig {
    /// URL accepting `{ app, prompt }` and answering with a tagged text stream
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request ceiling; exceeding it surfaces as a transport failure
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Buffered job events per subscriber before lagging
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_generation_endpoint() -> String {
    DEFAULT_GENERATION_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_event_capacity() -> usize {
    256
}

impl GenerationServiceConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GenerationServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_generation_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            event_capacity: default_event_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Remote registration service; when unset the payload is built in process
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_registry_address")]
    pub registry_address: String,

    #[serde(default = "default_node_url")]
    pub node_url: String,

    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

fn default_registry_address() -> String {
    "0x1".to_string()
}

fn default_node_url() -> String {
    DEFAULT_NODE_URL.to_string()
}

fn default_explorer_url() -> String {
    DEFAULT_EXPLORER_URL.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            registry_address: default_registry_address(),
            node_url: default_node_url(),
            explorer_url: default_explorer_url(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Instance(String),
    Selection(String),
    Generation(String),
    Registry(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Instance(msg) => write!(f, "Instance: {}", msg),
            ValidationError::Selection(msg) => write!(f, "Selection: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Registry(msg) => write!(f, "Registry: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl SkillwrightConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.instance.instance_url.trim().is_empty() {
            errors.push(ValidationError::Instance(
                "instance_url cannot be empty".to_string(),
            ));
        }

        if self.selection.capacity == 0 {
            errors.push(ValidationError::Selection(
                "capacity must be at least 1".to_string(),
            ));
        }

        if !is_http_url(&self.generation.endpoint) {
            errors.push(ValidationError::Generation(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.generation.endpoint
            )));
        }
        if self.generation.request_timeout_secs == 0 {
            errors.push(ValidationError::Generation(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.generation.event_capacity == 0 {
            errors.push(ValidationError::Generation(
                "event_capacity must be greater than 0".to_string(),
            ));
        }

        if let Some(endpoint) = &self.registry.endpoint {
            if !is_http_url(endpoint) {
                errors.push(ValidationError::Registry(format!(
                    "endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }
        if self.registry.registry_address.trim().is_empty() {
            errors.push(ValidationError::Registry(
                "registry_address cannot be empty".to_string(),
            ));
        }

        if let Err(e) = validate_logging_config(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`validate`](Self::validate) folded into a single `ConfigError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Load from the workspace and validate in one step.
    pub fn load_validated(workspace_root: &Path) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(workspace_root)?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
