//! Integration tests for layered configuration loading

use super::support::with_env;
use skillwright::config::{global_config_path, ConfigLoader, DeploymentMode};
use std::fs;
use tempfile::TempDir;

fn write(path: &std::path::Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let temp = TempDir::new().unwrap();
    let config = with_env(&temp, &[], || ConfigLoader::load(temp.path()).unwrap());
    assert_eq!(config.selection.capacity, 3);
    assert_eq!(config.instance.mode, DeploymentMode::Local);
    assert_eq!(config.generation.request_timeout_secs, 60);
    assert!(config.validate().is_ok());
}

#[test]
fn test_layers_override_in_order() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");

    let config = with_env(&temp, &[], || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(temp.path().join("xdg")));
        write(
            &global,
            "[selection]\ncapacity = 5\n\n[instance]\nmode = \"remote\"\n",
        );
        write(
            &workspace.join("config").join("config.toml"),
            "[selection]\ncapacity = 4\n",
        );
        ConfigLoader::load(&workspace).unwrap()
    });

    assert_eq!(config.selection.capacity, 4, "workspace file beats global file");
    assert_eq!(config.instance.mode, DeploymentMode::Remote, "global file still applies");
}

#[test]
fn test_environment_file_and_variables() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");
    write(
        &workspace.join("config").join("staging.toml"),
        "[generation]\nendpoint = \"https://staging.example.com/api/skill-builder\"\n",
    );

    let config = with_env(
        &temp,
        &[
            ("SKILLWRIGHT_ENV", "staging"),
            ("SKILLWRIGHT__SELECTION__CAPACITY", "2"),
        ],
        || ConfigLoader::load(&workspace).unwrap(),
    );

    assert_eq!(
        config.generation.endpoint,
        "https://staging.example.com/api/skill-builder"
    );
    assert_eq!(config.selection.capacity, 2, "environment variables win");
}

#[test]
fn test_load_from_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    write(
        &path,
        r#"
[instance]
instance_url = "http://agent.internal:3284"

[registry]
endpoint = "https://registry.example.com/api/registry"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.instance.instance_url, "http://agent.internal:3284");
    assert_eq!(
        config.registry.endpoint.as_deref(),
        Some("https://registry.example.com/api/registry")
    );
    assert_eq!(config.registry.registry_address, "0x1");
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_are_all_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    write(
        &path,
        "[selection]\ncapacity = 0\n\n[logging]\nformat = \"xml\"\n",
    );

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(config.ensure_valid().is_err());
}
