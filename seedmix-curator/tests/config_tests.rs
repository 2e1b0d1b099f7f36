//! Curator configuration resolution: file, environment, validation

use seedmix_curator::config::{DEFAULT_CATALOG_BASE_URL, DEFAULT_GENERATION_URL};
use seedmix_curator::CuratorConfig;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 3] = [
    "SEEDMIX_CURATOR_CONFIG",
    "SEEDMIX_CATALOG_URL",
    "SEEDMIX_GENERATION_URL",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_cli_path_loads_file() {
    clear_env();
    let file = config_file(
        r#"
        generation_url = "http://127.0.0.1:4000/ai"
        search_limit = 5
        debounce_ms = 150
        "#,
    );

    let config = CuratorConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.generation_url, "http://127.0.0.1:4000/ai");
    assert_eq!(config.search_limit, 5);
    assert_eq!(config.debounce().as_millis(), 150);
    assert_eq!(config.catalog_base_url, DEFAULT_CATALOG_BASE_URL);
}

#[test]
#[serial]
fn test_env_var_selects_file() {
    clear_env();
    let file = config_file("default_how_many = 20\n");
    env::set_var("SEEDMIX_CURATOR_CONFIG", file.path());

    let config = CuratorConfig::load(None).unwrap();
    assert_eq!(config.default_how_many, 20);

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_file_urls() {
    clear_env();
    let file = config_file(
        r#"
        catalog_base_url = "http://from-file"
        generation_url = "http://from-file/ai"
        "#,
    );
    env::set_var("SEEDMIX_CATALOG_URL", "http://from-env");
    env::set_var("SEEDMIX_GENERATION_URL", "  ");

    let config = CuratorConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.catalog_base_url, "http://from-env");
    // blank env values count as unset
    assert_eq!(config.generation_url, "http://from-file/ai");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_file_is_error() {
    clear_env();
    let file = config_file("search_limit = \"lots\"\n");
    assert!(CuratorConfig::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_zero_search_limit_is_error() {
    clear_env();
    let file = config_file("search_limit = 0\n");
    assert!(CuratorConfig::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    clear_env();
    let result = CuratorConfig::load(Some(std::path::Path::new("/nonexistent/seedmix.toml")));
    assert!(result.is_err());
}

#[test]
fn test_defaults() {
    let config = CuratorConfig::default();
    assert_eq!(config.generation_url, DEFAULT_GENERATION_URL);
    assert_eq!(config.request_timeout().as_secs(), 30);
    assert_eq!(config.debounce().as_millis(), 300);
}
