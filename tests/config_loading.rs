//! Integration tests for tenants file loading across all file formats.

use extdir::config::model::Directory;
use extdir::config::sources::parse_directory_str;
use extdir::config::validation::validate;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[test]
fn yaml_example_loads_and_validates() {
    let content = load_example("extdir.yaml");
    let directory = parse_directory_str("yaml", &content, "extdir.yaml").unwrap();
    validate(&directory).unwrap();
    assert_eq!(directory.len(), 5);
}

#[test]
fn yaml_full_example_loads_and_validates() {
    let content = load_example("full.yaml");
    let directory = parse_directory_str("yaml", &content, "full.yaml").unwrap();
    validate(&directory).unwrap();
    assert!(directory.len() >= 3);

    let hermis = directory.lookup("4033").unwrap();
    assert!(hermis.strict_dropoff_location);
    assert_eq!(hermis.geocoding_api_version, 2);
    assert!(hermis.bounds.is_some());
    assert!(hermis.restricts_pickup());
    assert!(hermis.restricts_dropoff());

    let cosmos = directory.lookup("4036").unwrap();
    assert_eq!(cosmos.max_retries, 3);
    assert!(!cosmos.ask_for_name);
    assert!(cosmos.bypass_welcome);
}

#[cfg(feature = "json")]
#[test]
fn json_example_loads_and_validates() {
    let content = load_example("extdir.json");
    let directory = parse_directory_str("json", &content, "extdir.json").unwrap();
    validate(&directory).unwrap();
    assert!(!directory.is_empty());
}

#[cfg(feature = "toml")]
#[test]
fn toml_example_loads_and_validates() {
    let content = load_example("extdir.toml");
    let directory = parse_directory_str("toml", &content, "extdir.toml").unwrap();
    validate(&directory).unwrap();
    assert!(!directory.is_empty());
}

#[cfg(all(feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_directories() {
    let yaml_content = load_example("extdir.yaml");
    let json_content = load_example("extdir.json");
    let toml_content = load_example("extdir.toml");

    let yaml_dir = parse_directory_str("yaml", &yaml_content, "yaml").unwrap();
    let json_dir = parse_directory_str("json", &json_content, "json").unwrap();
    let toml_dir = parse_directory_str("toml", &toml_content, "toml").unwrap();

    // The JSON/TOML examples carry a subset of extensions; every entry
    // they do carry must match the YAML one field-for-field.
    assert_eq!(json_dir.len(), toml_dir.len());
    for (extension, config) in json_dir.iter() {
        assert_eq!(Some(config), yaml_dir.lookup(extension));
        assert_eq!(Some(config), toml_dir.lookup(extension));
    }
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_directory_str("xml", "{}", "test.xml");
    assert!(result.is_err());
}

#[test]
fn empty_directory_fails_validation() {
    let directory: Directory = serde_json::from_str("{}").unwrap();
    assert!(validate(&directory).is_err());
}

#[test]
fn worked_example_extension_4033() {
    let content = load_example("extdir.yaml");
    let directory = parse_directory_str("yaml", &content, "extdir.yaml").unwrap();
    validate(&directory).unwrap();

    let config = directory.lookup("4033").unwrap();
    assert_eq!(config.tts_engine.as_str(), "edge-tts");
    assert_eq!(config.callback_mode.as_u8(), 2);
    assert_eq!(
        config.callback_url.as_deref(),
        Some("http://79.129.41.206/callback.php")
    );
}
