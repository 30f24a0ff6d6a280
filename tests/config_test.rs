use apimock::config::Settings;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_settings_from_root() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let config_toml = r#"
[generator]
items_per_resource = 8
max_depth = 3
seed = 7

[generator.id_fields]
Robot = "blid"

[specs]
dir = "apis"
patterns = ["*.yaml"]

[store]
path = "data/mock.json"
default_id_field = "uid"

[store.id_fields]
robots = "blid"
"#;
    fs::write(root.join("apimock.toml"), config_toml)?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.generator.items_per_resource, 8);
    assert_eq!(settings.generator.max_depth, 3);
    assert_eq!(settings.generator.array_max_items, 3);
    assert_eq!(settings.generator.seed, Some(7));
    // Map keys may come back lower-cased; lookups ignore case
    assert!(settings
        .generator
        .id_fields
        .iter()
        .any(|(k, v)| k.eq_ignore_ascii_case("robot") && v == "blid"));

    assert_eq!(settings.specs.dir, root.join("apis"));
    assert_eq!(settings.specs.patterns, vec!["*.yaml".to_string()]);
    assert_eq!(settings.store.path, root.join("data/mock.json"));

    let options = settings.store.options();
    assert_eq!(options.id_field("robots"), "blid");
    assert_eq!(options.id_field("users"), "uid");

    Ok(())
}

#[test]
fn test_yaml_config_is_supported() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(
        root.join("apimock.yaml"),
        "generator:\n  items_per_resource: 2\nstore:\n  path: /tmp/elsewhere.json\n",
    )?;

    let settings = Settings::from_root(root.to_str().unwrap())?;
    assert_eq!(settings.generator.items_per_resource, 2);
    assert_eq!(settings.store.path, std::path::PathBuf::from("/tmp/elsewhere.json"));

    Ok(())
}

#[test]
fn test_validation_errors_are_reported_together() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(
        root.join("apimock.toml"),
        "[generator]\nitems_per_resource = 0\narray_max_items = 0\n\n[store]\ndefault_id_field = \"\"\n",
    )?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("generator.items_per_resource"));
    assert!(message.contains("generator.array_max_items"));
    assert!(message.contains("store.default_id_field"));

    Ok(())
}
