use config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub mod validator;

use crate::cli::{Cli, Command};
use crate::generator::{
    DEFAULT_ARRAY_MAX_ITEMS, DEFAULT_ARRAY_MIN_ITEMS, DEFAULT_ITEMS_PER_RESOURCE,
    DEFAULT_MAX_DEPTH,
};
use crate::store::{StoreOptions, DEFAULT_ID_FIELD};

pub const DEFAULT_CONFIG_FILE: &str = "apimock.toml";
pub const DEFAULT_SPECS_DIR: &str = "specs";
pub const DEFAULT_STORE_PATH: &str = "db.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub specs: SpecSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_items_per_resource")]
    pub items_per_resource: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_array_min_items")]
    pub array_min_items: usize,
    #[serde(default = "default_array_max_items")]
    pub array_max_items: usize,
    /// Fixed RNG seed for reproducible datasets
    #[serde(default)]
    pub seed: Option<u64>,
    /// Identifier field per definition name, overriding detection
    #[serde(default)]
    pub id_fields: HashMap<String, String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            items_per_resource: default_items_per_resource(),
            max_depth: default_max_depth(),
            array_min_items: default_array_min_items(),
            array_max_items: default_array_max_items(),
            seed: None,
            id_fields: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpecSettings {
    #[serde(default = "default_specs_dir")]
    pub dir: PathBuf,
    /// Glob patterns, relative to `dir`
    #[serde(default = "default_spec_patterns")]
    pub patterns: Vec<String>,
}

impl Default for SpecSettings {
    fn default() -> Self {
        Self {
            dir: default_specs_dir(),
            patterns: default_spec_patterns(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default = "default_id_field")]
    pub default_id_field: String,
    /// Identifier field per collection name, for path matching
    #[serde(default)]
    pub id_fields: HashMap<String, String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            default_id_field: default_id_field(),
            id_fields: HashMap::new(),
        }
    }
}

impl StoreSettings {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            default_id_field: self.default_id_field.clone(),
            id_fields: self.id_fields.clone(),
        }
    }
}

fn default_items_per_resource() -> usize {
    DEFAULT_ITEMS_PER_RESOURCE
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_array_min_items() -> usize {
    DEFAULT_ARRAY_MIN_ITEMS
}

fn default_array_max_items() -> usize {
    DEFAULT_ARRAY_MAX_ITEMS
}

fn default_specs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SPECS_DIR)
}

fn default_spec_patterns() -> Vec<String> {
    vec!["*.json".to_string(), "*.yaml".to_string(), "*.yml".to_string()]
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder(File::from(cli.config.clone()).required(false))?.build()?;
        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `{root}/apimock.{toml,yaml,json}`; relative directories in it are
    /// taken relative to `root`.
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("apimock");
        let s = Self::builder(File::from(config_path).required(false))?.build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.resolve_relative_to(Path::new(root));

        settings.validate()?;
        Ok(settings)
    }

    fn builder<S>(source: S) -> Result<ConfigBuilder<config::builder::DefaultState>, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .add_source(source)
            .set_default("generator.items_per_resource", DEFAULT_ITEMS_PER_RESOURCE as i64)?
            .set_default("generator.max_depth", DEFAULT_MAX_DEPTH as i64)?
            .set_default("generator.array_min_items", DEFAULT_ARRAY_MIN_ITEMS as i64)?
            .set_default("generator.array_max_items", DEFAULT_ARRAY_MAX_ITEMS as i64)?
            .set_default("specs.dir", DEFAULT_SPECS_DIR)?
            .set_default("store.path", DEFAULT_STORE_PATH)?
            .set_default("store.default_id_field", DEFAULT_ID_FIELD)?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(store) = &cli.store {
            self.store.path = store.clone();
        }

        if let Command::Generate(args) = &cli.command {
            if let Some(specs) = &args.specs {
                self.specs.dir = specs.clone();
            }
            if let Some(seed) = args.seed {
                self.generator.seed = Some(seed);
            }
            if let Some(count) = args.count {
                self.generator.items_per_resource = count;
            }
            if let Some(max_depth) = args.max_depth {
                self.generator.max_depth = max_depth;
            }
        }
    }

    fn resolve_relative_to(&mut self, root: &Path) {
        if self.specs.dir.is_relative() {
            self.specs.dir = root.join(&self.specs.dir);
        }
        if self.store.path.is_relative() {
            self.store.path = root.join(&self.store.path);
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
