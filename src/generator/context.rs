use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use super::id_field::{
    ConventionalForeignKey, ConventionalIdField, ForeignKeyStrategy, IdFieldStrategy,
    OverrideIdField,
};
use super::registry::IdRegistry;
use crate::config::GeneratorSettings;
use crate::domain::Schema;

pub const DEFAULT_ITEMS_PER_RESOURCE: usize = 5;
pub const DEFAULT_MAX_DEPTH: usize = 6;
pub const DEFAULT_ARRAY_MIN_ITEMS: usize = 1;
pub const DEFAULT_ARRAY_MAX_ITEMS: usize = 3;

/// Tunables for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Records attempted per resource; duplicates are dropped, not retried.
    pub items_per_resource: usize,
    /// Nesting depth past which objects and arrays come out empty.
    pub max_depth: usize,
    pub array_min_items: usize,
    pub array_max_items: usize,
    /// Fixes the RNG for reproducible datasets.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            items_per_resource: DEFAULT_ITEMS_PER_RESOURCE,
            max_depth: DEFAULT_MAX_DEPTH,
            array_min_items: DEFAULT_ARRAY_MIN_ITEMS,
            array_max_items: DEFAULT_ARRAY_MAX_ITEMS,
            seed: None,
        }
    }
}

impl From<&GeneratorSettings> for GeneratorOptions {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            items_per_resource: settings.items_per_resource,
            max_depth: settings.max_depth,
            array_min_items: settings.array_min_items,
            array_max_items: settings.array_max_items,
            seed: settings.seed,
        }
    }
}

/// State threaded through a generation pass: randomness, the identifiers
/// produced so far, and the naming heuristics in use.
pub struct GenerationContext {
    pub(crate) rng: StdRng,
    registry: IdRegistry,
    options: GeneratorOptions,
    id_strategy: Arc<dyn IdFieldStrategy>,
    fk_strategy: Arc<dyn ForeignKeyStrategy>,
}

impl GenerationContext {
    pub fn new(options: GeneratorOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            registry: IdRegistry::new(),
            options,
            id_strategy: Arc::new(ConventionalIdField),
            fk_strategy: Arc::new(ConventionalForeignKey),
        }
    }

    /// Context for the configured generator, with `id_fields` overrides layered
    /// over the conventional identifier detection.
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let ctx = Self::new(GeneratorOptions::from(settings));
        if settings.id_fields.is_empty() {
            return ctx;
        }
        let overrides = OverrideIdField::new(settings.id_fields.clone(), Arc::new(ConventionalIdField));
        ctx.with_id_strategy(Arc::new(overrides))
    }

    pub fn with_id_strategy(mut self, strategy: Arc<dyn IdFieldStrategy>) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn with_foreign_key_strategy(mut self, strategy: Arc<dyn ForeignKeyStrategy>) -> Self {
        self.fk_strategy = strategy;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    pub fn reset_registry(&mut self) {
        self.registry.clear();
    }

    pub fn id_field(&self, resource: &str, schema: &Schema) -> String {
        self.id_strategy.id_field(resource, schema)
    }

    pub fn foreign_key_target(&self, field: &str) -> Option<String> {
        self.fk_strategy.target_resource(field)
    }

    pub fn record_id(&mut self, resource: &str, id: Value) -> bool {
        self.registry.record(resource, id)
    }

    /// One of the identifiers already produced for `target`.
    pub fn pick_linked_id(&mut self, target: &str) -> Option<Value> {
        self.registry.pick(target, &mut self.rng)
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}
