//! Identifier and foreign-key heuristics.
//!
//! Both are naming-convention guesses, so each sits behind a single-method
//! trait and can be swapped per run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::naming::{lower_first, snake_case, upper_first};
use crate::domain::Schema;

/// Picks the property that identifies records of a resource.
pub trait IdFieldStrategy: Send + Sync {
    fn id_field(&self, resource: &str, schema: &Schema) -> String;
}

/// Guesses which resource a property refers to, e.g. `authorId` → `Author`.
pub trait ForeignKeyStrategy: Send + Sync {
    fn target_resource(&self, field: &str) -> Option<String>;
}

/// First match wins:
/// 1. `id`
/// 2. `{resource}Id` with a lower-cased first letter (`User` → `userId`)
/// 3. `{resource}_id` in snake case (`UserProfile` → `user_profile_id`)
/// 4. `blid`, ignoring case
/// 5. any property ending in `id`, ignoring case
/// 6. the first declared property
/// 7. `id` when nothing is declared
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalIdField;

impl IdFieldStrategy for ConventionalIdField {
    fn id_field(&self, resource: &str, schema: &Schema) -> String {
        let props = &schema.properties;

        if props.contains_key("id") {
            return "id".to_string();
        }

        let camel = format!("{}Id", lower_first(resource));
        if props.contains_key(&camel) {
            return camel;
        }

        let snake = format!("{}_id", snake_case(resource));
        if props.contains_key(&snake) {
            return snake;
        }

        if let Some(name) = props.keys().find(|k| k.eq_ignore_ascii_case("blid")) {
            return name.clone();
        }

        if let Some(name) = props.keys().find(|k| k.to_lowercase().ends_with("id")) {
            return name.clone();
        }

        props
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "id".to_string())
    }
}

/// Per-resource overrides in front of another strategy.
///
/// Resource names are matched ignoring case; the config layer lower-cases map keys.
pub struct OverrideIdField {
    overrides: HashMap<String, String>,
    fallback: Arc<dyn IdFieldStrategy>,
}

impl OverrideIdField {
    pub fn new(overrides: HashMap<String, String>, fallback: Arc<dyn IdFieldStrategy>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(resource, field)| (resource.to_lowercase(), field))
            .collect();
        Self {
            overrides,
            fallback,
        }
    }
}

impl IdFieldStrategy for OverrideIdField {
    fn id_field(&self, resource: &str, schema: &Schema) -> String {
        match self.overrides.get(&resource.to_lowercase()) {
            Some(field) => field.clone(),
            None => self.fallback.id_field(resource, schema),
        }
    }
}

/// Strips a trailing `id` (and any `_` before it) and capitalizes the rest:
/// `authorId` → `Author`, `author_id` → `Author`. Names of two characters or
/// fewer never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalForeignKey;

impl ForeignKeyStrategy for ConventionalForeignKey {
    fn target_resource(&self, field: &str) -> Option<String> {
        if field.len() <= 2 || !field.to_lowercase().ends_with("id") {
            return None;
        }
        let stem = field.get(..field.len() - 2)?.trim_end_matches('_');
        if stem.is_empty() {
            return None;
        }
        Some(upper_first(stem))
    }
}
