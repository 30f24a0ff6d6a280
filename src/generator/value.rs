//! Mock values for a single schema position.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use fake::faker::address::en::{CityName, CountryName};
use fake::faker::internet::en::{DomainSuffix, Password, SafeEmail, Username, IPv4};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Map, Value};
use tracing::warn;

use super::context::GenerationContext;
use super::error::GenerationResult;
use super::resolver::{ResolvedSchema, SchemaResolver};
use crate::domain::{Schema, SchemaNode, SchemaType};

/// Width of the range used when a numeric schema leaves one or both bounds open.
const OPEN_RANGE_SPAN: f64 = 1000.0;
const DEFAULT_DECIMAL_PLACES: u32 = 2;
const RECENT_PAST_SECONDS: i64 = 90 * 24 * 60 * 60;

/// Walks schemas of one document and produces mock JSON for them.
pub struct MockSynthesizer<'a, 'c> {
    pub(super) resolver: &'c SchemaResolver<'a>,
    pub(super) ctx: &'c mut GenerationContext,
}

impl<'a, 'c> MockSynthesizer<'a, 'c> {
    pub fn new(resolver: &'c SchemaResolver<'a>, ctx: &'c mut GenerationContext) -> Self {
        Self { resolver, ctx }
    }

    /// Mock value for `node`, which may still be a `$ref`. `field` is the
    /// property name the value is generated for.
    pub fn value(&mut self, node: &'a SchemaNode, field: &str, depth: usize) -> GenerationResult<Value> {
        let resolved = self.resolver.resolve(node)?;
        self.resolved_value(resolved, field, depth)
    }

    pub fn resolved_value(
        &mut self,
        resolved: ResolvedSchema<'a>,
        field: &str,
        depth: usize,
    ) -> GenerationResult<Value> {
        let schema = resolved.schema;
        if schema.uses_composition() {
            warn!(field, "allOf/oneOf/anyOf are not supported, ignoring composition");
        }

        let schema_type = schema.effective_type();
        if !matches!(schema_type, Some(SchemaType::Array | SchemaType::Object)) {
            if let Some(choice) = schema.enum_values.choose(&mut self.ctx.rng) {
                return Ok(choice.clone());
            }
        }

        match schema_type {
            Some(SchemaType::String) => Ok(Value::String(self.string(schema, field))),
            Some(SchemaType::Number | SchemaType::Integer) => Ok(self.number(schema)),
            Some(SchemaType::Boolean) => Ok(Value::Bool(self.ctx.rng.gen_bool(0.5))),
            Some(SchemaType::Array) => self.array(schema, field, depth),
            Some(SchemaType::Object) => {
                if depth > self.ctx.options().max_depth {
                    return Ok(Value::Object(Map::new()));
                }
                self.item(resolved, field, depth)
            }
            other => {
                warn!(field, schema_type = ?other, "Unsupported schema type, generating null");
                Ok(Value::Null)
            }
        }
    }

    fn string(&mut self, schema: &Schema, field: &str) -> String {
        let rng = &mut self.ctx.rng;
        let Some(format) = schema.format.as_deref() else {
            if field == "id" {
                return random_uuid(rng);
            }
            return field_hint(field, rng).unwrap_or_else(|| Word().fake_with_rng(rng));
        };

        match format.to_ascii_lowercase().as_str() {
            "uuid" => random_uuid(rng),
            "date-time" => recent_timestamp(rng).to_rfc3339(),
            "date" => recent_timestamp(rng).format("%Y-%m-%d").to_string(),
            "email" => SafeEmail().fake_with_rng(rng),
            "uri" | "url" => {
                let host: String = Word().fake_with_rng(rng);
                let suffix: String = DomainSuffix().fake_with_rng(rng);
                let path: String = Word().fake_with_rng(rng);
                format!("https://{}.{}/{}", host, suffix, path)
            }
            "hostname" => {
                let host: String = Word().fake_with_rng(rng);
                let suffix: String = DomainSuffix().fake_with_rng(rng);
                format!("{}.{}", host, suffix)
            }
            "ipv4" => IPv4().fake_with_rng(rng),
            "password" => Password(8..16).fake_with_rng(rng),
            "byte" => {
                let token: String = Word().fake_with_rng(rng);
                STANDARD.encode(token)
            }
            _ => Word().fake_with_rng(rng),
        }
    }

    fn number(&mut self, schema: &Schema) -> Value {
        let (mut min, mut max) = numeric_bounds(schema);
        if min > max {
            warn!(minimum = min, maximum = max, "Numeric bounds are inverted, swapping them");
            std::mem::swap(&mut min, &mut max);
        }
        let rng = &mut self.ctx.rng;

        if schema.has_format("float") || schema.has_format("double") {
            let places = schema
                .multiple_of
                .map(decimal_places)
                .unwrap_or(DEFAULT_DECIMAL_PLACES);
            let raw = if min < max { rng.gen_range(min..=max) } else { min };
            let scale = 10f64.powi(places as i32);
            return json!(((raw * scale).round() / scale).clamp(min, max));
        }

        let low = min.ceil() as i64;
        let high = max.floor() as i64;
        if low > high {
            warn!(minimum = min, maximum = max, "No integer within numeric bounds, using minimum");
            return json!(min);
        }
        if low == high {
            return json!(low);
        }
        json!(rng.gen_range(low..=high))
    }

    fn array(&mut self, schema: &'a Schema, field: &str, depth: usize) -> GenerationResult<Value> {
        let items = match schema.items.as_deref() {
            Some(SchemaNode::Inline(inner)) if inner.is_empty() => None,
            other => other,
        };
        let Some(items) = items else {
            return Ok(Value::Array(Vec::new()));
        };
        if depth > self.ctx.options().max_depth {
            return Ok(Value::Array(Vec::new()));
        }

        let options = self.ctx.options();
        let (min, max) = (options.array_min_items, options.array_max_items);
        let count = if min < max { self.ctx.rng.gen_range(min..=max) } else { max };

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.value(items, field, depth + 1)?);
        }
        Ok(Value::Array(values))
    }
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

fn recent_timestamp<R: Rng + ?Sized>(rng: &mut R) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::seconds(rng.gen_range(0..RECENT_PAST_SECONDS))
}

/// Faker output for property names that describe a person or place.
fn field_hint<R: Rng + ?Sized>(field: &str, rng: &mut R) -> Option<String> {
    let value = match field.to_ascii_lowercase().as_str() {
        "name" => Name().fake_with_rng(rng),
        "firstname" | "first_name" => FirstName().fake_with_rng(rng),
        "lastname" | "last_name" => LastName().fake_with_rng(rng),
        "username" => Username().fake_with_rng(rng),
        "email" => SafeEmail().fake_with_rng(rng),
        "phone" => PhoneNumber().fake_with_rng(rng),
        "city" => CityName().fake_with_rng(rng),
        "country" => CountryName().fake_with_rng(rng),
        "title" => Sentence(1..4).fake_with_rng(rng),
        "description" => Sentence(3..8).fake_with_rng(rng),
        _ => return None,
    };
    Some(value)
}

fn numeric_bounds(schema: &Schema) -> (f64, f64) {
    match (schema.minimum, schema.maximum) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, min + OPEN_RANGE_SPAN),
        (None, Some(max)) if max < 0.0 => (max - OPEN_RANGE_SPAN, max),
        (None, Some(max)) => (0.0, max),
        (None, None) => (0.0, OPEN_RANGE_SPAN),
    }
}

/// Decimal places in `multipleOf`: `0.01` → 2, `5` → 0.
fn decimal_places(step: f64) -> u32 {
    let text = step.abs().to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len() as u32,
        None => 0,
    }
}
