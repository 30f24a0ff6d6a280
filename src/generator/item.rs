//! Whole records for object schemas.

use serde_json::{Map, Value};
use tracing::warn;

use super::error::GenerationResult;
use super::resolver::ResolvedSchema;
use super::value::MockSynthesizer;
use crate::domain::{identifier_text, SchemaNode, SchemaType};

impl<'a, 'c> MockSynthesizer<'a, 'c> {
    /// One record for an object schema. `resource` names the record when the
    /// schema was not reached through a named definition.
    ///
    /// Properties that look like references to another resource reuse one of
    /// that resource's identifiers from earlier in the pass. The record's own
    /// identifier is registered under its defining name.
    pub fn item(
        &mut self,
        resolved: ResolvedSchema<'a>,
        resource: &str,
        depth: usize,
    ) -> GenerationResult<Value> {
        let schema = resolved.schema;
        if schema.effective_type() != Some(SchemaType::Object) || schema.properties.is_empty() {
            warn!(resource, "Object schema declares no properties, generating empty object");
            return Ok(Value::Object(Map::new()));
        }

        let owner = resolved.name.unwrap_or(resource);
        let id_field = self.ctx.id_field(owner, schema);

        let mut record = Map::with_capacity(schema.properties.len());
        for (name, node) in &schema.properties {
            let value = match self.linked_id(name, node, &id_field)? {
                Some(id) => id,
                None => self.value(node, name, depth + 1)?,
            };
            record.insert(name.clone(), value);
        }

        if let Some(id) = record.get(&id_field) {
            if identifier_text(id).is_some() {
                self.ctx.record_id(owner, id.clone());
            }
        }

        Ok(Value::Object(record))
    }

    fn linked_id(
        &mut self,
        field: &str,
        node: &'a SchemaNode,
        id_field: &str,
    ) -> GenerationResult<Option<Value>> {
        if field == id_field {
            return Ok(None);
        }
        let Some(target) = self.ctx.foreign_key_target(field) else {
            return Ok(None);
        };
        let schema = self.resolver.resolve(node)?.schema;
        if schema.effective_type() != Some(SchemaType::String) || schema.has_format("uuid") {
            return Ok(None);
        }
        Ok(self.ctx.pick_linked_id(&target))
    }
}
