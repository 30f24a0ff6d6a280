//! `$ref` resolution against a document's named definitions.

use indexmap::IndexMap;

use super::error::{GenerationError, GenerationResult};
use crate::domain::{ApiDocument, RefNamespace, Schema, SchemaNode};

/// A fully dereferenced schema, with the name of the definition it came from
/// when it was reached through (or declared as) a named definition.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSchema<'a> {
    pub name: Option<&'a str>,
    pub schema: &'a Schema,
}

pub struct SchemaResolver<'a> {
    definitions: &'a IndexMap<String, SchemaNode>,
    namespace: RefNamespace,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(definitions: &'a IndexMap<String, SchemaNode>, namespace: RefNamespace) -> Self {
        Self {
            definitions,
            namespace,
        }
    }

    pub fn for_document(document: &'a ApiDocument) -> Self {
        Self::new(document.schemas(), document.ref_namespace())
    }

    /// Follow `node` through any chain of references to an inline definition.
    pub fn resolve(&self, node: &'a SchemaNode) -> GenerationResult<ResolvedSchema<'a>> {
        let mut chain: Vec<String> = Vec::new();
        let mut name = None;
        let mut current = node;

        loop {
            match current {
                SchemaNode::Inline(schema) => {
                    return Ok(ResolvedSchema {
                        name,
                        schema: schema.as_ref(),
                    })
                }
                SchemaNode::Reference { reference } => {
                    let target = self.target_name(reference)?;
                    if chain.contains(&target) {
                        chain.push(target);
                        return Err(GenerationError::CyclicReference(chain));
                    }
                    let (key, next) = self
                        .definitions
                        .get_key_value(target.as_str())
                        .ok_or_else(|| GenerationError::SchemaNotFound(target.clone()))?;
                    chain.push(target);
                    name = Some(key.as_str());
                    current = next;
                }
            }
        }
    }

    /// Resolve the definition declared under `name`.
    pub fn resolve_definition(&self, name: &str) -> GenerationResult<ResolvedSchema<'a>> {
        let (key, node) = self
            .definitions
            .get_key_value(name)
            .ok_or_else(|| GenerationError::SchemaNotFound(name.to_string()))?;
        let resolved = self.resolve(node)?;
        Ok(ResolvedSchema {
            name: resolved.name.or(Some(key.as_str())),
            schema: resolved.schema,
        })
    }

    fn target_name(&self, reference: &str) -> GenerationResult<String> {
        let unsupported = || GenerationError::UnsupportedReferenceFormat(reference.to_string());
        let raw = reference
            .strip_prefix(self.namespace.prefix())
            .ok_or_else(unsupported)?;
        if raw.is_empty() || raw.contains('/') {
            return Err(unsupported());
        }
        Ok(decode_pointer_segment(raw))
    }
}

/// Decodes a JSON Pointer segment (`~1` → `/`, `~0` → `~`).
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
