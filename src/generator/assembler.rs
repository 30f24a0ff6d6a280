//! Dataset assembly across a set of API documents.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, error, info};

use super::context::GenerationContext;
use super::error::GenerationResult;
use super::resolver::{ResolvedSchema, SchemaResolver};
use super::value::MockSynthesizer;
use crate::domain::naming::{path_resource, resource_name};
use crate::domain::{identifier_text, ApiDocument, SchemaType, SpecDocument};

/// Records of one document, keyed by resource name (`users`, `posts`, ...).
pub type ResourceSet = IndexMap<String, Vec<Value>>;

/// Records of every document, keyed by spec name.
pub type Dataset = IndexMap<String, ResourceSet>;

pub struct DatasetAssembler {
    ctx: GenerationContext,
    id_fields: IndexMap<String, String>,
}

impl DatasetAssembler {
    pub fn new(ctx: GenerationContext) -> Self {
        Self {
            ctx,
            id_fields: IndexMap::new(),
        }
    }

    /// Identifier field chosen for each generated resource.
    pub fn id_fields(&self) -> &IndexMap<String, String> {
        &self.id_fields
    }

    /// Generate records for every document. A document that fails to
    /// generate is logged and left out; the others still make it in.
    pub fn assemble(&mut self, documents: &[SpecDocument]) -> Dataset {
        let mut dataset = Dataset::new();
        for spec in documents {
            match self.assemble_document(&spec.document) {
                Ok(resources) => {
                    info!(spec = %spec.name, resources = resources.len(), "Generated mock data");
                    dataset.insert(spec.name.clone(), resources);
                }
                Err(e) => error!(spec = %spec.name, "Failed to generate mock data: {}", e),
            }
        }
        dataset
    }

    /// Generate records for one document.
    ///
    /// Every object definition becomes a resource. Request bodies of path
    /// operations fill resources that the definitions left empty. Resources
    /// that end up with no records are dropped.
    pub fn assemble_document(&mut self, document: &ApiDocument) -> GenerationResult<ResourceSet> {
        self.ctx.reset_registry();
        let resolver = SchemaResolver::for_document(document);
        let mut resources = ResourceSet::new();
        let mut id_fields = IndexMap::new();

        for name in document.schemas().keys() {
            let resolved = resolver.resolve_definition(name)?;
            if resolved.schema.effective_type() != Some(SchemaType::Object) {
                continue;
            }
            let resource = resource_name(name);
            let (records, id_field) = self.fill(&resolver, resolved, &resource)?;
            id_fields.insert(resource.clone(), id_field);
            resources.insert(resource, records);
        }

        for (path, item) in &document.paths {
            let Some(resource) = path_resource(path) else {
                continue;
            };
            for (_, operation) in item.operations() {
                let Some(node) = operation.request_schema() else {
                    continue;
                };
                if resources.get(&resource).is_some_and(|records| !records.is_empty()) {
                    continue;
                }
                let resolved = resolver.resolve(node)?;
                if resolved.schema.effective_type() != Some(SchemaType::Object) {
                    continue;
                }
                let (records, id_field) = self.fill(&resolver, resolved, &resource)?;
                id_fields.insert(resource.clone(), id_field);
                resources.insert(resource.clone(), records);
            }
        }

        resources.retain(|_, records| !records.is_empty());
        id_fields.retain(|resource, _| resources.contains_key(resource));
        self.id_fields.extend(id_fields);
        Ok(resources)
    }

    /// Up to `items_per_resource` records with distinct identifiers, and the
    /// identifier field they are keyed by. Empty records and records without
    /// an identifier value are not kept.
    fn fill<'a>(
        &mut self,
        resolver: &SchemaResolver<'a>,
        resolved: ResolvedSchema<'a>,
        resource: &str,
    ) -> GenerationResult<(Vec<Value>, String)> {
        let owner = resolved.name.unwrap_or(resource);
        let id_field = self.ctx.id_field(owner, resolved.schema);
        let attempts = self.ctx.options().items_per_resource;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(attempts);
        let mut synthesizer = MockSynthesizer::new(resolver, &mut self.ctx);
        for _ in 0..attempts {
            let record = synthesizer.item(resolved, resource, 0)?;
            if record.as_object().is_some_and(|fields| fields.is_empty()) {
                continue;
            }
            let Some(id) = record.get(&id_field).and_then(identifier_text) else {
                debug!(resource, field = %id_field, "Discarding record without identifier");
                continue;
            };
            if !seen.insert(id) {
                debug!(resource, field = %id_field, "Discarding record with duplicate identifier");
                continue;
            }
            records.push(record);
        }

        info!(resource, count = records.len(), "Generated resource");
        Ok((records, id_field))
    }
}
