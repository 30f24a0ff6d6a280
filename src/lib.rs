//! # apimock - Mock datasets from API documents
//!
//! apimock reads Swagger 2.0 and OpenAPI 3.x documents, synthesizes a small
//! plausible dataset for every resource they describe, and keeps it in a
//! path-addressed JSON document store.
//!
//! ## Features
//!
//! - **Schema-driven generation**: values per type and format, with `$ref`
//!   resolution and cycle detection
//! - **Referential plausibility**: `authorId`-style fields reuse identifiers
//!   generated for the matching resource
//! - **Pluggable heuristics**: identifier and foreign-key detection sit behind traits
//! - **Document store**: `get`/`create`/`update`/`patch`/`delete` by slash path,
//!   persisted as pretty-printed JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apimock::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let dataset = apimock::generate_dataset(&settings).await?;
//!     println!("generated {} specs", dataset.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: document model, schemas and naming rules
//! - **Generator**: resolution, value/record synthesis, dataset assembly
//! - **Store**: the document tree and its backends
//! - **Adapters**: loading documents from disk
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod generator;
pub mod store;

use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::SpecLoader;
use crate::config::Settings;
use crate::generator::{Dataset, DatasetAssembler, GenerationContext};
use crate::store::{DocumentStore, JsonFileBackend};

/// Open the configured dataset file as a document store.
///
/// Collections are matched by the identifier fields detected when the
/// dataset was generated, unless `store.id_fields` names one explicitly.
pub async fn open_store(settings: &Settings) -> anyhow::Result<DocumentStore> {
    let backend = Arc::new(JsonFileBackend::new(&settings.store.path));
    let detected = backend.load_id_fields().await?;
    let options = settings.store.options().with_detected_id_fields(detected);
    Ok(DocumentStore::open(backend, options).await?)
}

/// Generate a dataset from every API document in the spec directory and
/// write it to the configured dataset file, replacing its contents.
pub async fn generate_dataset(settings: &Settings) -> anyhow::Result<Dataset> {
    let documents = SpecLoader::from_settings(&settings.specs).load_all()?;
    if documents.is_empty() {
        warn!(dir = %settings.specs.dir.display(), "No API documents found");
    }

    let mut assembler = DatasetAssembler::new(GenerationContext::from_settings(&settings.generator));
    let dataset = assembler.assemble(&documents);

    let backend = Arc::new(JsonFileBackend::new(&settings.store.path));
    backend.persist_id_fields(assembler.id_fields()).await?;
    let options = settings
        .store
        .options()
        .with_detected_id_fields(assembler.id_fields().clone());
    let store = DocumentStore::new(backend, options);
    store.seed(serde_json::to_value(&dataset)?).await?;

    info!(path = %settings.store.path.display(), specs = dataset.len(), "Dataset written");
    Ok(dataset)
}
