//! Mock data generation from API document schemas
//!
//! - `resolver`: `$ref` resolution with cycle detection
//! - `value`: mock values per schema type and format
//! - `item`: whole records, with foreign-key-looking fields linked to earlier records
//! - `assembler`: per-document datasets keyed by resource name
//!
//! Identifier and foreign-key detection are naming heuristics and can be
//! replaced through [`IdFieldStrategy`] and [`ForeignKeyStrategy`].

mod assembler;
mod context;
mod error;
mod id_field;
mod item;
mod registry;
mod resolver;
mod value;

#[cfg(test)]
mod generator_test;

pub use assembler::{Dataset, DatasetAssembler, ResourceSet};
pub use context::{
    GenerationContext, GeneratorOptions, DEFAULT_ARRAY_MAX_ITEMS, DEFAULT_ARRAY_MIN_ITEMS,
    DEFAULT_ITEMS_PER_RESOURCE, DEFAULT_MAX_DEPTH,
};
pub use error::{GenerationError, GenerationResult};
pub use id_field::{
    ConventionalForeignKey, ConventionalIdField, ForeignKeyStrategy, IdFieldStrategy,
    OverrideIdField,
};
pub use registry::IdRegistry;
pub use resolver::{ResolvedSchema, SchemaResolver};
pub use value::MockSynthesizer;
