//! Error types for mock data generation

use thiserror::Error;

/// Errors that abort a generation pass for one document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A `$ref` names a definition the document does not declare
    #[error("Schema not found: '{0}'")]
    SchemaNotFound(String),

    /// A `$ref` points outside the document's definition namespace
    #[error("Unsupported reference format: '{0}'")]
    UnsupportedReferenceFormat(String),

    /// A chain of `$ref`s loops back on itself
    #[error("Cyclic reference: {}", .0.join(" -> "))]
    CyclicReference(Vec<String>),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
