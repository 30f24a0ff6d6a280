use serde_json::Value;

pub mod document;
pub mod naming;
pub mod schema;

pub use document::{ApiDocument, Operation, PathItem, RefNamespace, SpecDocument};
pub use schema::{Schema, SchemaNode, SchemaType};

/// Text form of an identifier value, as compared against path segments.
///
/// Returns `None` for values that cannot act as an identifier: null, empty
/// strings, arrays and objects.
pub fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
