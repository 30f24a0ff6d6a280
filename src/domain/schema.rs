//! Schema nodes as they appear inside an API document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A schema position in a document: either a definition written in place or a
/// `$ref` pointer to a named definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Box<Schema>),
}

impl SchemaNode {
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference {
            reference: target.into(),
        }
    }

    pub fn inline(schema: Schema) -> Self {
        Self::Inline(Box::new(schema))
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference { reference } => Some(reference),
            Self::Inline(_) => None,
        }
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        Self::inline(schema)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    #[serde(other)]
    Unknown,
}

/// An inline schema definition.
///
/// Only the keywords that drive mock generation are modelled; everything
/// else in the source document is ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Value>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Object schema with the given properties, in declaration order.
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
    {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    pub fn array_of(items: SchemaNode) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Declared type, or the one implied by `properties`/`items` when `type` is omitted.
    pub fn effective_type(&self) -> Option<SchemaType> {
        match self.schema_type {
            Some(t) => Some(t),
            None if !self.properties.is_empty() => Some(SchemaType::Object),
            None if self.items.is_some() => Some(SchemaType::Array),
            None => None,
        }
    }

    pub fn has_format(&self, format: &str) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(format))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn uses_composition(&self) -> bool {
        !(self.all_of.is_empty() && self.one_of.is_empty() && self.any_of.is_empty())
    }
}

/// Accepts `type: "string"` as well as the OpenAPI 3.1 form `type: ["string", "null"]`.
fn deserialize_type<'de, D>(deserializer: D) -> Result<Option<SchemaType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TypeField {
        Single(SchemaType),
        Many(Vec<SchemaType>),
    }

    Ok(match Option::<TypeField>::deserialize(deserializer)? {
        None => None,
        Some(TypeField::Single(t)) => Some(t),
        Some(TypeField::Many(types)) => types.into_iter().find(|t| *t != SchemaType::Null),
    })
}
