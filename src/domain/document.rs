//! Parsed API documents (Swagger 2.0 and OpenAPI 3.x).
//!
//! Only the parts needed to synthesize mock data are modelled: the named
//! schema definitions and, per path, the operations that carry a request body.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::schema::SchemaNode;

/// The one `$ref` namespace a document's definitions live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefNamespace {
    /// Swagger 2.0: `#/definitions/{name}`
    Definitions,
    /// OpenAPI 3.x: `#/components/schemas/{name}`
    ComponentSchemas,
}

impl RefNamespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Definitions => "#/definitions/",
            Self::ComponentSchemas => "#/components/schemas/",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDocument {
    /// Version marker; YAML may hand it over as a number (`swagger: 2.0`).
    #[serde(default)]
    pub swagger: Option<Value>,
    #[serde(default)]
    pub openapi: Option<Value>,
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaNode>,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub request_body: Option<RequestBody>,
}

/// Operation parameter. Every field is optional so `$ref` parameters still parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "in", default)]
    pub location: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

impl ApiDocument {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn ref_namespace(&self) -> RefNamespace {
        if self.swagger.is_some() || (self.openapi.is_none() && !self.definitions.is_empty()) {
            RefNamespace::Definitions
        } else {
            RefNamespace::ComponentSchemas
        }
    }

    /// Named schema definitions, in declaration order.
    pub fn schemas(&self) -> &IndexMap<String, SchemaNode> {
        match self.ref_namespace() {
            RefNamespace::Definitions => &self.definitions,
            RefNamespace::ComponentSchemas => &self.components.schemas,
        }
    }
}

impl PathItem {
    /// Declared operations with their HTTP method, in a fixed method order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

impl Operation {
    /// Schema of the request body, from a Swagger `in: body` parameter or an
    /// OpenAPI `requestBody` (JSON media types preferred).
    pub fn request_schema(&self) -> Option<&SchemaNode> {
        if let Some(schema) = self
            .parameters
            .iter()
            .find(|p| p.location.as_deref() == Some("body"))
            .and_then(|p| p.schema.as_ref())
        {
            return Some(schema);
        }

        let content = &self.request_body.as_ref()?.content;
        content
            .get("application/json")
            .or_else(|| {
                content
                    .iter()
                    .find(|(media, _)| media.contains("json"))
                    .map(|(_, m)| m)
            })
            .or_else(|| content.values().next())
            .and_then(|m| m.schema.as_ref())
    }
}

/// An API document together with the name its dataset is stored under.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    pub name: String,
    pub document: ApiDocument,
}

impl SpecDocument {
    pub fn new(name: impl Into<String>, document: ApiDocument) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }
}
