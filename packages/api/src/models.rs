//! # Wire models for the document API
//!
//! Read-only from the client's point of view: templates and their placeholders
//! are owned by the server and only deserialised here. Unknown fields are
//! ignored so the server can grow its serializers without breaking the client.
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`Template`], [`Placeholder`], [`TemplateOwner`] | `GET /api/documents/templates/` |
//! | [`RefreshRequest`] / [`RefreshResponse`] | `POST /api/users/token/refresh/` |
//! | [`SubmitResponse`] | `POST /api/documents/templates/{id}/submit/` |

use serde::{Deserialize, Serialize};

/// A document template with its fillable slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    /// Uploader, when the server exposes it.
    #[serde(default)]
    pub user: Option<TemplateOwner>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// URL of the uploaded source file.
    #[serde(default)]
    pub file: Option<String>,
}

impl Template {
    pub fn field_count(&self) -> usize {
        self.placeholders.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateOwner {
    pub username: String,
}

/// A named, typed slot in a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PlaceholderType,
    /// Sample value shown as the input's placeholder text.
    #[serde(default)]
    pub example: Option<String>,
    /// The literal marker in the source document, e.g. `{{client_name}}`.
    #[serde(default)]
    pub placeholder_text: Option<String>,
}

/// Placeholder type. Anything the client does not special-case is text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderType {
    Date,
    #[default]
    Text,
    #[serde(untagged)]
    Other(String),
}

impl PlaceholderType {
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Body of a submit response; success and failure share one shape.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
