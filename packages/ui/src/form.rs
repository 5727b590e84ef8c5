//! # Form builder and required-field validation
//!
//! A [`DocumentForm`] is generated from exactly one template's placeholder list:
//! one field per placeholder, in order, plus the chosen output format. It holds
//! the values the user typed, so validation and multipart packaging are plain
//! functions over data and never touch the DOM.
//!
//! Validation mirrors what the browser form would enforce: every input that is
//! not hidden, radio or checkbox, and every textarea, must have non-empty
//! trimmed content. It is advisory; the server decides what it accepts.

use api::{ApiError, Template};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out all required fields.";

/// Turn a placeholder name into a human label: underscores become spaces and
/// the first letter of every word is upper-cased (`client_name` → `Client Name`).
pub fn field_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Kind of control a field is rendered as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
    Textarea,
    Hidden,
    Radio,
    Checkbox,
}

impl InputKind {
    /// Whether an empty value blocks submission.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Text | Self::Date | Self::Textarea)
    }

    /// Value for the `type` attribute of an `input` element.
    pub fn html_type(self) -> &'static str {
        match self {
            Self::Text | Self::Textarea => "text",
            Self::Date => "date",
            Self::Hidden => "hidden",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    /// Hint text shown while the field is empty.
    pub placeholder: String,
    pub value: String,
}

impl FormField {
    /// DOM id of the rendered control.
    pub fn dom_id(&self) -> String {
        dom_id(&self.name)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

pub fn dom_id(field_name: &str) -> String {
    format!("field-{field_name}")
}

/// Fields that failed validation, in form order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationFailure {
    pub invalid: Vec<String>,
}

impl ValidationFailure {
    /// The field that should receive focus.
    pub fn first_invalid(&self) -> Option<&str> {
        self.invalid.first().map(String::as_str)
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(_: ValidationFailure) -> Self {
        ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }
}

/// Form instance for one template.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentForm {
    pub template_id: u64,
    pub title: String,
    pub fields: Vec<FormField>,
    pub format: String,
}

impl DocumentForm {
    pub fn from_template(template: &Template, default_format: &str) -> Self {
        let fields = template
            .placeholders
            .iter()
            .map(|p| FormField {
                name: p.name.clone(),
                label: field_label(&p.name),
                kind: if p.kind.is_date() {
                    InputKind::Date
                } else {
                    InputKind::Text
                },
                placeholder: p.example.clone().unwrap_or_default(),
                value: String::new(),
            })
            .collect();

        Self {
            template_id: template.id,
            title: template.name.clone(),
            fields,
            format: default_format.to_string(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Update a field's value. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.into();
        }
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let invalid: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.kind.is_required() && f.is_blank())
            .map(|f| f.name.clone())
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { invalid })
        }
    }

    /// Name/value pairs as a browser would serialise the form, without the
    /// format (the gateway call appends it).
    pub fn multipart_fields(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|f| !matches!(f.kind, InputKind::Radio | InputKind::Checkbox))
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}
