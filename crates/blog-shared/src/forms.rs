//! Submitted forms and their field-level validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const REQUIRED: &str = "This field is required.";
const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// A form echoed back to the renderer together with its errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState<T> {
    pub data: T,
    pub errors: FieldErrors,
}

impl<T> FormState<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: FieldErrors::default(),
        }
    }

    pub fn with_errors(data: T, errors: FieldErrors) -> Self {
        Self { data, errors }
    }
}

/// Comment form posted by a visitor.
///
/// Fields default to empty so a missing field becomes a validation
/// error instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentForm {
    pub const NAME_MAX_CHARS: usize = 80;

    /// Validate and return the trimmed form.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let cleaned = Self {
            name: required_text(&mut errors, "name", &self.name, Some(Self::NAME_MAX_CHARS)),
            email: required_email(&mut errors, "email", &self.email),
            body: required_text(&mut errors, "body", &self.body, None),
        };
        errors.into_result(cleaned)
    }
}

/// "Email this post" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailPostForm {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: String,
}

impl EmailPostForm {
    pub const NAME_MAX_CHARS: usize = 25;

    /// Validate and return the trimmed form. `comments` is optional.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let cleaned = Self {
            name: required_text(&mut errors, "name", &self.name, Some(Self::NAME_MAX_CHARS)),
            email: required_email(&mut errors, "email", &self.email),
            to: required_email(&mut errors, "to", &self.to),
            comments: self.comments.trim().to_string(),
        };
        errors.into_result(cleaned)
    }
}

fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    max_chars: Option<usize>,
) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if let Some(max) = max_chars {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {len})."),
            );
        }
    }
    value.to_string()
}

fn required_email(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if !is_valid_email(value) {
        errors.add(field, INVALID_EMAIL);
    }
    value.to_string()
}

/// Syntactic address check: `local@domain.tld` without spaces or quoting.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c))
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}
