use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Key under which the store exposes a document's identity
pub const ID_FIELD: &str = "_id";

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// A validated catalog entry (movie or series)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    /// Display title
    pub name: String,
    /// "movie" or "series"; not restricted to those values
    #[serde(rename = "type")]
    pub kind: String,
    /// Release year
    pub year: Option<i64>,
    /// Average rating between 0 and 10
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    /// Short synopsis
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    /// Thumbnail for rows
    pub thumb_url: Option<String>,
    pub mature: bool,
}

/// A single field-level problem found while validating a stored document
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Title {
    /// Converts a raw store document into a `Title`.
    ///
    /// The store identity is dropped and unknown fields are ignored. Every
    /// violation in the document is reported, not just the first one.
    pub fn from_document(document: Value) -> Result<Self, Vec<FieldViolation>> {
        let Value::Object(mut fields) = document else {
            return Err(vec![FieldViolation::new("$", "expected a document object")]);
        };
        fields.remove(ID_FIELD);

        let mut violations = Vec::new();

        let name = required_text(&fields, "name", &mut violations);
        let kind = required_text(&fields, "type", &mut violations);
        let year = optional_integer(&fields, "year", &mut violations);
        let rating = optional_rating(&fields, &mut violations);
        let genres = genres(&fields, &mut violations);
        let description = optional_text(&fields, "description", &mut violations);
        let poster_url = optional_text(&fields, "poster_url", &mut violations);
        let backdrop_url = optional_text(&fields, "backdrop_url", &mut violations);
        let thumb_url = optional_text(&fields, "thumb_url", &mut violations);
        let mature = flag(&fields, "mature", &mut violations);

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Title {
            name: name.unwrap_or_default(),
            kind: kind.unwrap_or_default(),
            year,
            rating,
            genres,
            description,
            poster_url,
            backdrop_url,
            thumb_url,
            mature,
        })
    }

    /// Serializes the title into the document shape the store persists
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Absent and explicit `null` are treated the same
fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|value| !value.is_null())
}

fn required_text(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match present(fields, field) {
        None => {
            violations.push(FieldViolation::new(field, "field required"));
            None
        }
        Some(Value::String(text)) if text.is_empty() => {
            violations.push(FieldViolation::new(field, "must not be empty"));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(FieldViolation::new(field, "expected a string"));
            None
        }
    }
}

fn optional_text(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match present(fields, field)? {
        Value::String(text) => Some(text.clone()),
        _ => {
            violations.push(FieldViolation::new(field, "expected a string"));
            None
        }
    }
}

fn optional_integer(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let value = present(fields, field)?;
    let integer = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64)
            .map(|n| n as i64)
    });

    if integer.is_none() {
        violations.push(FieldViolation::new(field, "expected an integer"));
    }
    integer
}

fn optional_rating(
    fields: &Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    let value = present(fields, "rating")?;
    match value.as_f64() {
        Some(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => Some(rating),
        Some(_) => {
            violations.push(FieldViolation::new(
                "rating",
                format!("must be between {} and {}", MIN_RATING, MAX_RATING),
            ));
            None
        }
        None => {
            violations.push(FieldViolation::new("rating", "expected a number"));
            None
        }
    }
}

fn genres(fields: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> Vec<String> {
    let Some(value) = present(fields, "genres") else {
        return Vec::new();
    };

    let parsed = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
    });

    parsed.unwrap_or_else(|| {
        violations.push(FieldViolation::new("genres", "expected a list of strings"));
        Vec::new()
    })
}

fn flag(fields: &Map<String, Value>, field: &str, violations: &mut Vec<FieldViolation>) -> bool {
    match present(fields, field) {
        None => false,
        Some(Value::Bool(value)) => *value,
        Some(_) => {
            violations.push(FieldViolation::new(field, "expected a boolean"));
            false
        }
    }
}
