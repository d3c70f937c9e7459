//! Field-level validation of loosely-typed client input.
//!
//! Request bodies arrive as JSON where numbers may be sent either as JSON
//! numbers or as numeric strings. A [`Validator`] reads each field, records
//! every failure (it never stops at the first one) and hands back typed
//! values for the fields that passed.

use serde::Serialize;
use serde_json::Value;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// The value the client supplied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Itemized list of field failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>, value: Option<&Value>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
            value: value.cloned(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Names of the rejected fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, e) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Collects field failures while extracting typed values.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required string, non-empty after trimming. Returns the trimmed text.
    pub fn text(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                self.errors.push(field, "must not be empty", value);
                None
            }
            Some(other) => {
                self.errors.push(field, "must be a string", Some(other));
                None
            }
        }
    }

    /// Required finite number, given as a JSON number or a numeric string.
    pub fn number(&mut self, field: &str, value: Option<&Value>) -> Option<f64> {
        match value.and_then(parse_number) {
            Some(n) => Some(n),
            None => {
                self.errors.push(field, "must be numeric", value);
                None
            }
        }
    }

    /// Required integer, given as a JSON integer or an integer string.
    pub fn integer(&mut self, field: &str, value: Option<&Value>) -> Option<i64> {
        match value.and_then(parse_integer) {
            Some(n) => Some(n),
            None => {
                self.errors.push(field, "must be an integer", value);
                None
            }
        }
    }

    /// Required integer strictly greater than `bound`.
    pub fn integer_greater_than(&mut self, field: &str, value: Option<&Value>, bound: i64) -> Option<i64> {
        match value.and_then(parse_integer) {
            Some(n) if n > bound => Some(n),
            _ => {
                self.errors
                    .push(field, format!("must be an integer greater than {bound}"), value);
                None
            }
        }
    }

    /// Record a failure found outside the typed readers (e.g. a range rule).
    pub fn reject(&mut self, field: &str, message: impl Into<String>, value: Option<&Value>) {
        self.errors.push(field, message, value);
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
