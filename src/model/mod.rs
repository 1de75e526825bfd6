//! Typed shapes for every payload the reqres API sends or accepts.
//!
//! Decoding goes through [`decode_object`], which insists on a top-level JSON
//! object before handing the document to the shape's `serde` derive, so an
//! array or scalar never sneaks into a struct through serde's sequence form.

pub mod auth;
pub mod resource;
pub mod user;

use std::fmt::{self, Display};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ContractError;

pub use auth::{AuthOutcome, Credentials};
pub use resource::{ColorResource, ResourceList, SingleResourceEnvelope, SupportInfo};
pub use user::{MutableUserEdit, SingleUserEnvelope, UserEditEcho, UserList, UserRecord};

const SNIPPET_LIMIT: usize = 120;

/// A single field value borrowed out of a decoded shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => write!(f, "{value:?}"),
        }
    }
}

/// Shapes whose scalar fields can be looked up by their wire name.
pub trait Fields {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

pub(crate) fn pagination_field<'a>(
    name: &str,
    page: Option<u32>,
    per_page: Option<u32>,
    total: Option<u32>,
    total_pages: Option<u32>,
) -> Option<FieldValue<'a>> {
    let value = match name {
        "page" => page,
        "per_page" => per_page,
        "total" => total,
        "total_pages" => total_pages,
        _ => None,
    }?;
    Some(FieldValue::Int(i64::from(value)))
}

/// Parse `body` and require a top-level JSON object.
pub fn parse_object(body: &str) -> Result<Map<String, Value>, ContractError> {
    let value: Value = serde_json::from_str(body).map_err(|err| malformed(err.to_string(), body))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(malformed(
            format!("expected a JSON object, found {}", json_kind(&other)),
            body,
        )),
    }
}

/// Decode `body` into `T`, which must be an object-shaped payload.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, ContractError> {
    let map = parse_object(body)?;
    from_object(map, body)
}

pub(crate) fn from_object<T: DeserializeOwned>(
    map: Map<String, Value>,
    body: &str,
) -> Result<T, ContractError> {
    serde_json::from_value(Value::Object(map)).map_err(|err| malformed(err.to_string(), body))
}

pub(crate) fn malformed(reason: impl Into<String>, body: &str) -> ContractError {
    ContractError::MalformedPayload {
        reason: reason.into(),
        snippet: snippet(body),
    }
}

/// The first characters of `body`, for error messages.
pub fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(SNIPPET_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_rejects_arrays() {
        let err = parse_object("[1, 2]").unwrap_err();
        match err {
            ContractError::MalformedPayload { reason, snippet } => {
                assert_eq!(reason, "expected a JSON object, found an array");
                assert_eq!(snippet, "[1, 2]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_object_rejects_non_json() {
        let body = "<html>502 Bad Gateway</html>";
        let err = parse_object(body).unwrap_err();
        assert!(matches!(
            err,
            ContractError::MalformedPayload { ref snippet, .. } if snippet == body
        ));
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(500);
        let cut = snippet(&body);
        assert_eq!(cut.chars().count(), SNIPPET_LIMIT + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn text_values_display_quoted() {
        assert_eq!(FieldValue::Text("Janet").to_string(), "\"Janet\"");
        assert_eq!(FieldValue::Int(2001).to_string(), "2001");
    }
}
