use serde::{Deserialize, Serialize};

use super::{FieldValue, Fields, from_object, parse_object};
use crate::error::ContractError;

/// Body for `POST register` / `POST login`. An unset password is left off
/// the wire entirely; `Some("")` is sent as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }
}

/// Result of a register/login call. The endpoint picks the schema, so the
/// variant is chosen from the keys present in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthOutcome {
    /// `/register` returns `id` and `token`; `/login` only `token`.
    Success { id: Option<i64>, token: String },
    Failure { error: String },
}

#[derive(Deserialize)]
struct SuccessBody {
    #[serde(default)]
    id: Option<i64>,
    token: String,
}

#[derive(Deserialize)]
struct FailureBody {
    error: String,
}

impl AuthOutcome {
    /// `token` routes to `Success`, otherwise `error` routes to `Failure`.
    pub fn decode(body: &str) -> Result<Self, ContractError> {
        let object = parse_object(body)?;

        if object.contains_key("token") {
            let success: SuccessBody = from_object(object, body)?;
            return Ok(AuthOutcome::Success {
                id: success.id,
                token: success.token,
            });
        }

        if object.contains_key("error") {
            let failure: FailureBody = from_object(object, body)?;
            return Ok(AuthOutcome::Failure {
                error: failure.error,
            });
        }

        Err(ContractError::UnrecognizedAuthShape {
            keys: object.keys().cloned().collect(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            AuthOutcome::Success { .. } => "auth success",
            AuthOutcome::Failure { .. } => "auth failure",
        }
    }
}

impl Fields for AuthOutcome {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match (self, name) {
            (AuthOutcome::Success { id, .. }, "id") => id.map(FieldValue::Int),
            (AuthOutcome::Success { token, .. }, "token") => Some(FieldValue::Text(token)),
            (AuthOutcome::Failure { error }, "error") => Some(FieldValue::Text(error)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn missing_password_is_never_serialized() {
        let credentials = Credentials::email_only("sydney@fife");
        let wire = serde_json::to_value(&credentials).unwrap();

        assert_eq!(wire, json!({ "email": "sydney@fife" }));
        assert!(!serde_json::to_string(&credentials).unwrap().contains("password"));
    }

    #[test]
    fn empty_password_is_not_omission() {
        let credentials = Credentials::new("sydney@fife", "");
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({ "email": "sydney@fife", "password": "" })
        );
    }

    fn success(id: Option<i64>, token: &str) -> AuthOutcome {
        AuthOutcome::Success {
            id,
            token: token.to_string(),
        }
    }

    #[rstest]
    #[case(r#"{"id": 4, "token": "QpwL5tke4Pnpja7X4"}"#, success(Some(4), "QpwL5tke4Pnpja7X4"))]
    #[case(r#"{"token": "QpwL5tke4Pnpja7X4"}"#, success(None, "QpwL5tke4Pnpja7X4"))]
    #[case(
        r#"{"error": "Missing password"}"#,
        AuthOutcome::Failure { error: "Missing password".into() }
    )]
    #[case(r#"{"token": "abc", "error": "ignored"}"#, success(None, "abc"))]
    fn routes_on_discriminator_key(#[case] body: &str, #[case] expected: AuthOutcome) {
        assert_eq!(AuthOutcome::decode(body).unwrap(), expected);
    }

    #[test]
    fn neither_key_is_unrecognized() {
        let err = AuthOutcome::decode(r#"{"id": 4, "message": "ok"}"#).unwrap_err();
        match err {
            ContractError::UnrecognizedAuthShape { keys } => {
                assert!(keys.contains(&"id".to_string()));
                assert!(keys.contains(&"message".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_object_is_unrecognized() {
        let err = AuthOutcome::decode("{}").unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnrecognizedAuthShape { ref keys } if keys.is_empty()
        ));
    }

    #[test]
    fn non_string_token_is_malformed() {
        let err = AuthOutcome::decode(r#"{"token": 42}"#).unwrap_err();
        assert!(matches!(err, ContractError::MalformedPayload { .. }));
    }

    #[test]
    fn fields_depend_on_variant() {
        let failure = AuthOutcome::Failure {
            error: "Missing password".into(),
        };
        assert_eq!(failure.field("error"), Some(FieldValue::Text("Missing password")));
        assert_eq!(failure.field("token"), None);
    }
}
