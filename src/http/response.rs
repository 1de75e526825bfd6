use std::str;

use crate::error::ContractError;
use crate::model::malformed;

/// Terminal outcome of one HTTP exchange, as handed to the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    pub status: u16,
    /// Raw body bytes, exactly as received.
    pub body: Vec<u8>,
    pub duration_ms: u64,
}

impl HttpOutcome {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as UTF-8 text. Invalid bytes are a malformed payload, never
    /// silently replaced.
    pub fn text(&self) -> Result<&str, ContractError> {
        str::from_utf8(&self.body).map_err(|err| {
            malformed(
                format!("response body is not valid UTF-8: {err}"),
                &String::from_utf8_lossy(&self.body),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_borrows_valid_utf8() {
        let outcome = HttpOutcome::new(200, r#"{"name": "fuchsia rose"}"#);
        assert_eq!(outcome.text().unwrap(), r#"{"name": "fuchsia rose"}"#);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let outcome = HttpOutcome::new(200, b"{\"name\": \"\xff\xfe\"}".to_vec());

        match outcome.text().unwrap_err() {
            ContractError::MalformedPayload { reason, snippet } => {
                assert!(reason.starts_with("response body is not valid UTF-8"));
                assert!(snippet.contains('\u{FFFD}'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn success_covers_the_2xx_range() {
        assert!(HttpOutcome::new(200, "").is_success());
        assert!(HttpOutcome::new(204, "").is_success());
        assert!(!HttpOutcome::new(404, "{}").is_success());
        assert!(!HttpOutcome::new(301, "").is_success());
    }
}
