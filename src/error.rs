use thiserror::Error;

use crate::http::TransportError;
use crate::verify::MismatchReport;

/// Everything that can make a contract check fail.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed payload ({reason}): `{snippet}`")]
    MalformedPayload { reason: String, snippet: String },

    #[error(
        "unrecognized auth response shape: neither `token` nor `error` present (keys: [{}])",
        .keys.join(", ")
    )]
    UnrecognizedAuthShape { keys: Vec<String> },

    #[error("status mismatch: expected {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("status {status} contradicts the {shape} body shape")]
    ShapeConflict { status: u16, shape: String },

    #[error("{0}")]
    FieldMismatch(MismatchReport),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{} contract violations: {}", .0.len(), join_errors(.0))]
    Multiple(Vec<ContractError>),
}

fn join_errors(errors: &[ContractError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
