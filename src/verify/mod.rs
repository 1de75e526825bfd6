//! Decode-and-compare: turns an HTTP outcome plus an [`Expectation`] into a
//! [`Verification`].
//!
//! Three things are judged independently and all of them are reported:
//!
//! - the status code against the expected one;
//! - the body against the expected shape, including whether the decoded shape
//!   is consistent with the status that came back (a `200` carrying an auth
//!   failure, a `404` carrying a populated envelope);
//! - each field expectation, with every mismatch gathered into one
//!   [`MismatchReport`].
//!
//! [`verify`] does no I/O and never retries.

pub mod check;
pub mod report;

#[cfg(test)]
mod tests;

pub use check::{Check, FieldExpectation, FieldPath, Literal};
pub use report::{Mismatch, MismatchReport};

use crate::error::ContractError;
use crate::http::HttpOutcome;
use crate::model::{
    AuthOutcome, FieldValue, Fields, ResourceList, SingleResourceEnvelope, SingleUserEnvelope,
    UserEditEcho, UserList, decode_object, malformed,
};

const ABSENT: &str = "<absent>";
const NOT_FOUND: u16 = 404;

/// The response schema a step expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    UserList,
    SingleUser,
    ResourceList,
    SingleResource,
    UserEdit,
    /// `register` / `login`: success or failure schema, picked by key.
    Auth,
    /// A blank body, e.g. `204 No Content`.
    Empty,
}

impl Shape {
    pub fn decode(self, body: &str) -> Result<Decoded, ContractError> {
        let decoded = match self {
            Shape::UserList => Decoded::UserList(decode_object(body)?),
            Shape::SingleUser => Decoded::SingleUser(decode_object(body)?),
            Shape::ResourceList => Decoded::ResourceList(decode_object(body)?),
            Shape::SingleResource => Decoded::SingleResource(decode_object(body)?),
            Shape::UserEdit => Decoded::UserEdit(decode_object(body)?),
            Shape::Auth => Decoded::Auth(AuthOutcome::decode(body)?),
            Shape::Empty => {
                if !body.trim().is_empty() {
                    return Err(malformed("expected an empty body", body));
                }
                Decoded::Empty
            }
        };
        Ok(decoded)
    }
}

/// A successfully decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    UserList(UserList),
    SingleUser(SingleUserEnvelope),
    ResourceList(ResourceList),
    SingleResource(SingleResourceEnvelope),
    UserEdit(UserEditEcho),
    Auth(AuthOutcome),
    Empty,
}

impl Decoded {
    pub fn lookup(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        match (self, path) {
            (Decoded::UserList(list), FieldPath::Item(index, name)) => {
                list.data.get(*index)?.field(name)
            }
            (Decoded::UserList(list), FieldPath::Top(name)) => list.field(name),
            (Decoded::ResourceList(list), FieldPath::Item(index, name)) => {
                list.data.get(*index)?.field(name)
            }
            (Decoded::ResourceList(list), FieldPath::Top(name)) => list.field(name),
            (Decoded::SingleUser(envelope), FieldPath::Data(name)) => {
                envelope.data.as_ref()?.field(name)
            }
            (Decoded::SingleUser(envelope), FieldPath::Support(name)) => {
                envelope.support.as_ref()?.field(name)
            }
            (Decoded::SingleResource(envelope), FieldPath::Data(name)) => {
                envelope.data.as_ref()?.field(name)
            }
            (Decoded::SingleResource(envelope), FieldPath::Support(name)) => {
                envelope.support.as_ref()?.field(name)
            }
            (Decoded::UserEdit(echo), FieldPath::Top(name)) => echo.field(name),
            (Decoded::Auth(outcome), FieldPath::Top(name)) => outcome.field(name),
            _ => None,
        }
    }

    /// The shape label when this body contradicts the outcome's status.
    fn conflict_with(&self, outcome: &HttpOutcome) -> Option<&'static str> {
        match self {
            Decoded::Auth(auth) if auth.is_success() != outcome.is_success() => {
                Some(auth.variant_name())
            }
            Decoded::SingleUser(envelope) => envelope_conflict(envelope.is_empty(), outcome),
            Decoded::SingleResource(envelope) => envelope_conflict(envelope.is_empty(), outcome),
            _ => None,
        }
    }
}

fn envelope_conflict(empty: bool, outcome: &HttpOutcome) -> Option<&'static str> {
    if empty && outcome.is_success() {
        Some("empty envelope")
    } else if !empty && outcome.status == NOT_FOUND {
        Some("populated envelope")
    } else {
        None
    }
}

/// What one step is expected to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub status: u16,
    pub shape: Shape,
    pub fields: Vec<FieldExpectation>,
}

impl Expectation {
    pub fn new(status: u16, shape: Shape, fields: Vec<FieldExpectation>) -> Self {
        Self {
            status,
            shape,
            fields,
        }
    }
}

/// Outcome of [`verify`]: the decoded body when decoding worked, plus every
/// contract violation found.
#[derive(Debug)]
pub struct Verification {
    pub status: u16,
    pub decoded: Option<Decoded>,
    pub failures: Vec<ContractError>,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn mismatches(&self) -> Option<&MismatchReport> {
        self.failures.iter().find_map(|failure| match failure {
            ContractError::FieldMismatch(report) => Some(report),
            _ => None,
        })
    }

    pub fn into_result(mut self) -> Result<Decoded, ContractError> {
        if self.failures.len() > 1 {
            return Err(ContractError::Multiple(self.failures));
        }
        if let Some(failure) = self.failures.pop() {
            return Err(failure);
        }
        self.decoded
            .ok_or_else(|| malformed("no body was decoded", ""))
    }
}

pub fn verify(outcome: &HttpOutcome, expectation: &Expectation) -> Verification {
    let mut failures = Vec::new();

    if outcome.status != expectation.status {
        failures.push(ContractError::StatusMismatch {
            expected: expectation.status,
            actual: outcome.status,
        });
    }

    let decoded = match outcome.text().and_then(|body| expectation.shape.decode(body)) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            failures.push(err);
            None
        }
    };

    if let Some(decoded) = &decoded {
        if let Some(shape) = decoded.conflict_with(outcome) {
            failures.push(ContractError::ShapeConflict {
                status: outcome.status,
                shape: shape.to_string(),
            });
        }

        let report = check_fields(decoded, &expectation.fields);
        if !report.is_empty() {
            failures.push(ContractError::FieldMismatch(report));
        }
    }

    Verification {
        status: outcome.status,
        decoded,
        failures,
    }
}

/// Evaluate every expectation; nothing short-circuits.
pub fn check_fields(decoded: &Decoded, expectations: &[FieldExpectation]) -> MismatchReport {
    let entries = expectations
        .iter()
        .filter_map(|expectation| {
            let actual = decoded.lookup(&expectation.path);
            if expectation.check.holds(actual) {
                return None;
            }
            let actual = actual.map_or_else(|| ABSENT.to_string(), |value| value.to_string());
            Some(Mismatch::new(
                expectation.path.to_string(),
                expectation.check.to_string(),
                actual,
            ))
        })
        .collect();

    MismatchReport::new(entries)
}
