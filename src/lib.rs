//! Contract verification for the reqres.in user-management API.
//!
//! [`model`] holds the typed request/response shapes, [`verify`] decodes an
//! HTTP outcome and compares it with a [`verify::Expectation`],
//! [`scenario`] sequences requests through a [`http::Transport`], and [`cli`]
//! wires it all into the `reqres-contract` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod scenario;
pub mod verify;

pub use error::ContractError;
