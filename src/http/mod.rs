pub mod client;
pub mod method;
pub mod request;
pub mod response;

pub use client::{HttpTransport, SendFuture, Transport, TransportError};
pub use method::HttpMethod;
pub use request::ApiRequest;
pub use response::HttpOutcome;
