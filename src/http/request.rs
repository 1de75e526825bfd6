use serde::Serialize;

use super::method::HttpMethod;

/// One request against the API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path plus optional query string, e.g. `users?page=2`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attach `payload` as the JSON body.
    pub fn with_json<T: Serialize>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}
