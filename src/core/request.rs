//! # Action Requests
//!
//! An `ActionRequest` is one user-triggered call to the backend: where it goes,
//! how it is sent, what it carries and what kind of body is expected back.
//!
//! Requests are built fresh for every interaction and never mutated afterwards.
//! Fields are private; use the constructors and accessors.

use std::fmt;

use serde_json::{Map, Value};
use uuid::Uuid;

/// HTTP method of an action. The backend only exposes GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// The body format a successful response must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    id: Uuid,
    endpoint: String,
    method: Method,
    payload: Option<Map<String, Value>>,
    expect: ResponseFormat,
}

impl ActionRequest {
    /// A GET request expecting a JSON body.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::Get, None)
    }

    /// A POST request expecting a JSON body.
    pub fn post(endpoint: impl Into<String>, payload: Option<Map<String, Value>>) -> Self {
        Self::new(endpoint, Method::Post, payload)
    }

    fn new(endpoint: impl Into<String>, method: Method, payload: Option<Map<String, Value>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            endpoint: endpoint.into(),
            method,
            payload,
            expect: ResponseFormat::Json,
        }
    }

    /// Returns the same request expecting a different response format.
    pub fn expecting(self, expect: ResponseFormat) -> Self {
        Self { expect, ..self }
    }

    /// Correlation id for log lines. Not sent to the server.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref()
    }

    pub fn expect(&self) -> ResponseFormat {
        self.expect
    }
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_defaults_to_json_without_payload() {
        let req = ActionRequest::get("/api/ai/predict/performance");
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.expect(), ResponseFormat::Json);
        assert!(req.payload().is_none());
        assert_eq!(req.to_string(), "GET /api/ai/predict/performance");
    }

    #[test]
    fn test_expecting_keeps_identity() {
        let req = ActionRequest::get("/api/export-user-data");
        let id = req.id();
        let req = req.expecting(ResponseFormat::Binary);
        assert_eq!(req.id(), id);
        assert_eq!(req.expect(), ResponseFormat::Binary);
    }

    #[test]
    fn test_each_request_gets_fresh_id() {
        let a = ActionRequest::post("/api/clear-learning-history", None);
        let b = ActionRequest::post("/api/clear-learning-history", None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_post_carries_payload() {
        let mut body = Map::new();
        body.insert("models".into(), json!(["all"]));
        let req = ActionRequest::post("/api/ai/train/models", Some(body));
        assert_eq!(req.payload().and_then(|p| p.get("models")), Some(&json!(["all"])));
    }
}
