//! JSON API over HTTP.
//!
//! Routing is a pure function from [`HttpRequest`] to [`ApiResponse`]; the
//! wire layer in [`http`] only frames bytes.

mod http;

pub use http::{HttpRequest, Method, RequestError, Server, percent_decode, read_request, write_response};

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::document::{DocumentSource, FsDocumentSource};
use crate::engine::Validator;

/// Status code and pretty-printed JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(body) => Self { status, body },
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response");
                Self::error(500, "Failed to serialize response")
            }
        }
    }

    /// `{"error": message}` with the given status.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!("{{\n  \"error\": {}\n}}", json!(message)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CliUsage {
    pub command: &'static str,
    pub example: &'static str,
}

/// Static self-description returned for unrecognised requests.
#[derive(Debug, Clone, Serialize)]
pub struct ApiDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<Endpoint>,
    pub cli_usage: CliUsage,
}

#[must_use]
pub fn api_descriptor() -> ApiDescriptor {
    ApiDescriptor {
        name: "SVG PWA Validator API",
        version: crate::ENGINE_VERSION,
        description: "API for validating SVG files for PWA and PHP compatibility",
        endpoints: vec![
            Endpoint {
                method: "GET",
                url: "?file=path/to/file.svg",
                description: "Test SVG file via GET parameter",
                body: None,
            },
            Endpoint {
                method: "POST",
                url: "/",
                description: "Test SVG file via POST JSON",
                body: Some(json!({ "file": "path/to/file.svg" })),
            },
        ],
        cli_usage: CliUsage {
            command: "svg-pwa-validator validate <svg-file-or-directory>",
            example: "svg-pwa-validator validate apps/clock.svg",
        },
    }
}

const FILE_REQUIRED: &str = "File path is required";

/// Routes requests to the validator.
pub struct ApiHandler<S: DocumentSource = FsDocumentSource> {
    validator: Validator<S>,
}

impl<S: DocumentSource> ApiHandler<S> {
    #[must_use]
    pub const fn new(validator: Validator<S>) -> Self {
        Self { validator }
    }

    /// `GET ?file=` and `POST {"file": ...}` validate; anything else gets the
    /// descriptor. A missing target still answers 200 with a failed report.
    #[must_use]
    pub fn handle(&self, request: &HttpRequest) -> ApiResponse {
        match request.method {
            Method::Post => match requested_file(&request.body) {
                Some(file) => self.validate(&file),
                None => ApiResponse::error(400, FILE_REQUIRED),
            },
            Method::Get => match request.query_param("file") {
                Some(file) => self.validate(file),
                None => ApiResponse::json(200, &api_descriptor()),
            },
            Method::Other(_) => ApiResponse::json(200, &api_descriptor()),
        }
    }

    fn validate(&self, file: &str) -> ApiResponse {
        let report = self.validator.validate_or_report(Path::new(file));
        ApiResponse::json(200, &report)
    }
}

/// The `file` member of a JSON object body, if it is a string.
fn requested_file(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("file")?.as_str().map(ToString::to_string)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
