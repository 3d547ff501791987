//! What the filter needs to know about a request and its response.

use axum::extract::OriginalUri;
use axum::http::{Request, Response, StatusCode};

/// Application context path set by the host as a request extension.
///
/// When absent, the first segment of the request path is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPath(pub String);

/// Context path and request URI of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    context_path: String,
    request_uri: String,
}

impl RequestInfo {
    // ---
    pub fn new(context_path: impl Into<String>, request_uri: impl Into<String>) -> Self {
        // ---
        Self {
            context_path: context_path.into(),
            request_uri: request_uri.into(),
        }
    }

    /// Resolves context and URI path from an HTTP request.
    ///
    /// Uses the pre-nesting URI when axum recorded one, so the filter sees
    /// the same path wherever it sits in the router tree. The query string
    /// is never part of the URI.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        // ---
        let request_uri = request
            .extensions()
            .get::<OriginalUri>()
            .map(|original| original.0.path())
            .unwrap_or_else(|| request.uri().path())
            .to_string();

        let context_path = match request.extensions().get::<ContextPath>() {
            Some(ContextPath(ctx)) => ctx.clone(),
            None => first_segment(&request_uri).to_string(),
        };

        Self {
            context_path,
            request_uri,
        }
    }

    pub fn context_path(&self) -> &str {
        // ---
        &self.context_path
    }

    pub fn request_uri(&self) -> &str {
        // ---
        &self.request_uri
    }

    /// Request URI with the context prefix removed.
    ///
    /// A URI outside its declared context is returned whole.
    pub fn endpoint_path(&self) -> &str {
        // ---
        self.request_uri
            .strip_prefix(self.context_path.as_str())
            .unwrap_or(&self.request_uri)
    }
}

/// `/myApp/users` -> `/myApp`, `/myApp` -> `/myApp`, `/` -> ``.
fn first_segment(path: &str) -> &str {
    // ---
    let Some(rest) = path.strip_prefix('/') else {
        return "";
    };
    match rest.find('/') {
        Some(idx) => &path[..idx + 1],
        None if rest.is_empty() => "",
        None => path,
    }
}

/// Anything that carries an HTTP status code once downstream returns.
pub trait ResponseStatus {
    fn status_code(&self) -> u16;
}

impl<B> ResponseStatus for Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

impl ResponseStatus for StatusCode {
    fn status_code(&self) -> u16 {
        self.as_u16()
    }
}

impl ResponseStatus for u16 {
    fn status_code(&self) -> u16 {
        *self
    }
}
