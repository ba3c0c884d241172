//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DashError;

use super::templates::{render_page, ErrorTemplate, FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    /// Fragment only, for HTMX swaps.
    pub fragment: bool,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fragment: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn as_fragment(mut self, fragment: bool) -> Self {
        self.fragment = fragment;
        self
    }
}

pub fn status_from_error(err: &DashError) -> StatusCode {
    match err {
        DashError::UnknownSymbol { .. } => StatusCode::NOT_FOUND,
        DashError::InvalidArgument { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DashError::DataSource { .. } => StatusCode::BAD_GATEWAY,
        DashError::ConfigParse { .. } | DashError::ConfigInvalid { .. } | DashError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Text shown to the user for `err`. Failures that are not the user's doing
/// are logged and replaced with the generic fetch message.
pub fn public_message(err: &DashError) -> String {
    match err {
        DashError::UnknownSymbol { .. } => NOT_FOUND_MESSAGE.to_string(),
        DashError::InvalidArgument { reason } => reason.clone(),
        _ => {
            tracing::error!(error = %err, "request failed");
            FETCH_FAILED_MESSAGE.to_string()
        }
    }
}

impl From<DashError> for WebError {
    fn from(err: DashError) -> Self {
        Self::new(status_from_error(&err), public_message(&err))
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        tracing::error!(error = %err, "template rendering failed");
        Self::internal("template rendering failed")
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        let content = match template.render() {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };
        if self.fragment {
            return (self.status, Html(content)).into_response();
        }
        match render_page("Error", &content) {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, content).into_response(),
        }
    }
}
