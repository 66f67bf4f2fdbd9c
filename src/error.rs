use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message shown for any failed ranking request.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Try again later.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in both keyword and location.")]
    MissingRequiredField,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown view: {0} (expected dashboard, locations, reports, about or settings)")]
    Unknown(String),
}

/// Everything that can go wrong between sending the scrape request and
/// decoding its body. All variants collapse to [`FAILURE_MESSAGE`] for the user.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("failed to read reports file {path}: {source}")]
    ReportsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reports file {path}: {source}")]
    ReportsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("report not found: {0}")]
    ReportNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::ReportNotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
