use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use strana::{AnalysisError, PipelineError, QueryError, StoreError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Not Found")]
    NotFound,
}

/// API error response structure
///
/// `detail` carries the human-readable message; `error` adds a stable code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Pipeline(err) => pipeline_status(err),
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            ServerError::NotFound => "NOT_FOUND",
            ServerError::Pipeline(err) => pipeline_code(err),
        }
    }
}

fn pipeline_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Analysis(inner) => {
            StatusCode::from_u16(inner.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST)
        }
        PipelineError::Store(inner) => store_status(inner),
        PipelineError::Query(QueryError::InvalidArgument(_))
        | PipelineError::Query(QueryError::Unparseable(_)) => StatusCode::BAD_REQUEST,
        PipelineError::Query(QueryError::Store(inner)) => store_status(inner),
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn pipeline_code(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Analysis(AnalysisError::EmptyValue) => "EMPTY_VALUE",
        PipelineError::Analysis(_) => "ANALYSIS_ERROR",
        PipelineError::Store(StoreError::Conflict(_))
        | PipelineError::Query(QueryError::Store(StoreError::Conflict(_))) => "CONFLICT",
        PipelineError::Store(StoreError::NotFound(_))
        | PipelineError::Query(QueryError::Store(StoreError::NotFound(_))) => "NOT_FOUND",
        PipelineError::Store(StoreError::Backend(_))
        | PipelineError::Query(QueryError::Store(StoreError::Backend(_))) => "STORE_ERROR",
        PipelineError::Query(QueryError::InvalidArgument(_)) => "INVALID_FILTER",
        PipelineError::Query(QueryError::Unparseable(_)) => "UNPARSEABLE_QUERY",
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, status = %status, "request failed");
        }

        let body = Json(ErrorResponse {
            detail: message.clone(),
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
