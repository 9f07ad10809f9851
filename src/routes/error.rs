use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use crate::core::ScoringError;
use crate::models::ErrorResponse;
use crate::services::{CacheError, GroupError};

/// Every failure a handler can surface, mapped onto a JSON error body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::NotFound(_) => "not_found",
            ApiError::Group(GroupError::GroupNotFound(_)) => "group_not_found",
            ApiError::Group(GroupError::GroupFull { .. }) => "group_full",
            ApiError::Group(GroupError::Scoring(e)) | ApiError::Scoring(e) => scoring_code(e),
            ApiError::Cache(_) => "cache_error",
        }
    }
}

fn scoring_code(err: &ScoringError) -> &'static str {
    match err {
        ScoringError::InvalidProfile(_) => "invalid_profile",
        ScoringError::EmptyCatalog => "empty_catalog",
    }
}

fn scoring_status(err: &ScoringError) -> StatusCode {
    match err {
        ScoringError::InvalidProfile(_) => StatusCode::BAD_REQUEST,
        ScoringError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::Group(GroupError::GroupNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Group(GroupError::GroupFull { .. }) => StatusCode::CONFLICT,
            ApiError::Group(GroupError::Scoring(e)) | ApiError::Scoring(e) => scoring_status(e),
            ApiError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidQuery(err.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}
