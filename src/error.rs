//! Failure taxonomy for match and round operations, and its HTTP mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{db::StoreError, oracle::OracleError};

#[derive(Debug, Error)]
pub enum GameError {
    /// The proposed mutation breaks a game rule. Never retried.
    #[error("{0}")]
    Validation(String),

    /// The requested match, round or user has no record.
    #[error("{0} not found")]
    NotFound(String),

    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("reference lookup failed: {0}")]
    Oracle(#[from] OracleError),
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        GameError::Validation(reason.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        GameError::NotFound(what.into())
    }
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Persistence(_) | GameError::Oracle(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            GameError::Validation(reason) => HttpResponse::BadRequest().body(reason.clone()),
            GameError::NotFound(_) => HttpResponse::NotFound().finish(),
            GameError::Persistence(_) | GameError::Oracle(_) => {
                log::error!("request failed: {self}");
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}
