//! Unified application error type.
//! All modules (db, store, core, screens, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::models::status::ServiceStatus;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database / record store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("Missing required data: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Missing credentials: pass --user and --password (or FIELDFLOW_USER / FIELDFLOW_PASSWORD)")]
    NotAuthenticated,

    #[error("Submission {id} is '{from}' and cannot move to '{to}'")]
    InvalidTransition {
        id: u64,
        from: ServiceStatus,
        to: ServiceStatus,
    },

    #[error("Not available: {0}")]
    Unavailable(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
