//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SettingsError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while validating session parameters collected from the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionParamsError {
    #[error("item count is not a number: {raw:?}")]
    NotANumber { raw: String },

    #[error("item count must be at least {min}, got {provided}")]
    TooFewItems { provided: usize, min: usize },

    #[error("item count {provided} exceeds the {available} items available")]
    ExceedsCatalog { provided: usize, available: usize },

    #[error("session key kind cannot be empty")]
    EmptyKeyKind,
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session scope of {requested} items exceeds catalog of {available}")]
    ScopeExceedsCatalog { requested: usize, available: usize },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors emitted while bootstrapping services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
