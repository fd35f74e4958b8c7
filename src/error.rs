//! Error types for Shelfside
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (request parsing, storage, configuration)
//! and each carries enough context to log and to render a readable error page.

use thiserror::Error;

/// Result type alias using our ShelfError type
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Main error type for Shelfside
///
/// The web layer maps each variant to an HTTP status code via
/// [`ShelfError::status_code`]; the message shown to the user comes from
/// [`ShelfError::user_message`].
#[derive(Error, Debug)]
pub enum ShelfError {
    // ===== Request errors =====

    /// The requested genre shelf does not exist in the static registry
    #[error("Unknown shelf: {0}")]
    UnknownShelf(String),

    /// The requested table kind is not one of the registry's pair members
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A referenced record does not exist
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Generic input validation error (bad form values, bad query params)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required form field is missing or empty
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    // ===== Storage errors =====

    /// Generic database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// File I/O error (database directory creation, etc.)
    #[error("File I/O error: {0}")]
    FileIoError(String),

    // ===== Configuration errors =====

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ===== External library errors =====

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<std::num::ParseIntError> for ShelfError {
    fn from(err: std::num::ParseIntError) -> Self {
        ShelfError::InvalidInput(format!("Failed to parse integer: {}", err))
    }
}

impl ShelfError {
    /// Create a RecordNotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        ShelfError::RecordNotFound(resource.into())
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ShelfError::InvalidInput(message.into())
    }

    /// Check if error was caused by the client's request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ShelfError::UnknownShelf(_)
                | ShelfError::UnknownTable(_)
                | ShelfError::RecordNotFound(_)
                | ShelfError::InvalidInput(_)
                | ShelfError::MissingRequiredField(_)
        )
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShelfError::UnknownShelf(_)
            | ShelfError::UnknownTable(_)
            | ShelfError::RecordNotFound(_) => 404,
            ShelfError::InvalidInput(_) | ShelfError::MissingRequiredField(_) => 400,
            _ => 500,
        }
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Server-side failures are summarized rather than echoed verbatim so
    /// driver internals never end up in a rendered page.
    pub fn user_message(&self) -> String {
        match self {
            ShelfError::UnknownShelf(shelf) => {
                format!("There is no shelf named '{}' in this library.", shelf)
            }
            ShelfError::UnknownTable(table) => {
                format!(
                    "'{}' is not a table on this shelf. Try 'authors' or 'books'.",
                    table
                )
            }
            ShelfError::RecordNotFound(what) => {
                format!("Could not find {}.", what)
            }
            ShelfError::MissingRequiredField(field) => {
                format!("The '{}' field is required.", field)
            }
            ShelfError::InvalidInput(message) => message.clone(),
            ShelfError::SqlxError(_) | ShelfError::DatabaseError(_) => {
                "The library database could not complete the request.".to_string()
            }
            ShelfError::MigrationFailed(_) => {
                "The library database schema could not be prepared.".to_string()
            }
            _ => "Something went wrong while handling the request.".to_string(),
        }
    }
}
