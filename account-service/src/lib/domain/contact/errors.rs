use thiserror::Error;

use crate::account::errors::EmailError;

/// Error for contact submission operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Error for the email notification collaborator
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to initialize notifier: {0}")]
    InitFailed(String),

    #[error("Failed to send notification: {0}")]
    SendFailed(String),

    #[error("Email relay rejected the notification with status {0}")]
    Rejected(u16),
}
