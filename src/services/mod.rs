pub mod blog;
pub mod clock;
pub mod password;

pub use blog::{BlogService, NewComment};
pub use clock::{Clock, SystemClock};

use crate::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PostNotFound(_) => ServiceError::NotFound("Post not found".to_string()),
            StoreError::DuplicateEmail(_) => ServiceError::Conflict("User already exists".to_string()),
            StoreError::Database(msg) | StoreError::Serialization(msg) => ServiceError::Internal(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
