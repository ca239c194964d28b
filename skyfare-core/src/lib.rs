pub mod search;
pub mod repository;
pub mod time_of_day;

pub use search::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("Catalog unavailable: {0}")]
    CatalogError(String),
    #[error("Storage backend error: {0}")]
    StorageError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
