use thiserror::Error;

/// Error for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo id: {0}")]
    InvalidFormat(String),
}

/// Error for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is required")]
    Empty,
}

/// Top-level error for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("{0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("{0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Todo not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
