use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::ReplaceTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;

/// Port for todo domain service operations.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a new, not yet completed todo.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(&self, command: CreateTodoCommand) -> Result<Todo, TodoError>;

    /// List every todo, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError>;

    /// Retrieve a todo by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, id: &TodoId) -> Result<Todo, TodoError>;

    /// Overwrite title and completion state.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn replace_todo(&self, id: &TodoId, command: ReplaceTodoCommand)
        -> Result<Todo, TodoError>;

    /// Change only the provided fields.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(&self, id: &TodoId, command: UpdateTodoCommand)
        -> Result<Todo, TodoError>;

    /// Delete a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todo aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist new todo to storage.
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve todo by identifier (None if not found).
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// Retrieve all todos, newest first.
    async fn list_all(&self) -> Result<Vec<Todo>, TodoError>;

    /// Write back a modified todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove todo from storage.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
