use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::ReplaceTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, id: &TodoId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(&self, command: CreateTodoCommand) -> Result<Todo, TodoError> {
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::new(),
            title: command.title,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(todo).await?;
        tracing::debug!(todo_id = %created.id, "Todo created");

        Ok(created)
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_all().await
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Todo, TodoError> {
        self.find_existing(id).await
    }

    async fn replace_todo(
        &self,
        id: &TodoId,
        command: ReplaceTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_existing(id).await?;

        todo.title = command.title;
        todo.completed = command.completed;
        todo.updated_at = Utc::now();

        self.repository.update(todo).await
    }

    async fn update_todo(
        &self,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_existing(id).await?;

        if command.title.is_none() && command.completed.is_none() {
            return Ok(todo);
        }

        todo.apply(command, Utc::now());
        self.repository.update(todo).await
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(id).await?;
        tracing::debug!(todo_id = %id, "Todo deleted");
        Ok(())
    }
}
