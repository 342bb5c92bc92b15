use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use super::TodoResponseData;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::ReplaceTodoCommand;
use crate::todo::models::Title;
use crate::todo::models::TodoId;

/// HTTP request body for replacing a todo (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct ReplaceTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl ReplaceTodoRequest {
    fn try_into_command(self) -> Result<ReplaceTodoCommand, TodoError> {
        Ok(ReplaceTodoCommand {
            title: Title::new(self.title.unwrap_or_default())?,
            completed: self.completed.unwrap_or(false),
        })
    }
}

pub async fn replace_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Result<Json<ReplaceTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = json_body(req)?.try_into_command()?;

    state
        .todo_service
        .replace_todo(&todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
