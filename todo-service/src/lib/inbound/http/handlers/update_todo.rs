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
use crate::todo::models::Title;
use crate::todo::models::TodoId;
use crate::todo::models::UpdateTodoCommand;

/// HTTP request body for partially updating a todo (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        // Validation happens here - errors are automatically converted via #[from]
        let title = self.title.map(Title::new).transpose()?;

        Ok(UpdateTodoCommand {
            title,
            completed: self.completed,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = json_body(req)?.try_into_command()?;

    state
        .todo_service
        .update_todo(&todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
