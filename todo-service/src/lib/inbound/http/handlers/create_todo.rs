use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use super::TodoResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::Title;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let command = json_body(body)?.try_into_command()?;

    let todo = state.todo_service.create_todo(command).await?;
    tracing::info!(todo_id = %todo.id, account_id = %caller.account_id, "Todo created");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&todo).into()))
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: Option<String>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        let title = Title::new(self.title.unwrap_or_default())?;
        Ok(CreateTodoCommand { title })
    }
}
