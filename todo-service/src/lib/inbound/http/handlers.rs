use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::account::errors::AccountError;
use crate::todo::errors::TodoError;
use crate::todo::models::Todo;

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod login;
pub mod refresh_access_token;
pub mod replace_todo;
pub mod signup;
pub mod update_todo;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// One failed input check, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    Validation(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Unwrap a JSON request body. A request that carries no JSON body at all
/// reads as `T::default()`, so missing fields surface as validation errors.
pub fn json_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, JsonRejection> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection),
    }
}

/// Malformed JSON on the auth routes is reported in the validation shape.
pub fn body_validation_error(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": error }))
            }
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, json!({ "message": message })),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "message": message })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidUsername(e) => {
                ApiError::Validation(vec![FieldError::new("username", e)])
            }
            AccountError::InvalidEmail(e) => ApiError::Validation(vec![FieldError::new("email", e)]),
            AccountError::InvalidPassword(e) => {
                ApiError::Validation(vec![FieldError::new("password", e)])
            }
            AccountError::UsernameAlreadyExists(_) | AccountError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            AccountError::Password(_) | AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::InvalidTodoId(_) | TodoError::InvalidTitle(_) => {
                ApiError::BadRequest(err.to_string())
            }
            TodoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            // Raw store message, unsanitised
            TodoError::DatabaseError(message) => ApiError::InternalServerError(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponseData {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponseData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.as_str().to_string(),
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
