use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::body_validation_error;
use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use super::MessageData;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::RegistrationOutcome;
use crate::account::models::Username;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let command = json_body(body)
        .map_err(body_validation_error)?
        .try_into_command()
        .map_err(ApiError::Validation)?;

    match state.account_service.register(command).await? {
        RegistrationOutcome::Created(_) => Ok(ApiSuccess::new(
            StatusCode::CREATED,
            MessageData::new("User created successfully"),
        )),
        RegistrationOutcome::AlreadyExists => Ok(ApiSuccess::new(
            StatusCode::OK,
            MessageData::new("User Already exist"),
        )),
    }
}

/// HTTP request body for signup (raw JSON)
///
/// Fields are optional so that missing ones are reported as validation
/// errors rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl SignupRequest {
    /// Validate every field, collecting all failures.
    fn try_into_command(self) -> Result<RegisterAccountCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = Username::new(self.username.unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new("username", e)))
            .ok();
        let email = EmailAddress::new(self.email.unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new("email", e)))
            .ok();
        let password = Password::new(self.password.unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new("password", e)))
            .ok();

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) => {
                Ok(RegisterAccountCommand::new(username, email, password))
            }
            _ => Err(errors),
        }
    }
}
