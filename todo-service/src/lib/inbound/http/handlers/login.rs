use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Deserialize;
use serde::Serialize;

use super::body_validation_error;
use super::json_body;
use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use super::REFRESH_TOKEN_COOKIE;
use crate::account::errors::AccountError;
use crate::account::errors::PasswordPolicyError;
use crate::account::models::EmailAddress;
use crate::config::CookieConfig;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let (email, password) = json_body(body)
        .map_err(body_validation_error)?
        .validate()
        .map_err(ApiError::Validation)?;

    let account = state
        .account_service
        .verify_credentials(&email, &password)
        .await
        .map_err(|e| match e {
            AccountError::InvalidCredentials => {
                ApiError::BadRequest("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })?;

    let pair = state
        .token_authority
        .issue_token_pair(&account.id.to_string())
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(account_id = %account.id, "Login succeeded");

    let max_age = state.token_authority.settings().refresh_token_ttl.num_seconds();
    let jar = jar.add(refresh_token_cookie(
        pair.refresh.token.clone(),
        max_age,
        &state.cookie_config,
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                access_token: pair.access.token,
                refresh_token: pair.refresh.token,
            },
        ),
    ))
}

/// Cookie carrying the refresh token: invisible to scripts, same-site only,
/// expiring together with the token.
pub fn refresh_token_cookie(token: String, max_age_seconds: i64, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn validate(self) -> Result<(EmailAddress, String), Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = EmailAddress::new(self.email.unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new("email", e)))
            .ok();

        let password = self.password.filter(|p| !p.is_empty());
        if password.is_none() {
            errors.push(FieldError::new("password", PasswordPolicyError::Empty));
        }

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
}
