use auth::TokenError;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

pub async fn refresh_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiSuccess<RefreshAccessTokenResponseData>, ApiError> {
    let refresh_token = jar.get(REFRESH_TOKEN_COOKIE).map(|cookie| cookie.value());

    let renewed = state
        .token_authority
        .renew_access_token(refresh_token)
        .map_err(|e| match e {
            TokenError::MissingToken => ApiError::BadRequest("Invalid Token".to_string()),
            TokenError::Jwt(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
            _ => {
                tracing::warn!(error = %e, "Refresh token rejected");
                ApiError::Forbidden("Invalid or Refresh Token is expired".to_string())
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshAccessTokenResponseData {
            new_access_token: renewed.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAccessTokenResponseData {
    pub new_access_token: String,
}
