use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const MISSING_TOKEN: &str = "Access Denied! No token provided.";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Middleware that validates the bearer access token and adds the caller to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let subject = state
        .token_authority
        .verify_access_token(token)
        .map_err(|e| match e {
            TokenError::MissingToken => ApiError::Unauthorized(MISSING_TOKEN.to_string()),
            _ => {
                tracing::warn!(error = %e, "Access token rejected");
                ApiError::Unauthorized(INVALID_TOKEN.to_string())
            }
        })?;

    let account_id = AccountId::from_string(&subject).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse account id from token");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

/// `None` when the request carries no token to check.
fn extract_token_from_header(req: &Request) -> Result<Option<&str>, ApiError> {
    let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN.to_string()))?;

    parse_bearer(auth_str).ok_or_else(|| ApiError::Unauthorized(INVALID_TOKEN.to_string()))
}

/// `Some(None)` for a blank header or a bare scheme, `None` for any scheme
/// other than `Bearer`.
fn parse_bearer(value: &str) -> Option<Option<&str>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }

    let (scheme, rest) = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) => (scheme, rest.trim()),
        None => (value, ""),
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some((!rest.is_empty()).then_some(rest))
}
