use std::sync::Arc;
use std::time::Duration;

use auth::TokenAuthority;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::get_todo::get_todo;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::refresh_access_token::refresh_access_token;
use super::handlers::replace_todo::replace_todo;
use super::handlers::signup::signup;
use super::handlers::update_todo::update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::config::CookieConfig;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub token_authority: Arc<TokenAuthority>,
    pub cookie_config: CookieConfig,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    token_authority: Arc<TokenAuthority>,
    cookie_config: CookieConfig,
) -> Router {
    let state = AppState {
        account_service,
        todo_service,
        token_authority,
        cookie_config,
    };

    let public_routes = Router::new()
        .route("/", get(health))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/generateNewAccessToken",
            post(refresh_access_token),
        );

    let protected_routes = Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/:todo_id",
            get(get_todo)
                .put(replace_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "Todo API is running..."
}
