use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::application::auth_service::{AuthService, REGISTERED};
use crate::errors::AppError;
use apotek_types::domain::account::{Account, RegisterRequest};
use apotek_types::domain::credentials::Credentials;
use apotek_types::ports::account_repository::AccountRepository;

/// Successes are bare objects here, not envelopes.
pub fn router<R: AccountRepository>(service: AuthService<R>) -> Router {
    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .with_state(Arc::new(service))
}

async fn register<R: AccountRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    service.register(payload).await?;
    Ok(Json(serde_json::json!({ "message": REGISTERED })))
}

async fn login<R: AccountRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(service.login(payload).await?))
}
