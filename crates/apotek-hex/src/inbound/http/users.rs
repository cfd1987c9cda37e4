use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::application::user_service::UserService;
use crate::errors::AppError;
use apotek_types::domain::credentials::Credentials;
use apotek_types::domain::user::{User, UserRequest, UserSession};
use apotek_types::ports::user_repository::UserRepository;
use apotek_types::Envelope;

pub fn router<R: UserRepository>(service: UserService<R>) -> Router {
    Router::new()
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route("/users/login", post(login::<R>))
        .route(
            "/users/{id}",
            get(get_user::<R>)
                .put(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .with_state(Arc::new(service))
}

async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> Result<Json<Envelope<Vec<User>>>, AppError> {
    Ok(Json(Envelope::data(service.list_users().await?)))
}

async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<User>>, AppError> {
    let Path(id) = id?;
    Ok(Json(Envelope::data(service.get_user(id).await?)))
}

async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<User>>), AppError> {
    let Json(payload) = payload?;
    let user = service.create_user(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(user).with_message("User created")),
    ))
}

async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<Envelope<User>>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let user = service.update_user(id, payload).await?;
    Ok(Json(Envelope::data(user).with_message("User updated")))
}

async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Path(id) = id?;
    service.delete_user(id).await?;
    Ok(Json(Envelope::message("User deleted")))
}

async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Envelope<UserSession>>, AppError> {
    let Json(payload) = payload?;
    let session = service.login(payload).await?;
    Ok(Json(Envelope::data(session)))
}
