use axum::{
    extract::rejection::{FormRejection, PathRejection},
    extract::{Path, State},
    routing::{get, put},
    Form, Json, Router,
};
use std::sync::Arc;

use crate::application::review_service::ReviewService;
use crate::errors::AppError;
use apotek_types::domain::review::{Review, ReviewForm};
use apotek_types::ports::review_repository::ReviewRepository;
use apotek_types::Envelope;

/// Bodies are `application/x-www-form-urlencoded`.
pub fn router<R: ReviewRepository>(service: ReviewService<R>) -> Router {
    Router::new()
        .route("/reviews", get(list_reviews::<R>).post(create_review::<R>))
        .route("/reviews/{product_id}", get(reviews_for_product::<R>))
        .route(
            "/review/{review_id}",
            put(update_review::<R>).delete(delete_review::<R>),
        )
        .with_state(Arc::new(service))
}

async fn create_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<Json<Envelope<Review>>, AppError> {
    let Form(form) = form?;
    Ok(Json(Envelope::data(service.create_review(form).await?)))
}

async fn list_reviews<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
) -> Result<Json<Envelope<Vec<Review>>>, AppError> {
    Ok(Json(Envelope::data(service.list_reviews().await?)))
}

async fn reviews_for_product<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    product_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<Vec<Review>>>, AppError> {
    let Path(product_id) = product_id?;
    Ok(Json(Envelope::data(
        service.reviews_for_product(product_id).await?,
    )))
}

async fn update_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Path(review_id): Path<String>,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Form(form) = form?;
    service.update_review(&review_id, form).await?;
    Ok(Json(Envelope::message("Review updated")))
}

async fn delete_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Path(review_id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    service.delete_review(&review_id).await?;
    Ok(Json(Envelope::message("Review deleted")))
}
