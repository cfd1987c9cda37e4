use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::product_service::ProductService;
use crate::errors::AppError;
use apotek_types::domain::product::{ProductCreated, ProductRequest};
use apotek_types::ports::product_repository::ProductRepository;
use apotek_types::Envelope;

/// `id` stays a string here so that `?id=` reads as absent rather than as a
/// malformed number.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

impl ProductQuery {
    pub fn id(&self) -> Result<Option<i64>, AppError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("Invalid product id: {raw}"))),
        }
    }
}

pub fn router<R: ProductRepository>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/products",
            get(get_products::<R>)
                .post(create_product::<R>)
                .put(update_product::<R>)
                .delete(delete_product::<R>),
        )
        .with_state(Arc::new(service))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Product Service",
        "status": "running",
    }))
}

/// `?id=N` narrows the listing to one product.
async fn get_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    match query.id()? {
        Some(id) => {
            let product = service.get_product(id).await?;
            Ok(Json(Envelope::data(product)).into_response())
        }
        None => {
            let list = service.list_products().await?;
            Ok(Json(Envelope::data(list)).into_response())
        }
    }
}

async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductCreated>), AppError> {
    let Json(payload) = payload?;
    let product = service.create_product(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            success: true,
            message: "Product created".into(),
            id: product.id,
        }),
    ))
}

async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Json(payload) = payload?;
    service.update_product(payload).await?;
    Ok(Json(Envelope::message("Product updated")))
}

async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Query(query) = query?;
    let id = query
        .id()?
        .ok_or_else(|| AppError::BadRequest("ID required".into()))?;
    service.delete_product(id).await?;
    Ok(Json(Envelope::message("Product deleted")))
}
