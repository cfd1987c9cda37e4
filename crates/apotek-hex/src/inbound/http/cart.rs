use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;

use crate::application::cart_service::CartService;
use crate::errors::AppError;
use apotek_types::domain::cart::{CartItem, CartRequest, CheckoutReceipt, CheckoutRequest};
use apotek_types::ports::cart_repository::CartRepository;
use apotek_types::Envelope;

pub fn router<C: CartRepository>(service: CartService<C>) -> Router {
    Router::new()
        .route("/cart/add", post(add_item::<C>))
        .route("/cart/update", put(update_item::<C>))
        .route("/cart/checkout", post(checkout::<C>))
        .route("/cart/{trx}", get(list_items::<C>))
        .route("/cart/{trx}/{index}", delete(remove_item::<C>))
        .with_state(Arc::new(service))
}

async fn add_item<C: CartRepository>(
    State(service): State<Arc<CartService<C>>>,
    payload: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Json(payload) = payload?;
    service.add_item(payload).await?;
    Ok(Json(Envelope::message("Item added to cart")))
}

async fn list_items<C: CartRepository>(
    State(service): State<Arc<CartService<C>>>,
    Path(trx): Path<String>,
) -> Result<Json<Envelope<Vec<CartItem>>>, AppError> {
    Ok(Json(Envelope::data(service.items(&trx).await?)))
}

async fn update_item<C: CartRepository>(
    State(service): State<Arc<CartService<C>>>,
    payload: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Json(payload) = payload?;
    service.update_item(payload).await?;
    Ok(Json(Envelope::message("Item updated")))
}

async fn remove_item<C: CartRepository>(
    State(service): State<Arc<CartService<C>>>,
    params: Result<Path<(String, usize)>, PathRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let Path((trx, index)) = params?;
    service.remove_item(&trx, index).await?;
    Ok(Json(Envelope::message("Item removed from cart")))
}

async fn checkout<C: CartRepository>(
    State(service): State<Arc<CartService<C>>>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutReceipt>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(service.checkout(payload).await?))
}
