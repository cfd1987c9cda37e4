use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::application::order_service::OrderService;
use crate::errors::AppError;
use apotek_types::domain::order::Order;
use apotek_types::ports::order_repository::OrderRepository;
use apotek_types::Envelope;

pub fn router<R: OrderRepository>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/orders", get(list_orders::<R>))
        .with_state(Arc::new(service))
}

async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> Result<Json<Envelope<Vec<Order>>>, AppError> {
    let list = service.list_orders().await?;
    Ok(Json(Envelope::data(list)))
}
