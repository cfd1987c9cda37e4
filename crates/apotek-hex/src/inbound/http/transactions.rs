use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::cart;
use crate::application::cart_service::CartService;
use crate::application::transaction_service::TransactionService;
use crate::errors::AppError;
use apotek_types::domain::transaction::{
    Transaction, TransactionReport, TransactionRequest, TransactionUpdate,
};
use apotek_types::ports::cart_repository::CartRepository;
use apotek_types::ports::transaction_repository::TransactionRepository;
use apotek_types::Envelope;

/// Transaction routes plus the cart routes, which share the same store.
pub fn router<T, C>(transactions: TransactionService<T>, carts: CartService<C>) -> Router
where
    T: TransactionRepository,
    C: CartRepository,
{
    Router::new()
        .route(
            "/transactions",
            get(list_transactions::<T>).post(create_transaction::<T>),
        )
        .route(
            "/transactions/{trx}",
            get(get_transaction::<T>)
                .put(update_transaction::<T>)
                .delete(delete_transaction::<T>),
        )
        .route("/reports/transactions", get(report::<T>))
        .with_state(Arc::new(transactions))
        .merge(cart::router(carts))
}

async fn list_transactions<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
) -> Result<Json<Envelope<Vec<Transaction>>>, AppError> {
    Ok(Json(Envelope::data(service.list_transactions().await?)))
}

async fn get_transaction<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
    Path(trx): Path<String>,
) -> Result<Json<Envelope<Transaction>>, AppError> {
    Ok(Json(Envelope::data(service.get_transaction(&trx).await?)))
}

async fn create_transaction<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<Envelope<Transaction>>, AppError> {
    let Json(payload) = payload?;
    let saved = service.create_transaction(payload).await?;
    Ok(Json(Envelope::data(saved).with_message("Transaction saved")))
}

async fn update_transaction<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
    Path(trx): Path<String>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<Envelope<Transaction>>, AppError> {
    let Json(payload) = payload?;
    let updated = service.update_transaction(&trx, payload).await?;
    Ok(Json(
        Envelope::data(updated).with_message("Transaction updated"),
    ))
}

async fn delete_transaction<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
    Path(trx): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    service.delete_transaction(&trx).await?;
    Ok(Json(Envelope::message("Transaction deleted")))
}

async fn report<T: TransactionRepository>(
    State(service): State<Arc<TransactionService<T>>>,
) -> Result<Json<TransactionReport>, AppError> {
    Ok(Json(service.report().await?))
}
