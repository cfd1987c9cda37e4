use chrono::Utc;

use crate::errors::AppError;
use apotek_types::domain::transaction::{
    Transaction, TransactionReport, TransactionRequest, TransactionUpdate,
};
use apotek_types::ports::transaction_repository::TransactionRepository;

const NOT_FOUND: &str = "Transaction not found";

pub struct TransactionService<R: TransactionRepository> {
    repo: R,
}

impl<R: TransactionRepository> TransactionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_transaction(&self, trx: &str) -> Result<Transaction, AppError> {
        self.repo
            .get(trx)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    /// Saves under `trx`, replacing any earlier record with the same id.
    pub async fn create_transaction(
        &self,
        req: TransactionRequest,
    ) -> Result<Transaction, AppError> {
        let transaction =
            Transaction::new(req, Utc::now()).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let saved = self.repo.save(transaction).await?;
        tracing::info!(trx = %saved.trx, items = saved.items.len(), "transaction saved");
        Ok(saved)
    }

    pub async fn update_transaction(
        &self,
        trx: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction, AppError> {
        let mut transaction = self.get_transaction(trx).await?;
        transaction.apply(update);
        let saved = self.repo.save(transaction).await?;
        tracing::info!(trx, "transaction updated");
        Ok(saved)
    }

    pub async fn delete_transaction(&self, trx: &str) -> Result<(), AppError> {
        if self.repo.delete(trx).await? {
            tracing::info!(trx, "transaction deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(NOT_FOUND.into()))
        }
    }

    /// Full scan; no isolation from writes that land mid-scan.
    pub async fn report(&self) -> Result<TransactionReport, AppError> {
        let all = self.repo.list().await?;
        Ok(TransactionReport::from_transactions(all))
    }
}
