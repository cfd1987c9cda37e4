use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};

use apotek_types::domain::cart::CartItem;
use apotek_types::domain::transaction::Transaction;
use apotek_types::ports::cart_repository::{cart_key, CartRepository};
use apotek_types::ports::transaction_repository::{
    transaction_key, TransactionRepository, TRANSACTION_KEY_PREFIX,
};
use apotek_types::ports::RepoError;

/// Keys requested per SCAN round trip.
const SCAN_COUNT: usize = 100;

/// Placeholder written over a cart slot right before it is removed. Not valid
/// JSON, so it never equals a stored item.
const REMOVED_SLOT: &str = "\u{0}removed";

fn redis_err(e: RedisError) -> RepoError {
    RepoError::DbError(e.to_string())
}

fn json_err(e: serde_json::Error) -> RepoError {
    RepoError::DbError(e.to_string())
}

pub async fn connect(redis_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = redis::Client::open(redis_url)?;
    let connection = ConnectionManager::new(client).await?;
    tracing::info!("redis store connected");
    Ok(connection)
}

#[derive(Clone)]
pub struct RedisTransactionRepo {
    connection: ConnectionManager,
}

impl RedisTransactionRepo {
    pub async fn new(redis_url: &str) -> anyhow::Result<Self> {
        Ok(Self::with_connection(connect(redis_url).await?))
    }

    pub fn with_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, RepoError> {
        let mut conn = self.connection.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(redis_err)?;
            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }
}

#[async_trait]
impl TransactionRepository for RedisTransactionRepo {
    async fn list(&self) -> Result<Vec<Transaction>, RepoError> {
        let keys = self
            .scan_keys(&format!("{TRANSACTION_KEY_PREFIX}*"))
            .await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(redis_err)?;

        Ok(values
            .into_iter()
            .flatten()
            .filter_map(|raw| match serde_json::from_str(&raw) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable transaction");
                    None
                }
            })
            .collect())
    }

    async fn get(&self, trx: &str) -> Result<Option<Transaction>, RepoError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(transaction_key(trx)).await.map_err(redis_err)?;
        raw.map(|r| serde_json::from_str(&r).map_err(json_err))
            .transpose()
    }

    async fn save(&self, transaction: Transaction) -> Result<Transaction, RepoError> {
        let payload = serde_json::to_string(&transaction).map_err(json_err)?;
        let mut conn = self.connection.clone();
        let _: () = conn
            .set(transaction_key(&transaction.trx), payload)
            .await
            .map_err(redis_err)?;
        Ok(transaction)
    }

    async fn delete(&self, trx: &str) -> Result<bool, RepoError> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(transaction_key(trx)).await.map_err(redis_err)?;
        Ok(removed > 0)
    }
}

#[derive(Clone)]
pub struct RedisCartRepo {
    connection: ConnectionManager,
}

impl RedisCartRepo {
    pub async fn new(redis_url: &str) -> anyhow::Result<Self> {
        Ok(Self::with_connection(connect(redis_url).await?))
    }

    pub fn with_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CartRepository for RedisCartRepo {
    async fn push(&self, trx: &str, item: CartItem) -> Result<(), RepoError> {
        let payload = serde_json::to_string(&item).map_err(json_err)?;
        let mut conn = self.connection.clone();
        let _: i64 = conn.rpush(cart_key(trx), payload).await.map_err(redis_err)?;
        Ok(())
    }

    async fn items(&self, trx: &str) -> Result<Vec<CartItem>, RepoError> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = conn.lrange(cart_key(trx), 0, -1).await.map_err(redis_err)?;
        raw.iter()
            .map(|r| serde_json::from_str(r).map_err(json_err))
            .collect()
    }

    async fn set(&self, trx: &str, index: usize, item: CartItem) -> Result<bool, RepoError> {
        let key = cart_key(trx);
        let payload = serde_json::to_string(&item).map_err(json_err)?;
        let mut conn = self.connection.clone();
        let len: usize = conn.llen(&key).await.map_err(redis_err)?;
        let Ok(slot) = isize::try_from(index) else {
            return Ok(false);
        };
        if index >= len {
            return Ok(false);
        }
        let _: () = conn.lset(&key, slot, payload).await.map_err(redis_err)?;
        Ok(true)
    }

    async fn remove(&self, trx: &str, index: usize) -> Result<bool, RepoError> {
        let key = cart_key(trx);
        let mut conn = self.connection.clone();
        let len: usize = conn.llen(&key).await.map_err(redis_err)?;
        let Ok(slot) = isize::try_from(index) else {
            return Ok(false);
        };
        if index >= len {
            return Ok(false);
        }
        // LREM matches by value, so mark the slot first and remove the mark.
        let (removed,): (i64,) = redis::pipe()
            .atomic()
            .lset(&key, slot, REMOVED_SLOT)
            .ignore()
            .lrem(&key, 1, REMOVED_SLOT)
            .query_async(&mut conn)
            .await
            .map_err(redis_err)?;
        Ok(removed > 0)
    }
}
