use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use apotek_types::domain::account::{Account, NewAccount};
use apotek_types::domain::cart::CartItem;
use apotek_types::domain::order::Order;
use apotek_types::domain::product::{NewProduct, Product};
use apotek_types::domain::review::{Review, ReviewEdit};
use apotek_types::domain::transaction::Transaction;
use apotek_types::domain::user::{NewUser, User, UserUpdate};
use apotek_types::ports::account_repository::AccountRepository;
use apotek_types::ports::cart_repository::CartRepository;
use apotek_types::ports::order_repository::OrderRepository;
use apotek_types::ports::product_repository::ProductRepository;
use apotek_types::ports::review_repository::ReviewRepository;
use apotek_types::ports::transaction_repository::TransactionRepository;
use apotek_types::ports::user_repository::UserRepository;
use apotek_types::ports::RepoError;

/// Auto-increment table keyed by id, standing in for a relational table.
#[derive(Clone)]
struct Table<T> {
    rows: Arc<DashMap<i64, T>>,
    next_id: Arc<AtomicI64>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn sorted(&self) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self
            .rows
            .iter()
            .map(|kv| (*kv.key(), kv.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, v)| v).collect()
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepo {
    table: Table<User>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.sorted())
    }

    async fn get(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.table.rows.get(&id).map(|r| r.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .table
            .sorted()
            .into_iter()
            .find(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        if self.find_by_email(&user.profile.email).await?.is_some() {
            return Err(RepoError::DbError(
                "UNIQUE constraint failed: users.email".into(),
            ));
        }
        let id = self.table.next_id();
        let user = User::from_profile(id, user.profile, user.password_hash);
        self.table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, RepoError> {
        if let Some(mut v) = self.table.rows.get_mut(&id) {
            v.apply(update);
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.table.rows.remove(&id).is_some())
    }
}

#[derive(Clone)]
pub struct InMemoryAccountRepo {
    table: Table<Account>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryAccountRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepo {
    async fn create(&self, account: NewAccount) -> Result<Account, RepoError> {
        let id = self.table.next_id();
        let account = Account {
            id,
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
        };
        self.table.rows.insert(id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Account>, RepoError> {
        Ok(self
            .table
            .sorted()
            .into_iter()
            .filter(|a| a.email == email)
            .collect())
    }
}

#[derive(Clone)]
pub struct InMemoryProductRepo {
    table: Table<Product>,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryProductRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepo {
    async fn list(&self) -> Result<Vec<Product>, RepoError> {
        Ok(self.table.sorted())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, RepoError> {
        Ok(self.table.rows.get(&id).map(|r| r.clone()))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepoError> {
        let id = self.table.next_id();
        let product = Product::from_new(id, product);
        self.table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<Option<Product>, RepoError> {
        if let Some(mut v) = self.table.rows.get_mut(&id) {
            *v = Product::from_new(id, product);
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.table.rows.remove(&id).is_some())
    }
}

/// Read-only through the port; rows are loaded with [`InMemoryOrderRepo::insert`].
#[derive(Clone)]
pub struct InMemoryOrderRepo {
    table: Table<Order>,
}

impl InMemoryOrderRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn insert(&self, order: Order) {
        let id = self.table.next_id();
        self.table.rows.insert(id, order);
    }
}

impl Default for InMemoryOrderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepo {
    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        Ok(self.table.sorted())
    }
}

#[derive(Clone)]
pub struct InMemoryReviewRepo {
    map: Arc<DashMap<String, (i64, Review)>>,
    seq: Arc<AtomicI64>,
}

impl InMemoryReviewRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            seq: Arc::new(AtomicI64::new(0)),
        }
    }

    fn collect(&self, keep: impl Fn(&Review) -> bool) -> Vec<Review> {
        let mut rows: Vec<(i64, Review)> = self
            .map
            .iter()
            .filter(|kv| keep(&kv.value().1))
            .map(|kv| kv.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, r)| r).collect()
    }
}

impl Default for InMemoryReviewRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepo {
    async fn create(&self, review: Review) -> Result<Review, RepoError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.map.insert(review.id.clone(), (seq, review.clone()));
        Ok(review)
    }

    async fn list(&self) -> Result<Vec<Review>, RepoError> {
        Ok(self.collect(|_| true))
    }

    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Review>, RepoError> {
        Ok(self.collect(|r| r.product_id == product_id))
    }

    async fn update(&self, id: &str, edit: ReviewEdit) -> Result<bool, RepoError> {
        match self.map.get_mut(id) {
            Some(mut v) => {
                v.1.apply(edit);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        Ok(self.map.remove(id).is_some())
    }
}

#[derive(Clone)]
pub struct InMemoryTransactionRepo {
    pub map: Arc<DashMap<String, Transaction>>,
}

impl InMemoryTransactionRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryTransactionRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepo {
    async fn list(&self) -> Result<Vec<Transaction>, RepoError> {
        Ok(self.map.iter().map(|kv| kv.value().clone()).collect())
    }

    async fn get(&self, trx: &str) -> Result<Option<Transaction>, RepoError> {
        Ok(self.map.get(trx).map(|r| r.clone()))
    }

    async fn save(&self, transaction: Transaction) -> Result<Transaction, RepoError> {
        self.map
            .insert(transaction.trx.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn delete(&self, trx: &str) -> Result<bool, RepoError> {
        Ok(self.map.remove(trx).is_some())
    }
}

#[derive(Clone)]
pub struct InMemoryCartRepo {
    pub map: Arc<DashMap<String, Vec<CartItem>>>,
}

impl InMemoryCartRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryCartRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepo {
    async fn push(&self, trx: &str, item: CartItem) -> Result<(), RepoError> {
        self.map.entry(trx.to_string()).or_default().push(item);
        Ok(())
    }

    async fn items(&self, trx: &str) -> Result<Vec<CartItem>, RepoError> {
        Ok(self.map.get(trx).map(|r| r.clone()).unwrap_or_default())
    }

    async fn set(&self, trx: &str, index: usize, item: CartItem) -> Result<bool, RepoError> {
        if let Some(mut items) = self.map.get_mut(trx) {
            if let Some(slot) = items.get_mut(index) {
                *slot = item;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn remove(&self, trx: &str, index: usize) -> Result<bool, RepoError> {
        let removed = match self.map.get_mut(trx) {
            Some(mut items) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        };
        // An emptied list disappears, as a store list does.
        self.map.remove_if(trx, |_, items| items.is_empty());
        Ok(removed)
    }
}
