use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Column, FromRow, Row, SqlitePool, TypeInfo, ValueRef};
use std::str::FromStr;

use apotek_types::domain::account::{Account, NewAccount};
use apotek_types::domain::order::Order;
use apotek_types::domain::product::{NewProduct, Product};
use apotek_types::domain::review::{Review, ReviewEdit};
use apotek_types::domain::user::{NewUser, User, UserUpdate};
use apotek_types::ports::account_repository::AccountRepository;
use apotek_types::ports::order_repository::OrderRepository;
use apotek_types::ports::product_repository::ProductRepository;
use apotek_types::ports::review_repository::ReviewRepository;
use apotek_types::ports::user_repository::UserRepository;
use apotek_types::ports::RepoError;

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::DbError(e.to_string())
}

/// Opens (creating if needed) the database at `database_url` and applies `ddl`.
async fn connect(database_url: &str, ddl: &str) -> anyhow::Result<SqlitePool> {
    // Ensure on-disk SQLite target directory exists (no-op for in-memory).
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        if path != ":memory:" {
            let p = std::path::Path::new(path);
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    sqlx::query(ddl).execute(&pool).await?;
    tracing::debug!(database_url, "sqlite store ready");
    Ok(pool)
}

#[derive(FromRow)]
struct DbUser {
    id: i64,
    name: String,
    role: String,
    email: String,
    phone: String,
    shift: String,
    password: String,
}

impl From<DbUser> for User {
    fn from(r: DbUser) -> Self {
        Self {
            id: r.id,
            name: r.name,
            role: r.role,
            email: r.email,
            phone: r.phone,
            shift: r.shift,
            password_hash: r.password,
        }
    }
}

const USER_COLUMNS: &str = "id, name, role, email, phone, shift, password";

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = connect(database_url, include_str!("../migrations/0002_create_users.sql")).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let rows: Vec<DbUser> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let p = &user.profile;
        let res = sqlx::query(
            "INSERT INTO users (name, role, email, phone, shift, password) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&p.name)
        .bind(&p.role)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.shift)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(User::from_profile(
            res.last_insert_rowid(),
            user.profile,
            user.password_hash,
        ))
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, RepoError> {
        let p = &update.profile;
        let res = sqlx::query(
            "UPDATE users SET name = ?, role = ?, email = ?, phone = ?, shift = ?,
             password = COALESCE(?, password) WHERE id = ?",
        )
        .bind(&p.name)
        .bind(&p.role)
        .bind(&p.email)
        .bind(&p.phone)
        .bind(&p.shift)
        .bind(update.password_hash.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct DbAccount {
    id: i64,
    name: String,
    email: String,
    password: String,
}

impl From<DbAccount> for Account {
    fn from(r: DbAccount) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password,
        }
    }
}

pub struct SqliteAccountRepo {
    pool: SqlitePool,
}

impl SqliteAccountRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool =
            connect(database_url, include_str!("../migrations/0001_create_accounts.sql")).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepo {
    async fn create(&self, account: NewAccount) -> Result<Account, RepoError> {
        let res = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(Account {
            id: res.last_insert_rowid(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Account>, RepoError> {
        let rows: Vec<DbAccount> = sqlx::query_as(
            "SELECT id, name, email, password FROM users WHERE email = ? ORDER BY id ASC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Account::from).collect())
    }
}

#[derive(FromRow)]
struct DbProduct {
    id: i64,
    name: String,
    category: String,
    price: i64,
    stock: i64,
}

impl From<DbProduct> for Product {
    fn from(r: DbProduct) -> Self {
        Self {
            id: r.id,
            name: r.name,
            category: r.category,
            price: r.price,
            stock: r.stock,
        }
    }
}

pub struct SqliteProductRepo {
    pool: SqlitePool,
}

impl SqliteProductRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool =
            connect(database_url, include_str!("../migrations/0003_create_products.sql")).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepo {
    async fn list(&self) -> Result<Vec<Product>, RepoError> {
        let rows: Vec<DbProduct> =
            sqlx::query_as("SELECT id, name, category, price, stock FROM products ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, RepoError> {
        let row: Option<DbProduct> =
            sqlx::query_as("SELECT id, name, category, price, stock FROM products WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Product::from))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepoError> {
        let res =
            sqlx::query("INSERT INTO products (name, category, price, stock) VALUES (?, ?, ?, ?)")
                .bind(&product.name)
                .bind(&product.category)
                .bind(product.price)
                .bind(product.stock)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(Product::from_new(res.last_insert_rowid(), product))
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<Option<Product>, RepoError> {
        let res = sqlx::query(
            "UPDATE products SET name = ?, category = ?, price = ?, stock = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Product::from_new(id, product)))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}

/// Decodes every column by its runtime storage class.
fn row_to_columns(row: &SqliteRow) -> Result<Map<String, Value>, sqlx::Error> {
    let mut columns = Map::new();
    for col in row.columns() {
        let idx = col.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let kind = raw.type_info().name().to_owned();
            match kind.as_str() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(idx)?;
                    Value::from(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };
        columns.insert(col.name().to_string(), value);
    }
    Ok(columns)
}

pub struct SqliteOrderRepo {
    pool: SqlitePool,
}

impl SqliteOrderRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool =
            connect(database_url, include_str!("../migrations/0004_create_orders.sql")).await?;
        Ok(Self { pool })
    }

    /// Orders are written by other systems; exposed for seeding and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepo {
    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let rows = sqlx::query("SELECT * FROM orders")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter()
            .map(|r| row_to_columns(r).map(Order::new).map_err(db_err))
            .collect()
    }
}

#[derive(FromRow)]
struct DbReview {
    id: String,
    product_id: i64,
    review: String,
    rating: i64,
}

impl From<DbReview> for Review {
    fn from(r: DbReview) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            review: r.review,
            rating: r.rating,
        }
    }
}

pub struct SqliteReviewRepo {
    pool: SqlitePool,
}

impl SqliteReviewRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool =
            connect(database_url, include_str!("../migrations/0005_create_reviews.sql")).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepo {
    async fn create(&self, review: Review) -> Result<Review, RepoError> {
        sqlx::query("INSERT INTO reviews (id, product_id, review, rating) VALUES (?, ?, ?, ?)")
            .bind(&review.id)
            .bind(review.product_id)
            .bind(&review.review)
            .bind(review.rating)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(review)
    }

    async fn list(&self) -> Result<Vec<Review>, RepoError> {
        let rows: Vec<DbReview> =
            sqlx::query_as("SELECT id, product_id, review, rating FROM reviews ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Review>, RepoError> {
        let rows: Vec<DbReview> = sqlx::query_as(
            "SELECT id, product_id, review, rating FROM reviews WHERE product_id = ? ORDER BY rowid",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn update(&self, id: &str, edit: ReviewEdit) -> Result<bool, RepoError> {
        let res = sqlx::query("UPDATE reviews SET review = ?, rating = ? WHERE id = ?")
            .bind(&edit.review)
            .bind(edit.rating)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}
