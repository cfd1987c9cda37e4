use serde::{Deserialize, Serialize};

use super::present;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: i64,
}

/// Body of `POST /products` and `PUT /products`; the update carries `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: i64,
}

/// `201` body of `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductCreated {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

impl ProductRequest {
    /// Price and stock may be zero; only their absence is rejected.
    pub fn into_new(self) -> anyhow::Result<NewProduct> {
        match (
            present(self.name),
            present(self.category),
            self.price,
            self.stock,
        ) {
            (Some(name), Some(category), Some(price), Some(stock)) => Ok(NewProduct {
                name,
                category,
                price,
                stock,
            }),
            _ => anyhow::bail!("Invalid input data"),
        }
    }

    pub fn into_update(self) -> anyhow::Result<(i64, NewProduct)> {
        let id = match self.id {
            Some(id) if id != 0 => id,
            _ => anyhow::bail!("Invalid input data"),
        };
        Ok((id, self.into_new()?))
    }
}

impl Product {
    pub fn from_new(id: i64, p: NewProduct) -> Self {
        Self {
            id,
            name: p.name,
            category: p.category,
            price: p.price,
            stock: p.stock,
        }
    }
}
