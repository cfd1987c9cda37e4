use serde::{Deserialize, Serialize};

use super::{optional_identifier, present};

/// Product identifier as sent by the client: a numeric id or a code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProductRef {
    Id(i64),
    Code(String),
}

impl ProductRef {
    fn is_blank(&self) -> bool {
        match self {
            ProductRef::Id(id) => *id == 0,
            ProductRef::Code(code) => code.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductRef,
    pub qty: i64,
}

/// Body of `POST /cart/add` and `PUT /cart/update`; only the update uses `index`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartRequest {
    #[serde(default, deserialize_with = "optional_identifier")]
    pub trx: Option<String>,
    pub index: Option<usize>,
    pub product_id: Option<ProductRef>,
    pub qty: Option<i64>,
}

/// Body of `POST /cart/checkout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default, deserialize_with = "optional_identifier")]
    pub trx: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutReceipt {
    pub success: bool,
    pub trx: String,
    pub items: Vec<CartItem>,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartRequest {
    fn item(product_id: Option<ProductRef>, qty: Option<i64>) -> Option<CartItem> {
        let product_id = product_id.filter(|p| !p.is_blank())?;
        let qty = qty.filter(|q| *q != 0)?;
        Some(CartItem { product_id, qty })
    }

    pub fn into_addition(self) -> anyhow::Result<(String, CartItem)> {
        match (present(self.trx), Self::item(self.product_id, self.qty)) {
            (Some(trx), Some(item)) => Ok((trx, item)),
            _ => anyhow::bail!("trx, product_id, and qty are required"),
        }
    }

    pub fn into_replacement(self) -> anyhow::Result<(String, usize, CartItem)> {
        match (
            present(self.trx),
            self.index,
            Self::item(self.product_id, self.qty),
        ) {
            (Some(trx), Some(index), Some(item)) => Ok((trx, index, item)),
            _ => anyhow::bail!("trx, index, product_id, and qty are required"),
        }
    }
}

impl CheckoutRequest {
    pub fn validate(self) -> anyhow::Result<(String, String, Option<String>)> {
        match (present(self.trx), present(self.payment_method)) {
            (Some(trx), Some(pm)) => Ok((trx, pm, self.note)),
            _ => anyhow::bail!("trx and payment_method are required"),
        }
    }
}
