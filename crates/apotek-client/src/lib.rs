//! Typed HTTP client for the product and transaction services.

use std::time::Duration;

use anyhow::Context;
use apotek_types::domain::cart::{CartItem, CartRequest, CheckoutReceipt, CheckoutRequest};
use apotek_types::domain::product::{Product, ProductCreated, ProductRequest};
use apotek_types::domain::transaction::{
    Transaction, TransactionReport, TransactionRequest, TransactionUpdate,
};
use apotek_types::Envelope;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct ApotekClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Points at one service's base url; the product and transaction calls are
/// only meaningful against their own service.
#[derive(Clone)]
pub struct ApotekClient {
    base: Url,
    client: reqwest::Client,
}

impl ApotekClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<ApotekClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(ApotekClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        let url = self.base.join(path).context("failed to join url")?;
        tracing::debug!(%url, "apotek request");
        Ok(url)
    }

    /// Unwraps `data` from a successful envelope.
    async fn data<T: DeserializeOwned>(res: reqwest::Response) -> anyhow::Result<T> {
        let envelope: Envelope<T> = res.error_for_status()?.json().await?;
        envelope
            .data
            .context("response envelope carried no data")
    }

    async fn acknowledged(res: reqwest::Response) -> anyhow::Result<()> {
        let envelope: Envelope<serde_json::Value> = res.error_for_status()?.json().await?;
        if !envelope.success {
            anyhow::bail!(envelope.message.unwrap_or_else(|| "request failed".into()));
        }
        Ok(())
    }

    pub async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        let res = self.client.get(self.url("products")?).send().await?;
        Self::data(res).await
    }

    pub async fn get_product(&self, id: i64) -> anyhow::Result<Product> {
        let res = self
            .client
            .get(self.url("products")?)
            .query(&[("id", id)])
            .send()
            .await?;
        Self::data(res).await
    }

    pub async fn create_product(&self, req: &ProductRequest) -> anyhow::Result<ProductCreated> {
        let res = self
            .client
            .post(self.url("products")?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_product(&self, req: &ProductRequest) -> anyhow::Result<()> {
        let res = self
            .client
            .put(self.url("products")?)
            .json(req)
            .send()
            .await?;
        Self::acknowledged(res).await
    }

    pub async fn delete_product(&self, id: i64) -> anyhow::Result<()> {
        let res = self
            .client
            .delete(self.url("products")?)
            .query(&[("id", id)])
            .send()
            .await?;
        Self::acknowledged(res).await
    }

    pub async fn list_transactions(&self) -> anyhow::Result<Vec<Transaction>> {
        let res = self.client.get(self.url("transactions")?).send().await?;
        Self::data(res).await
    }

    pub async fn get_transaction(&self, trx: &str) -> anyhow::Result<Transaction> {
        let res = self
            .client
            .get(self.url(&format!("transactions/{trx}"))?)
            .send()
            .await?;
        Self::data(res).await
    }

    pub async fn create_transaction(
        &self,
        req: &TransactionRequest,
    ) -> anyhow::Result<Transaction> {
        let res = self
            .client
            .post(self.url("transactions")?)
            .json(req)
            .send()
            .await?;
        Self::data(res).await
    }

    pub async fn update_transaction(
        &self,
        trx: &str,
        update: &TransactionUpdate,
    ) -> anyhow::Result<Transaction> {
        let res = self
            .client
            .put(self.url(&format!("transactions/{trx}"))?)
            .json(update)
            .send()
            .await?;
        Self::data(res).await
    }

    pub async fn delete_transaction(&self, trx: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .delete(self.url(&format!("transactions/{trx}"))?)
            .send()
            .await?;
        Self::acknowledged(res).await
    }

    pub async fn transaction_report(&self) -> anyhow::Result<TransactionReport> {
        let res = self
            .client
            .get(self.url("reports/transactions")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn add_to_cart(&self, req: &CartRequest) -> anyhow::Result<()> {
        let res = self
            .client
            .post(self.url("cart/add")?)
            .json(req)
            .send()
            .await?;
        Self::acknowledged(res).await
    }

    pub async fn cart_items(&self, trx: &str) -> anyhow::Result<Vec<CartItem>> {
        let res = self
            .client
            .get(self.url(&format!("cart/{trx}"))?)
            .send()
            .await?;
        Self::data(res).await
    }

    pub async fn checkout(&self, req: &CheckoutRequest) -> anyhow::Result<CheckoutReceipt> {
        let res = self
            .client
            .post(self.url("cart/checkout")?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl ApotekClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<ApotekClient> {
        if let Some(client) = self.client {
            return Ok(ApotekClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(ApotekClient {
            base: self.base,
            client,
        })
    }
}
