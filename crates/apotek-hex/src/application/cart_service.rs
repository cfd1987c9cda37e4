use crate::errors::AppError;
use apotek_types::domain::cart::{CartItem, CartRequest, CheckoutReceipt, CheckoutRequest};
use apotek_types::ports::cart_repository::CartRepository;

const ITEM_NOT_FOUND: &str = "Cart item not found";

pub struct CartService<R: CartRepository> {
    repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn add_item(&self, req: CartRequest) -> Result<(), AppError> {
        let (trx, item) = req
            .into_addition()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.repo.push(&trx, item).await?;
        tracing::info!(%trx, "cart item added");
        Ok(())
    }

    pub async fn items(&self, trx: &str) -> Result<Vec<CartItem>, AppError> {
        Ok(self.repo.items(trx).await?)
    }

    pub async fn update_item(&self, req: CartRequest) -> Result<(), AppError> {
        let (trx, index, item) = req
            .into_replacement()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if !self.repo.set(&trx, index, item).await? {
            return Err(AppError::NotFound(ITEM_NOT_FOUND.into()));
        }
        tracing::info!(%trx, index, "cart item updated");
        Ok(())
    }

    pub async fn remove_item(&self, trx: &str, index: usize) -> Result<(), AppError> {
        if !self.repo.remove(trx, index).await? {
            return Err(AppError::NotFound(ITEM_NOT_FOUND.into()));
        }
        tracing::info!(trx, index, "cart item removed");
        Ok(())
    }

    /// Echoes the cart back with the payment details; the cart is left intact.
    pub async fn checkout(&self, req: CheckoutRequest) -> Result<CheckoutReceipt, AppError> {
        let (trx, payment_method, note) = req
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let items = self.repo.items(&trx).await?;
        Ok(CheckoutReceipt {
            success: true,
            trx,
            items,
            payment_method,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apotek_repo::memory::InMemoryCartRepo;
    use apotek_types::domain::cart::ProductRef;

    fn add(trx: &str, product: i64, qty: i64) -> CartRequest {
        CartRequest {
            trx: Some(trx.into()),
            index: None,
            product_id: Some(ProductRef::Id(product)),
            qty: Some(qty),
        }
    }

    #[tokio::test]
    async fn add_update_remove_flow() {
        let svc = CartService::new(InMemoryCartRepo::new());
        svc.add_item(add("T1", 1, 2)).await.unwrap();
        svc.add_item(add("T1", 2, 1)).await.unwrap();

        let mut replace = add("T1", 3, 4);
        replace.index = Some(0);
        svc.update_item(replace).await.unwrap();

        let items = svc.items("T1").await.unwrap();
        assert_eq!(items[0].product_id, ProductRef::Id(3));
        assert_eq!(items.len(), 2);

        svc.remove_item("T1", 1).await.unwrap();
        assert_eq!(svc.items("T1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_index_is_not_found() {
        let svc = CartService::new(InMemoryCartRepo::new());
        svc.add_item(add("T1", 1, 2)).await.unwrap();
        let mut replace = add("T1", 3, 4);
        replace.index = Some(3);
        assert!(matches!(
            svc.update_item(replace).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.remove_item("T1", 1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn checkout_echoes_without_clearing() {
        let svc = CartService::new(InMemoryCartRepo::new());
        svc.add_item(add("T1", 1, 2)).await.unwrap();
        let receipt = svc
            .checkout(CheckoutRequest {
                trx: Some("T1".into()),
                payment_method: Some("qris".into()),
                note: None,
            })
            .await
            .unwrap();
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.payment_method, "qris");
        assert_eq!(svc.items("T1").await.unwrap().len(), 1);

        let missing = svc
            .checkout(CheckoutRequest {
                trx: Some("T1".into()),
                payment_method: None,
                note: None,
            })
            .await;
        assert!(matches!(missing, Err(AppError::BadRequest(_))));
    }
}
