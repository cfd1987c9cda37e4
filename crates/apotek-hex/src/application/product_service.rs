use crate::errors::AppError;
use apotek_types::domain::product::{Product, ProductRequest};
use apotek_types::ports::product_repository::ProductRepository;

const NOT_FOUND: &str = "Product not found";

pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    pub async fn create_product(&self, req: ProductRequest) -> Result<Product, AppError> {
        let new = req
            .into_new()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let product = self.repo.create(new).await?;
        tracing::info!(id = product.id, "product created");
        Ok(product)
    }

    pub async fn update_product(&self, req: ProductRequest) -> Result<Product, AppError> {
        let (id, changes) = req
            .into_update()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let product = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        tracing::info!(id, "product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            tracing::info!(id, "product deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(NOT_FOUND.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> ProductRequest {
        ProductRequest {
            id: None,
            name: Some(name.into()),
            category: Some("vitamin".into()),
            price: Some(15000),
            stock: Some(8),
        }
    }

    #[tokio::test]
    async fn create_and_get_product_in_memory() {
        let svc = ProductService::new(apotek_repo::memory::InMemoryProductRepo::new());
        let created = svc.create_product(request("Vitamin C")).await.unwrap();
        let got = svc.get_product(created.id).await.unwrap();
        assert_eq!(got, created);
        assert_eq!(got.price, 15000);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let svc = ProductService::new(apotek_repo::memory::InMemoryProductRepo::new());
        let created = svc.create_product(request("Vitamin C")).await.unwrap();

        let mut changes = request("Vitamin C 1000");
        changes.id = Some(created.id);
        changes.stock = Some(0);
        let updated = svc.update_product(changes).await.unwrap();
        assert_eq!(updated.stock, 0);
        assert_eq!(svc.get_product(created.id).await.unwrap(), updated);

        svc.delete_product(created.id).await.unwrap();
        let missing = svc.get_product(created.id).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn validation_errors_propagate() {
        let svc = ProductService::new(apotek_repo::memory::InMemoryProductRepo::new());
        let mut req = request("Vitamin C");
        req.category = None;
        let res = svc.create_product(req).await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));

        let res = svc.update_product(request("no id")).await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn not_found_paths() {
        let svc = ProductService::new(apotek_repo::memory::InMemoryProductRepo::new());
        assert!(matches!(
            svc.get_product(404).await,
            Err(AppError::NotFound(_))
        ));
        let mut req = request("ghost");
        req.id = Some(404);
        assert!(matches!(
            svc.update_product(req).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_product(404).await,
            Err(AppError::NotFound(_))
        ));
    }
}
