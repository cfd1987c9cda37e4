use crate::errors::AppError;
use apotek_types::domain::order::Order;
use apotek_types::ports::order_repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_rows_unchanged() {
        let repo = apotek_repo::memory::InMemoryOrderRepo::new();
        let row = serde_json::json!({ "id": 5, "customer_name": "Andi", "total": 42000 });
        repo.insert(Order::new(row.as_object().unwrap().clone()));

        let svc = OrderService::new(repo);
        let orders = svc.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(serde_json::to_value(&orders[0]).unwrap(), row);
    }
}
