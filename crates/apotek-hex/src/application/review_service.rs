use crate::errors::AppError;
use apotek_types::domain::review::{Review, ReviewForm};
use apotek_types::ports::review_repository::ReviewRepository;

const NOT_FOUND: &str = "Review not found";

pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_review(&self, form: ReviewForm) -> Result<Review, AppError> {
        let review = form
            .into_review()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let review = self.repo.create(review).await?;
        tracing::info!(id = %review.id, product_id = review.product_id, "review created");
        Ok(review)
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn reviews_for_product(&self, product_id: i64) -> Result<Vec<Review>, AppError> {
        Ok(self.repo.list_by_product(product_id).await?)
    }

    pub async fn update_review(&self, id: &str, form: ReviewForm) -> Result<(), AppError> {
        let edit = form
            .into_edit()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if !self.repo.update(id, edit).await? {
            return Err(AppError::NotFound(NOT_FOUND.into()));
        }
        tracing::info!(id, "review updated");
        Ok(())
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(NOT_FOUND.into()));
        }
        tracing::info!(id, "review deleted");
        Ok(())
    }
}
