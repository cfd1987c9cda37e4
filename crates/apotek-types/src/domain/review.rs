use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::present;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_id: i64,
    pub review: String,
    pub rating: i64,
}

/// Form body of `POST /reviews` and `PUT /review/{id}`; the update ignores
/// `product_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    pub product_id: Option<i64>,
    pub review: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEdit {
    pub review: String,
    pub rating: i64,
}

fn check_rating(rating: i64) -> anyhow::Result<i64> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        anyhow::bail!("Rating must be {}-{}", MIN_RATING, MAX_RATING);
    }
    Ok(rating)
}

impl ReviewForm {
    pub fn into_edit(self) -> anyhow::Result<ReviewEdit> {
        match (present(self.review), self.rating) {
            (Some(review), Some(rating)) => Ok(ReviewEdit {
                review,
                rating: check_rating(rating)?,
            }),
            _ => anyhow::bail!("review and rating are required"),
        }
    }

    /// A fresh review with a generated id.
    pub fn into_review(self) -> anyhow::Result<Review> {
        let product_id = match self.product_id {
            Some(id) => id,
            None => anyhow::bail!("product_id, review, and rating are required"),
        };
        let edit = self.into_edit()?;
        Ok(Review {
            id: Uuid::new_v4().to_string(),
            product_id,
            review: edit.review,
            rating: edit.rating,
        })
    }
}

impl Review {
    pub fn apply(&mut self, edit: ReviewEdit) {
        self.review = edit.review;
        self.rating = edit.rating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        let form = |rating| ReviewForm {
            product_id: Some(3),
            review: Some("manjur".into()),
            rating: Some(rating),
        };
        assert!(form(0).into_review().is_err());
        assert!(form(6).into_review().is_err());
        assert_eq!(form(1).into_review().unwrap().rating, 1);
        assert_eq!(form(5).into_review().unwrap().rating, 5);
    }

    #[test]
    fn id_serializes_as_underscore_id() {
        let review = ReviewForm {
            product_id: Some(3),
            review: Some("manjur".into()),
            rating: Some(4),
        }
        .into_review()
        .unwrap();
        let body = serde_json::to_value(&review).unwrap();
        assert_eq!(body["_id"], review.id.as_str());
        assert_eq!(body["product_id"], 3);
    }
}
