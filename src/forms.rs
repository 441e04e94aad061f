use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl AddForm {
    /// Returns the trimmed title to search for.
    pub fn validate(&self) -> AppResult<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Movie title is required".into()));
        }
        Ok(title.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingInput {
    pub rating: f64,
    pub review: String,
}

impl EditForm {
    pub fn validate(&self) -> AppResult<RatingInput> {
        let rating = self.rating.trim();
        let review = self.review.trim();

        if rating.is_empty() {
            return Err(AppError::Validation("Your rating is required".into()));
        }
        if review.is_empty() {
            return Err(AppError::Validation("Your review is required".into()));
        }

        let Some(rating) = rating.parse::<f64>().ok().filter(|r| r.is_finite()) else {
            return Err(AppError::Conversion(format!("\"{rating}\" is not a number, e.g. 7.5")));
        };

        Ok(RatingInput { rating, review: review.to_string() })
    }
}
