use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBursary {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBursary {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub provider: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BursaryListParams {
    /// Substring match on the title
    pub search: Option<String>,
}
