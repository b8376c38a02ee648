use serde::Deserialize;

use crate::error::{AppError, AppResult};

use super::Recommendation;

/// A single field/value predicate over recommendations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    ProductId(i32),
    CustomerId(i32),
    ProductName(String),
    RecommendationName(String),
    RecommendProductId(i32),
    RecommendType(String),
    RecSuccess(i32),
    /// Inclusive lower bound on `rec_success`
    RecSuccessMin(i32),
    /// Inclusive upper bound on `rec_success`
    RecSuccessMax(i32),
}

impl Criterion {
    pub fn matches(&self, rec: &Recommendation) -> bool {
        match self {
            Criterion::ProductId(v) => rec.product_id == *v,
            Criterion::CustomerId(v) => rec.customer_id == *v,
            Criterion::ProductName(v) => rec.product_name == *v,
            Criterion::RecommendationName(v) => rec.recommendation_name == *v,
            Criterion::RecommendProductId(v) => rec.recommend_product_id == *v,
            Criterion::RecommendType(v) => rec.recommend_type == *v,
            Criterion::RecSuccess(v) => rec.rec_success == *v,
            Criterion::RecSuccessMin(v) => rec.rec_success >= *v,
            Criterion::RecSuccessMax(v) => rec.rec_success <= *v,
        }
    }
}

/// Conjunction of criteria; an empty filter matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationFilter {
    criteria: Vec<Criterion>,
}

impl RecommendationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, rec: &Recommendation) -> bool {
        self.criteria.iter().all(|c| c.matches(rec))
    }
}

impl From<Criterion> for RecommendationFilter {
    fn from(criterion: Criterion) -> Self {
        Self::new().and(criterion)
    }
}

/// Raw query string of `GET /recommendations`
///
/// Values stay strings here so that each one can be rejected with a
/// message naming the offending field.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub product_id: Option<String>,
    pub customer_id: Option<String>,
    pub recommend_type: Option<String>,
    pub recommend_product_id: Option<String>,
    pub product_name: Option<String>,
    pub recommendation_name: Option<String>,
    pub rec_success_min: Option<String>,
    pub rec_success_max: Option<String>,
}

impl ListQuery {
    /// Validates the query and turns it into a store filter
    pub fn into_filter(self, recommend_types: &[String]) -> AppResult<RecommendationFilter> {
        let mut filter = RecommendationFilter::new();

        if let Some(v) = parse_non_negative("product_id", self.product_id)? {
            filter = filter.and(Criterion::ProductId(v));
        }
        if let Some(v) = parse_non_negative("customer_id", self.customer_id)? {
            filter = filter.and(Criterion::CustomerId(v));
        }
        if let Some(v) = non_empty(self.recommend_type) {
            if !recommend_types.iter().any(|t| *t == v) {
                return Err(AppError::InvalidInput(format!(
                    "recommend_type must be one of: {}",
                    recommend_types.join(", ")
                )));
            }
            filter = filter.and(Criterion::RecommendType(v));
        }
        if let Some(v) = parse_non_negative("recommend_product_id", self.recommend_product_id)? {
            filter = filter.and(Criterion::RecommendProductId(v));
        }
        if let Some(v) = non_empty(self.product_name) {
            filter = filter.and(Criterion::ProductName(v));
        }
        if let Some(v) = non_empty(self.recommendation_name) {
            filter = filter.and(Criterion::RecommendationName(v));
        }

        let min = parse_non_negative("rec_success_min", self.rec_success_min)?;
        let max = parse_non_negative("rec_success_max", self.rec_success_max)?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(AppError::InvalidInput(
                    "rec_success_min cannot be greater than rec_success_max".to_string(),
                ));
            }
        }
        if let Some(min) = min {
            filter = filter.and(Criterion::RecSuccessMin(min));
        }
        if let Some(max) = max {
            filter = filter.and(Criterion::RecSuccessMax(max));
        }

        Ok(filter)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_non_negative(field: &str, value: Option<String>) -> AppResult<Option<i32>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!(
            "{} must be a non-negative integer",
            field
        )));
    }

    raw.parse::<i32>().map(Some).map_err(|_| {
        AppError::InvalidInput(format!("{} must be a non-negative integer", field))
    })
}
