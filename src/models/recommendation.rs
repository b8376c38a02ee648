use serde::{Deserialize, Serialize};

/// Upper bound reached by repeated likes
pub const REC_SUCCESS_MAX: i32 = 100;

/// Lower bound reached by repeated dislikes
pub const REC_SUCCESS_MIN: i32 = 0;

/// A stored product recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Recommendation {
    /// Identifier assigned by the store on creation
    pub id: i32,
    pub product_id: i32,
    pub customer_id: i32,
    pub product_name: String,
    pub recommendation_name: String,
    /// Product being recommended alongside `product_id`
    pub recommend_product_id: i32,
    /// e.g. "Up-Sell", "Down-Sell", "Cross-Sell"
    pub recommend_type: String,
    /// Success score moved by the like/dislike endpoints
    pub rec_success: i32,
}

/// Payload accepted when creating a recommendation; every field is required
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRecommendation {
    pub product_id: i32,
    pub customer_id: i32,
    pub product_name: String,
    pub recommendation_name: String,
    pub recommend_product_id: i32,
    pub recommend_type: String,
    pub rec_success: i32,
}

impl NewRecommendation {
    /// Builds the stored record once the store has picked an id
    pub fn with_id(self, id: i32) -> Recommendation {
        Recommendation {
            id,
            product_id: self.product_id,
            customer_id: self.customer_id,
            product_name: self.product_name,
            recommendation_name: self.recommendation_name,
            recommend_product_id: self.recommend_product_id,
            recommend_type: self.recommend_type,
            rec_success: self.rec_success,
        }
    }
}

/// Partial update: only the fields present are written
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend_product_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rec_success: Option<i32>,
}

impl RecommendationUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.customer_id.is_none()
            && self.product_name.is_none()
            && self.recommendation_name.is_none()
            && self.recommend_product_id.is_none()
            && self.recommend_type.is_none()
            && self.rec_success.is_none()
    }
}

impl Recommendation {
    /// Merges the present fields of `update` into this record; `id` is never touched
    pub fn apply(&mut self, update: RecommendationUpdate) {
        if let Some(product_id) = update.product_id {
            self.product_id = product_id;
        }
        if let Some(customer_id) = update.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(product_name) = update.product_name {
            self.product_name = product_name;
        }
        if let Some(recommendation_name) = update.recommendation_name {
            self.recommendation_name = recommendation_name;
        }
        if let Some(recommend_product_id) = update.recommend_product_id {
            self.recommend_product_id = recommend_product_id;
        }
        if let Some(recommend_type) = update.recommend_type {
            self.recommend_type = recommend_type;
        }
        if let Some(rec_success) = update.rec_success {
            self.rec_success = rec_success;
        }
    }

    /// Bumps `rec_success` unless it already sits at the ceiling.
    /// Returns whether the value changed.
    pub fn like(&mut self) -> bool {
        if self.rec_success < REC_SUCCESS_MAX {
            self.rec_success += 1;
            true
        } else {
            false
        }
    }

    /// Lowers `rec_success` unless it already sits at the floor.
    /// Returns whether the value changed.
    pub fn dislike(&mut self) -> bool {
        if self.rec_success > REC_SUCCESS_MIN {
            self.rec_success -= 1;
            true
        } else {
            false
        }
    }
}
