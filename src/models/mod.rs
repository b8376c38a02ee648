mod filter;
mod recommendation;

pub use filter::{Criterion, ListQuery, RecommendationFilter};
pub use recommendation::{
    NewRecommendation, Recommendation, RecommendationUpdate, REC_SUCCESS_MAX, REC_SUCCESS_MIN,
};
