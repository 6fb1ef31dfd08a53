//! Multi-factor product recommendations.
//!
//! Every in-stock product is scored against the session profile with five
//! weighted factors (category affinity, price fit, tag affinity, popularity
//! and recency), penalised for cart/self/last-viewed matches, then ranked by
//! [`RecommendationEngine`].

mod engine;
mod scoring;
mod types;

pub use engine::RecommendationEngine;
pub use scoring::{apply_query_filter, determine_badge, ScoreCalculator, ScoringWeights};
pub use types::*;

/// Fixed factor weights; they sum to 1.0.
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    category_affinity: 0.30,
    price_range_fit: 0.25,
    tag_affinity: 0.20,
    popularity: 0.15,
    recency_boost: 0.10,
};

pub const MAX_RECOMMENDATIONS: usize = 6;

/// Total score at or above which a product is always badged as the best match.
pub const BEST_MATCH_THRESHOLD: f64 = 85.0;

pub const IN_CART_PENALTY: f64 = 30.0;
pub const CURRENT_PRODUCT_PENALTY: f64 = 50.0;
pub const LAST_VIEWED_PENALTY: f64 = 20.0;

/// Share of a related category's affinity that carries over.
pub const RELATED_CATEGORY_SHARE: f64 = 0.4;
