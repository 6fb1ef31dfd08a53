use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::domain::recommendation::{ProductRecommendation, RecommendationFactor};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    #[default]
    Home,
    Products,
    ProductDetail,
    Cart,
}

/// Where the shopper is and what they already hold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    pub current_page: PageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_product_id: Option<ProductId>,
    #[serde(default)]
    pub cart_product_ids: Vec<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl RecommendationContext {
    pub fn new(current_page: PageKind) -> Self {
        Self { current_page, ..Self::default() }
    }

    pub fn with_current_product(mut self, product_id: ProductId) -> Self {
        self.current_product_id = Some(product_id);
        self
    }

    pub fn with_cart_products(mut self, product_ids: Vec<ProductId>) -> Self {
        self.cart_product_ids = product_ids;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A product with its penalised total score and factor breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    pub score: f64,
    pub factors: Vec<RecommendationFactor>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub context: RecommendationContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_query: Option<String>,
}

impl RecommendRequest {
    pub fn new(context: RecommendationContext) -> Self {
        Self { context, chat_query: None }
    }

    pub fn with_chat_query(mut self, query: impl Into<String>) -> Self {
        self.chat_query = Some(query.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub recommendations: Vec<ProductRecommendation>,
    pub message: String,
    pub confidence: f64,
    pub session_insight: String,
}
