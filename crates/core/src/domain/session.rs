use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::product::{CategoryId, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSensitivity {
    Budget,
    Moderate,
    Premium,
    #[default]
    Indifferent,
}

impl PriceSensitivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Premium => "premium",
            Self::Indifferent => "indifferent",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub sensitivity: PriceSensitivity,
}

/// Per-session learning state. `category_affinity` and `price_range.sensitivity`
/// are derived fields and only `crate::learner` writes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub session_id: SessionId,
    pub started_at: i64,
    pub last_interaction_at: i64,
    pub viewed_product_ids: Vec<ProductId>,
    pub viewed_categories: BTreeMap<CategoryId, u32>,
    pub category_affinity: BTreeMap<CategoryId, f64>,
    pub tag_affinity: BTreeMap<String, f64>,
    pub price_range: PriceRange,
    pub search_queries: Vec<String>,
    pub cart_history: Vec<ProductId>,
    pub interaction_count: u64,
}

impl SessionProfile {
    pub fn empty(session_id: SessionId, now_ms: i64) -> Self {
        Self {
            session_id,
            started_at: now_ms,
            last_interaction_at: now_ms,
            viewed_product_ids: Vec::new(),
            viewed_categories: BTreeMap::new(),
            category_affinity: BTreeMap::new(),
            tag_affinity: BTreeMap::new(),
            price_range: PriceRange::default(),
            search_queries: Vec::new(),
            cart_history: Vec::new(),
            interaction_count: 0,
        }
    }

    pub fn category_views(&self, category: CategoryId) -> u32 {
        self.viewed_categories.get(&category).copied().unwrap_or(0)
    }

    pub fn affinity_for(&self, category: CategoryId) -> f64 {
        self.category_affinity.get(&category).copied().unwrap_or(0.0)
    }

    pub fn tag_affinity_for(&self, tag: &str) -> f64 {
        self.tag_affinity.get(tag).copied().unwrap_or(0.0)
    }

    pub fn last_viewed(&self) -> Option<&ProductId> {
        self.viewed_product_ids.last()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    View,
    AddToCart,
    RemoveFromCart,
    Search,
    Chat,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::AddToCart => "add-to-cart",
            Self::RemoveFromCart => "remove-from-cart",
            Self::Search => "search",
            Self::Chat => "chat",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub timestamp: i64,
}

impl BehaviorEvent {
    pub fn view(product_id: impl Into<String>, timestamp: i64) -> Self {
        Self::for_product(EventKind::View, product_id, timestamp)
    }

    pub fn add_to_cart(product_id: impl Into<String>, timestamp: i64) -> Self {
        Self::for_product(EventKind::AddToCart, product_id, timestamp)
    }

    pub fn remove_from_cart(product_id: impl Into<String>, timestamp: i64) -> Self {
        Self::for_product(EventKind::RemoveFromCart, product_id, timestamp)
    }

    pub fn search(query: impl Into<String>, timestamp: i64) -> Self {
        Self {
            kind: EventKind::Search,
            product_id: None,
            category: None,
            query: Some(query.into()),
            timestamp,
        }
    }

    pub fn chat(message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            kind: EventKind::Chat,
            product_id: None,
            category: None,
            query: Some(message.into()),
            timestamp,
        }
    }

    fn for_product(kind: EventKind, product_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            kind,
            product_id: Some(ProductId(product_id.into())),
            category: None,
            query: None,
            timestamp,
        }
    }
}
