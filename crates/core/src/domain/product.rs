use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Closed set of catalog categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Electronics,
    Clothing,
    Home,
    Sports,
    Books,
    Beauty,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        CategoryId::Electronics,
        CategoryId::Clothing,
        CategoryId::Home,
        CategoryId::Sports,
        CategoryId::Books,
        CategoryId::Beauty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Home => "home",
            Self::Sports => "sports",
            Self::Books => "books",
            Self::Beauty => "beauty",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| category.as_str() == normalized)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prices are minor currency units (cents).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: CategoryId,
    pub subcategory: String,
    pub tags: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub image_url: String,
    pub in_stock: bool,
    #[serde(default)]
    pub bundle_eligible: Vec<ProductId>,
    pub popularity_score: f64,
}

impl Product {
    pub fn has_discount(&self) -> bool {
        self.original_price.is_some()
    }

    pub fn shares_tag_with(&self, other: &Product) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub related_categories: Vec<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::{CategoryId, ProductId};

    #[test]
    fn category_ids_use_lowercase_wire_names() {
        let encoded = serde_json::to_string(&CategoryId::Electronics).expect("serialize");
        assert_eq!(encoded, "\"electronics\"");

        let decoded: CategoryId = serde_json::from_str("\"beauty\"").expect("deserialize");
        assert_eq!(decoded, CategoryId::Beauty);
    }

    #[test]
    fn category_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(CategoryId::parse(" Sports "), Some(CategoryId::Sports));
        assert_eq!(CategoryId::parse("garden"), None);
    }

    #[test]
    fn product_id_serializes_as_bare_string() {
        let encoded = serde_json::to_string(&ProductId::new("elec-001")).expect("serialize");
        assert_eq!(encoded, "\"elec-001\"");
    }
}
