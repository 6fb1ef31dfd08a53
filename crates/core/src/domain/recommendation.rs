use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorName {
    #[serde(rename = "Category Affinity")]
    CategoryAffinity,
    #[serde(rename = "Price Range Fit")]
    PriceRangeFit,
    #[serde(rename = "Tag Affinity")]
    TagAffinity,
    #[serde(rename = "Popularity")]
    Popularity,
    #[serde(rename = "Recency Boost")]
    RecencyBoost,
}

impl FactorName {
    pub fn label(self) -> &'static str {
        match self {
            Self::CategoryAffinity => "Category Affinity",
            Self::PriceRangeFit => "Price Range Fit",
            Self::TagAffinity => "Tag Affinity",
            Self::Popularity => "Popularity",
            Self::RecencyBoost => "Recency Boost",
        }
    }
}

/// `weight` is the factor's contribution to the total score on a 0..1 scale,
/// not the raw sub-score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFactor {
    pub name: FactorName,
    pub weight: f64,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeType {
    BestMatch,
    Trending,
    Value,
    Complement,
    NewForYou,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub badge_text: String,
    pub badge_type: BadgeType,
}

impl Badge {
    pub fn new(text: &str, badge_type: BadgeType) -> Self {
        Self { badge_text: text.to_owned(), badge_type }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendation {
    pub product_id: ProductId,
    pub score: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub badge_text: String,
    pub badge_type: BadgeType,
    pub factors: Vec<RecommendationFactor>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationKind {
    Bundle,
    Alternative,
    RemoveDuplicate,
    PriceAlert,
    QuantityDiscount,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOptimization {
    #[serde(rename = "type")]
    pub kind: OptimizationKind,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub affected_product_ids: Vec<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_saving: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::{CartOptimization, FactorName, OptimizationKind, RecommendationFactor};
    use crate::domain::product::ProductId;

    #[test]
    fn factor_names_serialize_with_display_labels() {
        let factor = RecommendationFactor {
            name: FactorName::PriceRangeFit,
            weight: 0.2,
            detail: "Price fit: 80%".to_owned(),
        };
        let encoded = serde_json::to_value(&factor).expect("serialize");

        assert_eq!(encoded["name"], FactorName::PriceRangeFit.label());
    }

    #[test]
    fn optimization_omits_absent_suggestion_and_saving() {
        let optimization = CartOptimization {
            kind: OptimizationKind::RemoveDuplicate,
            title: "Similar items detected".to_owned(),
            description: String::new(),
            confidence: 0.55,
            affected_product_ids: vec![ProductId::new("a"), ProductId::new("b")],
            suggested_product_id: None,
            estimated_saving: None,
        };
        let encoded = serde_json::to_value(&optimization).expect("serialize");

        assert_eq!(encoded["type"], "remove-duplicate");
        assert!(encoded.get("suggestedProductId").is_none());
        assert!(encoded.get("estimatedSaving").is_none());
    }
}
