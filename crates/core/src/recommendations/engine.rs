//! Ranks the catalog for a session and assembles the recommendation response.

use std::cmp::Ordering;

use super::scoring::{apply_query_filter, determine_badge, ScoreCalculator};
use super::types::{PageKind, RecommendRequest, RecommendResponse, RecommendationContext, ScoredProduct};
use super::MAX_RECOMMENDATIONS;
use crate::advisor::round_to_hundredths;
use crate::catalog::Catalog;
use crate::confidence::calculate_confidence;
use crate::domain::recommendation::ProductRecommendation;
use crate::domain::session::SessionProfile;
use crate::narrative;

const EMPTY_RESPONSE_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    calculator: ScoreCalculator,
    default_limit: usize,
    max_limit: usize,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            calculator: ScoreCalculator::new(),
            default_limit: MAX_RECOMMENDATIONS,
            max_limit: usize::MAX,
        }
    }

    pub fn with_calculator(mut self, calculator: ScoreCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Limit used when a request names none, and the ceiling any request is clamped to.
    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }

    /// Scores every in-stock product in catalog order.
    pub fn score_all_products(
        &self,
        profile: &SessionProfile,
        context: &RecommendationContext,
    ) -> Vec<ScoredProduct<'a>> {
        self.catalog
            .all_products()
            .iter()
            .filter(|product| product.in_stock)
            .map(|product| self.calculator.score_product(product, profile, self.catalog, context))
            .collect()
    }

    /// Filters, ranks and explains products for one request.
    ///
    /// A chat query narrows the ranking only when it matches something. Cart
    /// products are dropped everywhere except on the cart page.
    pub fn recommend(&self, profile: &SessionProfile, request: &RecommendRequest) -> RecommendResponse {
        let context = &request.context;
        let query = request.chat_query.as_deref().filter(|query| !query.is_empty());

        let mut scored = self.score_all_products(profile, context);
        if let Some(query) = query {
            let filtered = apply_query_filter(scored.clone(), query);
            if !filtered.is_empty() {
                scored = filtered;
            }
        }

        if context.current_page != PageKind::Cart {
            scored.retain(|candidate| !context.cart_product_ids.contains(&candidate.product.id));
        }

        scored.sort_by(|left, right| right.score.partial_cmp(&left.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.resolve_limit(context.limit));

        let recommendations: Vec<ProductRecommendation> = scored
            .into_iter()
            .map(|candidate| self.explain(profile, candidate))
            .collect();

        let confidence = if recommendations.is_empty() {
            EMPTY_RESPONSE_CONFIDENCE
        } else {
            recommendations.iter().map(|recommendation| recommendation.confidence).sum::<f64>()
                / recommendations.len() as f64
        };

        RecommendResponse {
            message: narrative::conversational_response(&recommendations, query, profile, self.catalog),
            session_insight: narrative::session_insight(profile, self.catalog),
            confidence: round_to_hundredths(confidence),
            recommendations,
        }
    }

    fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    fn explain(&self, profile: &SessionProfile, candidate: ScoredProduct<'a>) -> ProductRecommendation {
        let badge = determine_badge(candidate.product, candidate.score, &candidate.factors);
        let confidence = calculate_confidence(profile, &candidate.factors);
        let reasoning =
            narrative::generate_reasoning(candidate.product, &candidate.factors, profile, self.catalog);

        ProductRecommendation {
            product_id: candidate.product.id.clone(),
            score: candidate.score.round(),
            confidence: round_to_hundredths(confidence),
            reasoning,
            badge_text: badge.badge_text,
            badge_type: badge.badge_type,
            factors: candidate.factors,
        }
    }
}
