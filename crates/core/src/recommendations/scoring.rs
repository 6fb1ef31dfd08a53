//! Factor scoring, penalties, badges and query filtering.

use std::collections::BTreeSet;

use super::types::{RecommendationContext, ScoredProduct};
use super::{
    BEST_MATCH_THRESHOLD, CURRENT_PRODUCT_PENALTY, IN_CART_PENALTY, LAST_VIEWED_PENALTY,
    RELATED_CATEGORY_SHARE,
};
use crate::catalog::Catalog;
use crate::domain::product::{CategoryId, Product};
use crate::domain::recommendation::{Badge, BadgeType, FactorName, RecommendationFactor};
use crate::domain::session::SessionProfile;

const NEUTRAL_PRICE_FIT: f64 = 50.0;
const RECENT_WINDOW: usize = 3;
const RECENT_CATEGORY_BOOST: f64 = 60.0;
const RECENT_TAG_BOOST: f64 = 15.0;
const RECENT_TAG_CAP: f64 = 40.0;

/// Weights for scoring components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub category_affinity: f64,
    pub price_range_fit: f64,
    pub tag_affinity: f64,
    pub popularity: f64,
    pub recency_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Sub-scores on a 0..100 scale (popularity may exceed 100 for outliers).
#[derive(Debug, Clone, Copy, PartialEq)]
struct FactorScores {
    category_affinity: f64,
    price_range_fit: f64,
    tag_affinity: f64,
    popularity: f64,
    recency_boost: f64,
}

#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Direct affinity plus a share of each related category's affinity.
    pub fn category_affinity_score(
        &self,
        product: &Product,
        profile: &SessionProfile,
        catalog: &Catalog,
    ) -> f64 {
        let direct = profile.affinity_for(product.category);
        let related: f64 = catalog
            .related_categories(product.category)
            .iter()
            .map(|category| profile.affinity_for(*category) * RELATED_CATEGORY_SHARE)
            .sum();
        ((direct + related) * 100.0).min(100.0)
    }

    /// Gaussian falloff around the browsing average, normalised by the
    /// observed range. Neutral until a price has been seen.
    pub fn price_range_fit_score(&self, product: &Product, profile: &SessionProfile) -> f64 {
        let range = &profile.price_range;
        if range.average == 0.0 {
            return NEUTRAL_PRICE_FIT;
        }
        let spread = range.max - range.min;
        let spread = if spread == 0.0 { 1.0 } else { spread };
        let distance = (product.price - range.average).abs() / spread;
        (100.0 * (-2.0 * distance * distance).exp()).max(0.0)
    }

    pub fn tag_affinity_score(&self, product: &Product, profile: &SessionProfile) -> f64 {
        if product.tags.is_empty() {
            return 0.0;
        }
        let total: f64 = product.tags.iter().map(|tag| profile.tag_affinity_for(tag)).sum();
        (total / product.tags.len() as f64 * 100.0).min(100.0)
    }

    pub fn popularity_score(&self, product: &Product) -> f64 {
        product.popularity_score * 0.8 + product.rating * 4.0
    }

    /// Boost for sharing a category or tags with the last few viewed products.
    pub fn recency_boost_score(
        &self,
        product: &Product,
        profile: &SessionProfile,
        catalog: &Catalog,
    ) -> f64 {
        let start = profile.viewed_product_ids.len().saturating_sub(RECENT_WINDOW);
        let recent: Vec<&Product> = profile.viewed_product_ids[start..]
            .iter()
            .filter_map(|id| catalog.product(id))
            .collect();
        let recent_categories: BTreeSet<CategoryId> =
            recent.iter().map(|viewed| viewed.category).collect();
        let recent_tags: BTreeSet<&str> =
            recent.iter().flat_map(|viewed| viewed.tags.iter().map(String::as_str)).collect();

        let mut boost = 0.0;
        if recent_categories.contains(&product.category) {
            boost += RECENT_CATEGORY_BOOST;
        }
        let overlap = product.tags.iter().filter(|tag| recent_tags.contains(tag.as_str())).count();
        boost += (overlap as f64 * RECENT_TAG_BOOST).min(RECENT_TAG_CAP);
        boost.min(100.0)
    }

    /// Weighted sum of the factor scores minus stacked penalties, floored at 0.
    pub fn score_product<'a>(
        &self,
        product: &'a Product,
        profile: &SessionProfile,
        catalog: &Catalog,
        context: &RecommendationContext,
    ) -> ScoredProduct<'a> {
        let scores = FactorScores {
            category_affinity: self.category_affinity_score(product, profile, catalog),
            price_range_fit: self.price_range_fit_score(product, profile),
            tag_affinity: self.tag_affinity_score(product, profile),
            popularity: self.popularity_score(product),
            recency_boost: self.recency_boost_score(product, profile, catalog),
        };

        let mut score = self.calculate_total_score(&scores);
        if context.cart_product_ids.contains(&product.id) {
            score -= IN_CART_PENALTY;
        }
        if context.current_product_id.as_ref() == Some(&product.id) {
            score -= CURRENT_PRODUCT_PENALTY;
        }
        if profile.last_viewed() == Some(&product.id) {
            score -= LAST_VIEWED_PENALTY;
        }

        ScoredProduct {
            product,
            score: score.max(0.0),
            factors: self.build_factors(product, &scores, catalog),
        }
    }

    fn calculate_total_score(&self, scores: &FactorScores) -> f64 {
        scores.category_affinity * self.weights.category_affinity
            + scores.price_range_fit * self.weights.price_range_fit
            + scores.tag_affinity * self.weights.tag_affinity
            + scores.popularity * self.weights.popularity
            + scores.recency_boost * self.weights.recency_boost
    }

    fn build_factors(
        &self,
        product: &Product,
        scores: &FactorScores,
        catalog: &Catalog,
    ) -> Vec<RecommendationFactor> {
        let factor = |name, score: f64, weight: f64, detail: String| RecommendationFactor {
            name,
            weight: score / 100.0 * weight,
            detail,
        };

        vec![
            factor(
                FactorName::CategoryAffinity,
                scores.category_affinity,
                self.weights.category_affinity,
                format!(
                    "{} affinity: {}%",
                    catalog.category_name(product.category),
                    scores.category_affinity.round()
                ),
            ),
            factor(
                FactorName::PriceRangeFit,
                scores.price_range_fit,
                self.weights.price_range_fit,
                format!("Price fit: {}%", scores.price_range_fit.round()),
            ),
            factor(
                FactorName::TagAffinity,
                scores.tag_affinity,
                self.weights.tag_affinity,
                format!("Tag match: {}%", scores.tag_affinity.round()),
            ),
            factor(
                FactorName::Popularity,
                scores.popularity,
                self.weights.popularity,
                format!("Popularity: {}%", scores.popularity.round()),
            ),
            factor(
                FactorName::RecencyBoost,
                scores.recency_boost,
                self.weights.recency_boost,
                format!("Recency: {}%", scores.recency_boost.round()),
            ),
        ]
    }
}

/// First factor with the highest weight, in breakdown order.
pub(crate) fn top_factor(factors: &[RecommendationFactor]) -> Option<&RecommendationFactor> {
    let mut best: Option<&RecommendationFactor> = None;
    for candidate in factors {
        if best.map_or(true, |current| candidate.weight > current.weight) {
            best = Some(candidate);
        }
    }
    best
}

pub fn determine_badge(product: &Product, score: f64, factors: &[RecommendationFactor]) -> Badge {
    if score >= BEST_MATCH_THRESHOLD {
        return Badge::new("Best for You", BadgeType::BestMatch);
    }

    match top_factor(factors).map(|factor| factor.name) {
        Some(FactorName::PriceRangeFit) if product.has_discount() => {
            Badge::new("Great Value", BadgeType::Value)
        }
        Some(FactorName::Popularity) => Badge::new("Trending", BadgeType::Trending),
        Some(FactorName::TagAffinity) => Badge::new("Similar to Viewed", BadgeType::Complement),
        Some(FactorName::CategoryAffinity) => Badge::new("Best for You", BadgeType::BestMatch),
        _ => Badge::new("New for You", BadgeType::NewForYou),
    }
}

/// Keeps products whose searchable text contains any query term longer than
/// two characters. Case-insensitive substring match, no ranking.
pub fn apply_query_filter<'a>(scored: Vec<ScoredProduct<'a>>, query: &str) -> Vec<ScoredProduct<'a>> {
    let lowered = query.to_lowercase();
    let terms: Vec<&str> =
        lowered.split_whitespace().filter(|term| term.chars().count() > 2).collect();

    scored
        .into_iter()
        .filter(|candidate| {
            let product = candidate.product;
            let mut searchable = vec![
                product.name.as_str(),
                product.description.as_str(),
                product.category.as_str(),
                product.subcategory.as_str(),
            ];
            searchable.extend(product.tags.iter().map(String::as_str));
            let searchable = searchable.join(" ").to_lowercase();
            terms.iter().any(|term| searchable.contains(*term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{apply_query_filter, determine_badge, top_factor, ScoreCalculator};
    use crate::catalog::Catalog;
    use crate::domain::product::{CategoryId, Product, ProductId};
    use crate::domain::recommendation::{BadgeType, FactorName, RecommendationFactor};
    use crate::domain::session::SessionProfile;
    use crate::learner::create_default_profile;
    use crate::recommendations::{PageKind, RecommendationContext, DEFAULT_WEIGHTS};

    fn sample(id: &str, category: CategoryId) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Wireless Gaming Mouse".to_owned(),
            description: "Precise sensor".to_owned(),
            price: 5_000.0,
            original_price: None,
            category,
            subcategory: "accessories".to_owned(),
            tags: vec!["wireless".to_owned(), "gaming".to_owned()],
            rating: 4.5,
            review_count: 100,
            image_url: String::new(),
            in_stock: true,
            bundle_eligible: Vec::new(),
            popularity_score: 50.0,
        }
    }

    fn factor(name: FactorName, weight: f64) -> RecommendationFactor {
        RecommendationFactor { name, weight, detail: String::new() }
    }

    fn profile_with_affinity(entries: &[(CategoryId, f64)]) -> SessionProfile {
        let mut profile = create_default_profile();
        for (category, affinity) in entries {
            profile.category_affinity.insert(*category, *affinity);
        }
        profile
    }

    #[test]
    fn weights_sum_to_one() {
        let w = DEFAULT_WEIGHTS;
        let sum = w.category_affinity + w.price_range_fit + w.tag_affinity + w.popularity
            + w.recency_boost;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn category_affinity_adds_related_share_and_caps() {
        let catalog = Catalog::seeded();
        let calculator = ScoreCalculator::new();
        let product = sample("x", CategoryId::Electronics);

        let profile =
            profile_with_affinity(&[(CategoryId::Electronics, 0.5), (CategoryId::Home, 0.5)]);
        let score = calculator.category_affinity_score(&product, &profile, &catalog);
        assert!((score - 70.0).abs() < 1e-9);

        let saturated = profile_with_affinity(&[(CategoryId::Electronics, 1.0)]);
        assert_eq!(calculator.category_affinity_score(&product, &saturated, &catalog), 100.0);
    }

    #[test]
    fn category_affinity_is_monotonic() {
        let catalog = Catalog::seeded();
        let calculator = ScoreCalculator::new();
        let product = sample("x", CategoryId::Books);

        let mut previous = -1.0;
        for step in 0..=10 {
            let affinity = f64::from(step) / 10.0;
            let profile = profile_with_affinity(&[(CategoryId::Books, affinity)]);
            let score = calculator.category_affinity_score(&product, &profile, &catalog);
            assert!(score > previous, "affinity {affinity} scored {score}");
            previous = score;
        }
    }

    #[test]
    fn price_fit_is_neutral_without_history_and_peaks_at_average() {
        let calculator = ScoreCalculator::new();
        let product = sample("x", CategoryId::Books);
        let mut profile = create_default_profile();
        assert_eq!(calculator.price_range_fit_score(&product, &profile), 50.0);

        profile.price_range.min = 4_000.0;
        profile.price_range.max = 6_000.0;
        profile.price_range.average = 5_000.0;
        assert!((calculator.price_range_fit_score(&product, &profile) - 100.0).abs() < 1e-9);

        profile.price_range.average = 3_000.0;
        let expected = 100.0 * (-2.0_f64).exp();
        assert!((calculator.price_range_fit_score(&product, &profile) - expected).abs() < 1e-9);
    }

    #[test]
    fn price_fit_handles_zero_width_range() {
        let calculator = ScoreCalculator::new();
        let product = sample("x", CategoryId::Books);
        let mut profile = create_default_profile();
        profile.price_range.min = 5_000.0;
        profile.price_range.max = 5_000.0;
        profile.price_range.average = 5_000.0;

        assert!((calculator.price_range_fit_score(&product, &profile) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn tag_affinity_is_mean_and_zero_for_untagged() {
        let calculator = ScoreCalculator::new();
        let mut product = sample("x", CategoryId::Books);
        let mut profile = create_default_profile();
        profile.tag_affinity.insert("wireless".to_owned(), 0.6);

        assert!((calculator.tag_affinity_score(&product, &profile) - 30.0).abs() < 1e-9);

        product.tags.clear();
        assert_eq!(calculator.tag_affinity_score(&product, &profile), 0.0);
    }

    #[test]
    fn recency_counts_category_and_tag_overlap() {
        let catalog = Catalog::seeded();
        let calculator = ScoreCalculator::new();
        let mut profile = create_default_profile();
        profile.viewed_product_ids = vec![ProductId::new("elec-001")];
        let mouse = catalog.product(&ProductId::new("elec-007")).expect("seeded");

        // Same category (60) plus one shared tag "wireless" (15).
        assert!((calculator.recency_boost_score(mouse, &profile, &catalog) - 75.0).abs() < 1e-9);

        let book = catalog.product(&ProductId::new("book-001")).expect("seeded");
        assert_eq!(calculator.recency_boost_score(book, &profile, &catalog), 0.0);
    }

    #[test]
    fn penalties_stack_and_floor_at_zero() {
        let catalog = Catalog::seeded();
        let calculator = ScoreCalculator::new();
        let product = catalog.product(&ProductId::new("elec-004")).expect("seeded");
        let mut profile = create_default_profile();
        profile.viewed_product_ids = vec![product.id.clone()];

        let unpenalised =
            calculator.score_product(product, &create_default_profile(), &catalog, &RecommendationContext::default());
        let context = RecommendationContext::new(PageKind::ProductDetail)
            .with_current_product(product.id.clone())
            .with_cart_products(vec![product.id.clone()]);
        let penalised = calculator.score_product(product, &profile, &catalog, &context);

        assert!(unpenalised.score > 0.0);
        assert_eq!(penalised.score, 0.0);
    }

    #[test]
    fn factor_weight_is_contribution_to_total() {
        let catalog = Catalog::seeded();
        let calculator = ScoreCalculator::new();
        let product = catalog.product(&ProductId::new("book-001")).expect("seeded");
        let profile = create_default_profile();

        let scored =
            calculator.score_product(product, &profile, &catalog, &RecommendationContext::default());
        let weight_total: f64 = scored.factors.iter().map(|factor| factor.weight).sum();

        assert_eq!(scored.factors.len(), 5);
        assert!((weight_total * 100.0 - scored.score).abs() < 1e-9);
        assert_eq!(scored.factors[1].detail, "Price fit: 50%");
        assert_eq!(scored.factors[0].detail, "Books affinity: 0%");
    }

    #[test]
    fn high_score_is_always_best_match() {
        let product = sample("x", CategoryId::Books);
        let badge = determine_badge(&product, 85.0, &[factor(FactorName::Popularity, 0.9)]);
        assert_eq!(badge.badge_type, BadgeType::BestMatch);
        assert_eq!(badge.badge_text, "Best for You");
    }

    #[test]
    fn discounted_price_fit_leader_is_great_value() {
        let mut product = sample("x", CategoryId::Books);
        product.original_price = Some(6_000.0);
        let factors = [factor(FactorName::PriceRangeFit, 0.25), factor(FactorName::Popularity, 0.1)];

        let badge = determine_badge(&product, 70.0, &factors);
        assert_eq!(badge.badge_type, BadgeType::Value);
        assert_eq!(badge.badge_text, "Great Value");

        product.original_price = None;
        assert_eq!(determine_badge(&product, 70.0, &factors).badge_type, BadgeType::NewForYou);
    }

    #[test]
    fn badge_follows_top_factor() {
        let product = sample("x", CategoryId::Books);
        let cases = [
            (FactorName::Popularity, BadgeType::Trending),
            (FactorName::TagAffinity, BadgeType::Complement),
            (FactorName::CategoryAffinity, BadgeType::BestMatch),
            (FactorName::RecencyBoost, BadgeType::NewForYou),
        ];
        for (leader, expected) in cases {
            let factors = [factor(FactorName::PriceRangeFit, 0.05), factor(leader, 0.2)];
            assert_eq!(determine_badge(&product, 40.0, &factors).badge_type, expected);
        }
        assert_eq!(determine_badge(&product, 40.0, &[]).badge_type, BadgeType::NewForYou);
    }

    #[test]
    fn top_factor_prefers_earliest_on_ties() {
        let factors = [factor(FactorName::TagAffinity, 0.2), factor(FactorName::Popularity, 0.2)];
        assert_eq!(top_factor(&factors).map(|f| f.name), Some(FactorName::TagAffinity));
    }

    #[test]
    fn query_filter_matches_any_long_term_as_substring() {
        let catalog = Catalog::new(vec![sample("m", CategoryId::Electronics)], Vec::new());
        let calculator = ScoreCalculator::new();
        let profile = create_default_profile();
        let scored = || {
            catalog
                .all_products()
                .iter()
                .map(|product| {
                    calculator.score_product(
                        product,
                        &profile,
                        &catalog,
                        &RecommendationContext::default(),
                    )
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(apply_query_filter(scored(), "wireless mouse").len(), 1);
        assert_eq!(apply_query_filter(scored(), "MOUSE").len(), 1);
        assert_eq!(apply_query_filter(scored(), "gam").len(), 1);
        assert!(apply_query_filter(scored(), "a of").is_empty());
        assert!(apply_query_filter(scored(), "keyboard").is_empty());
    }
}
