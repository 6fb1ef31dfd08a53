//! Confidence in a recommendation, from profile richness and how clearly one
//! factor dominates the breakdown.

use crate::domain::recommendation::RecommendationFactor;
use crate::domain::session::SessionProfile;

const INTERACTION_CAP: f64 = 0.4;
const COMPLETENESS_WEIGHT: f64 = 0.3;
const SIGNAL_COUNT: f64 = 5.0;
const AGREEMENT_CEILING: f64 = 0.3;

pub fn calculate_confidence(profile: &SessionProfile, factors: &[RecommendationFactor]) -> f64 {
    let interaction_base =
        ((profile.interaction_count as f64 + 1.0).log2() / 10.0).min(INTERACTION_CAP);
    let completeness = data_completeness(profile);

    if factors.is_empty() {
        return (interaction_base + completeness).min(1.0);
    }

    let max_weight = factors.iter().map(|factor| factor.weight).fold(f64::NEG_INFINITY, f64::max);
    let variance = factors
        .iter()
        .map(|factor| (factor.weight - max_weight).powi(2))
        .sum::<f64>()
        / factors.len() as f64;
    let agreement = (AGREEMENT_CEILING - variance).max(0.0);

    (interaction_base + completeness + agreement).min(1.0)
}

fn data_completeness(profile: &SessionProfile) -> f64 {
    let signals = [
        !profile.viewed_product_ids.is_empty(),
        profile.viewed_categories.len() >= 2,
        profile.price_range.average > 0.0,
        profile.tag_affinity.len() >= 3,
        !profile.search_queries.is_empty(),
    ];
    let present = signals.iter().filter(|present| **present).count() as f64;
    present / SIGNAL_COUNT * COMPLETENESS_WEIGHT
}

pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence < 0.3 {
        "I'm still learning your preferences"
    } else if confidence < 0.6 {
        "Based on what I've seen so far"
    } else if confidence < 0.8 {
        "I'm fairly confident you'll like this"
    } else {
        "This is a strong match for you"
    }
}
