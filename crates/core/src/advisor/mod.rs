//! Cart optimization analysis.
//!
//! Five independent detectors look at the cart: bundle partners, cheaper
//! same-category alternatives, same-subcategory overlap, a price-sensitivity
//! alert and quantity nudges. Their output is concatenated in that order,
//! ranked by confidence (stable) and capped.

mod detectors;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::cart::CartItem;
use crate::domain::recommendation::CartOptimization;
use crate::domain::session::SessionProfile;
use crate::narrative;

pub const MAX_OPTIMIZATIONS: usize = 5;

pub const BUNDLE_CONFIDENCE: f64 = 0.75;
pub const ALTERNATIVE_CONFIDENCE: f64 = 0.65;
pub const OVERLAP_CONFIDENCE: f64 = 0.55;
pub const PRICE_ALERT_CONFIDENCE: f64 = 0.7;
pub const QUANTITY_CONFIDENCE: f64 = 0.5;

const EMPTY_RESPONSE_CONFIDENCE: f64 = 0.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdvice {
    pub optimizations: Vec<CartOptimization>,
    pub summary: String,
    pub total_potential_saving: f64,
    pub price_sensitivity_insight: String,
    pub confidence: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct CartAdvisor<'a> {
    catalog: &'a Catalog,
}

impl<'a> CartAdvisor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn analyze_cart(&self, cart: &[CartItem], profile: &SessionProfile) -> Vec<CartOptimization> {
        if cart.is_empty() {
            return Vec::new();
        }

        let mut all = detectors::bundles(cart, self.catalog);
        all.extend(detectors::alternatives(cart, self.catalog, profile));
        all.extend(detectors::overlaps(cart, self.catalog));
        all.extend(detectors::price_alert(cart, self.catalog, profile));
        all.extend(detectors::quantity_discounts(cart, self.catalog));

        all.sort_by(|left, right| {
            right.confidence.partial_cmp(&left.confidence).unwrap_or(std::cmp::Ordering::Equal)
        });
        all.truncate(MAX_OPTIMIZATIONS);
        all
    }

    /// Optimizations plus the summary text shown beside them.
    pub fn advise(&self, cart: &[CartItem], profile: &SessionProfile) -> CartAdvice {
        let optimizations = self.analyze_cart(cart, profile);
        let confidence = if optimizations.is_empty() {
            EMPTY_RESPONSE_CONFIDENCE
        } else {
            optimizations.iter().map(|optimization| optimization.confidence).sum::<f64>()
                / optimizations.len() as f64
        };

        CartAdvice {
            summary: narrative::cart_summary(&optimizations),
            total_potential_saving: narrative::total_potential_saving(&optimizations),
            price_sensitivity_insight: narrative::price_sensitivity_insight(
                profile.price_range.sensitivity,
            )
            .to_owned(),
            confidence: round_to_hundredths(confidence),
            optimizations,
        }
    }
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
