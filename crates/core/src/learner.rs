//! Session profile learning.
//!
//! Every behavioral event is folded into a profile by [`track_event`], which
//! never mutates its input. Callers that share a profile across tasks must
//! serialise calls per session so that the read-modify-write of the derived
//! fields is not lost.

use crate::catalog::Catalog;
use crate::domain::product::CategoryId;
use crate::domain::session::{
    BehaviorEvent, EventKind, PriceRange, PriceSensitivity, SessionId, SessionProfile,
};

pub const VIEW_TAG_DELTA: f64 = 0.1;
pub const ADD_TO_CART_TAG_DELTA: f64 = 0.25;
pub const REMOVE_FROM_CART_TAG_DELTA: f64 = -0.05;
pub const VIEW_CATEGORY_WEIGHT: u32 = 1;
pub const ADD_TO_CART_CATEGORY_WEIGHT: u32 = 2;

const BUDGET_CEILING: f64 = 3_000.0;
const MODERATE_CEILING: f64 = 8_000.0;
const PREMIUM_FLOOR: f64 = 15_000.0;
const WIDE_RANGE_RATIO: f64 = 0.8;

pub fn create_default_profile() -> SessionProfile {
    SessionProfile::empty(SessionId::generate(), chrono::Utc::now().timestamp_millis())
}

/// Clears everything learned while keeping the session's identity.
pub fn reset_profile(session_id: &SessionId, now_ms: i64) -> SessionProfile {
    SessionProfile::empty(session_id.clone(), now_ms)
}

pub fn track_event(
    profile: &SessionProfile,
    event: &BehaviorEvent,
    catalog: &Catalog,
) -> SessionProfile {
    let mut updated = profile.clone();
    updated.interaction_count += 1;
    updated.last_interaction_at = event.timestamp;

    match event.kind {
        EventKind::View => {
            let Some(product) = event.product_id.as_ref().and_then(|id| catalog.product(id))
            else {
                return updated;
            };
            if !updated.viewed_product_ids.contains(&product.id) {
                updated.viewed_product_ids.push(product.id.clone());
            }
            bump_category(&mut updated, product.category, VIEW_CATEGORY_WEIGHT);
            update_tag_affinity(&mut updated, &product.tags, VIEW_TAG_DELTA);
            update_price_range(&mut updated, product.price);
        }
        EventKind::AddToCart => {
            let Some(product) = event.product_id.as_ref().and_then(|id| catalog.product(id))
            else {
                return updated;
            };
            update_tag_affinity(&mut updated, &product.tags, ADD_TO_CART_TAG_DELTA);
            bump_category(&mut updated, product.category, ADD_TO_CART_CATEGORY_WEIGHT);
        }
        EventKind::RemoveFromCart => {
            let Some(product) = event.product_id.as_ref().and_then(|id| catalog.product(id))
            else {
                return updated;
            };
            updated.cart_history.push(product.id.clone());
            update_tag_affinity(&mut updated, &product.tags, REMOVE_FROM_CART_TAG_DELTA);
        }
        EventKind::Search => {
            if let Some(query) = &event.query {
                updated.search_queries.push(query.clone());
            }
        }
        EventKind::Chat => {}
    }

    updated
}

fn bump_category(profile: &mut SessionProfile, category: CategoryId, weight: u32) {
    *profile.viewed_categories.entry(category).or_insert(0) += weight;
    recalculate_category_affinity(profile);
}

/// Rebuilds affinity shares from the weighted view counts. Zero-count
/// categories are left out of the map.
pub fn recalculate_category_affinity(profile: &mut SessionProfile) {
    profile.category_affinity.clear();
    let total: u32 = profile.viewed_categories.values().sum();
    if total == 0 {
        return;
    }
    for (category, count) in &profile.viewed_categories {
        if *count > 0 {
            profile.category_affinity.insert(*category, f64::from(*count) / f64::from(total));
        }
    }
}

pub fn update_tag_affinity(profile: &mut SessionProfile, tags: &[String], delta: f64) {
    for tag in tags {
        let current = profile.tag_affinity_for(tag);
        profile.tag_affinity.insert(tag.clone(), (current + delta).clamp(0.0, 1.0));
    }
}

/// Streams a viewed price into the profile. The first observation (at most
/// one viewed product) resets the range; later ones fold into a running mean
/// divided by the current viewed-product count.
pub fn update_price_range(profile: &mut SessionProfile, price: f64) {
    let view_count = profile.viewed_product_ids.len();
    if view_count <= 1 {
        profile.price_range = PriceRange {
            min: price,
            max: price,
            average: price,
            sensitivity: PriceSensitivity::Indifferent,
        };
        return;
    }

    let range = &mut profile.price_range;
    range.min = range.min.min(price);
    range.max = range.max.max(price);
    range.average += (price - range.average) / view_count as f64;
    range.sensitivity = classify_sensitivity(range.average, range.max - range.min);
}

pub fn classify_sensitivity(average: f64, spread: f64) -> PriceSensitivity {
    if average < BUDGET_CEILING {
        PriceSensitivity::Budget
    } else if average < MODERATE_CEILING {
        PriceSensitivity::Moderate
    } else if average >= PREMIUM_FLOOR {
        PriceSensitivity::Premium
    } else if spread > average * WIDE_RANGE_RATIO {
        PriceSensitivity::Indifferent
    } else {
        PriceSensitivity::Moderate
    }
}

#[cfg(test)]
mod tests {
    use super::{
        classify_sensitivity, create_default_profile, reset_profile, track_event,
        update_price_range,
    };
    use crate::catalog::Catalog;
    use crate::domain::product::{Category, CategoryId, Product, ProductId};
    use crate::domain::session::{BehaviorEvent, PriceSensitivity, SessionProfile};

    fn product(id: &str, category: CategoryId, price: f64, tags: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            original_price: None,
            category,
            subcategory: "misc".to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            rating: 4.0,
            review_count: 10,
            image_url: String::new(),
            in_stock: true,
            bundle_eligible: Vec::new(),
            popularity_score: 50.0,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                product("p-5000", CategoryId::Electronics, 5_000.0, &["wireless"]),
                product("p-11000", CategoryId::Electronics, 11_000.0, &["wireless", "premium"]),
                product("p-20000", CategoryId::Home, 20_000.0, &["premium"]),
                product("p-1000", CategoryId::Books, 1_000.0, &["paperback"]),
                product("p-9000", CategoryId::Home, 9_000.0, &["modern"]),
            ],
            vec![Category {
                id: CategoryId::Electronics,
                name: "Electronics".to_owned(),
                description: String::new(),
                related_categories: vec![CategoryId::Home],
            }],
        )
    }

    fn replay(events: &[BehaviorEvent]) -> SessionProfile {
        let catalog = catalog();
        events
            .iter()
            .fold(create_default_profile(), |profile, event| track_event(&profile, event, &catalog))
    }

    #[test]
    fn default_profile_has_no_signal() {
        let profile = create_default_profile();

        assert_eq!(profile.interaction_count, 0);
        assert!(profile.viewed_categories.is_empty());
        assert!(profile.category_affinity.is_empty());
        assert!(profile.tag_affinity.is_empty());
        assert_eq!(profile.price_range.average, 0.0);
    }

    #[test]
    fn tracking_returns_new_profile_and_leaves_input_untouched() {
        let catalog = catalog();
        let original = create_default_profile();

        let updated = track_event(&original, &BehaviorEvent::view("p-5000", 10), &catalog);

        assert_eq!(original.interaction_count, 0);
        assert!(original.viewed_product_ids.is_empty());
        assert_eq!(updated.interaction_count, 1);
        assert_eq!(updated.last_interaction_at, 10);
    }

    #[test]
    fn unknown_product_only_advances_counter() {
        let profile = replay(&[
            BehaviorEvent::view("missing", 5),
            BehaviorEvent::add_to_cart("missing", 6),
            BehaviorEvent::remove_from_cart("missing", 7),
        ]);

        assert_eq!(profile.interaction_count, 3);
        assert_eq!(profile.last_interaction_at, 7);
        assert!(profile.viewed_product_ids.is_empty());
        assert!(profile.cart_history.is_empty());
        assert!(profile.tag_affinity.is_empty());
    }

    #[test]
    fn repeated_views_keep_first_position_but_count_category_each_time() {
        let profile = replay(&[
            BehaviorEvent::view("p-5000", 1),
            BehaviorEvent::view("p-20000", 2),
            BehaviorEvent::view("p-5000", 3),
        ]);

        assert_eq!(
            profile.viewed_product_ids,
            vec![ProductId::new("p-5000"), ProductId::new("p-20000")]
        );
        assert_eq!(profile.category_views(CategoryId::Electronics), 2);
        assert_eq!(profile.category_views(CategoryId::Home), 1);
    }

    #[test]
    fn category_affinity_always_sums_to_one() {
        let profile = replay(&[
            BehaviorEvent::view("p-5000", 1),
            BehaviorEvent::add_to_cart("p-20000", 2),
            BehaviorEvent::view("p-1000", 3),
            BehaviorEvent::view("p-9000", 4),
        ]);

        let sum: f64 = profile.category_affinity.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
        assert_eq!(profile.category_views(CategoryId::Home), 3);
        assert!((profile.affinity_for(CategoryId::Home) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn add_to_cart_weighs_category_double_and_skips_price() {
        let profile = replay(&[BehaviorEvent::add_to_cart("p-11000", 1)]);

        assert_eq!(profile.category_views(CategoryId::Electronics), 2);
        assert!((profile.tag_affinity_for("premium") - 0.25).abs() < 1e-9);
        assert_eq!(profile.price_range.average, 0.0);
        assert!(profile.viewed_product_ids.is_empty());
    }

    #[test]
    fn tag_affinity_is_clamped_to_unit_interval() {
        let mut events: Vec<BehaviorEvent> =
            (0..6).map(|step| BehaviorEvent::add_to_cart("p-5000", step)).collect();
        let saturated = replay(&events);
        assert_eq!(saturated.tag_affinity_for("wireless"), 1.0);

        events = (0..30).map(|step| BehaviorEvent::remove_from_cart("p-1000", step)).collect();
        let drained = replay(&events);
        assert_eq!(drained.tag_affinity_for("paperback"), 0.0);
        assert!(drained.tag_affinity.contains_key("paperback"));
        assert_eq!(drained.cart_history.len(), 30);
    }

    #[test]
    fn search_queries_are_appended_verbatim() {
        let profile = replay(&[
            BehaviorEvent::search("Desk Lamp", 1),
            BehaviorEvent::search("Desk Lamp", 2),
            BehaviorEvent::chat("hello", 3),
        ]);

        assert_eq!(profile.search_queries, vec!["Desk Lamp".to_owned(), "Desk Lamp".to_owned()]);
        assert_eq!(profile.interaction_count, 3);
    }

    #[test]
    fn first_view_resets_price_range() {
        let profile = replay(&[BehaviorEvent::view("p-11000", 1)]);

        assert_eq!(profile.price_range.min, 11_000.0);
        assert_eq!(profile.price_range.max, 11_000.0);
        assert_eq!(profile.price_range.average, 11_000.0);
        assert_eq!(profile.price_range.sensitivity, PriceSensitivity::Indifferent);
    }

    #[test]
    fn streaming_mean_tracks_running_min_max_and_average() {
        let profile = replay(&[
            BehaviorEvent::view("p-5000", 1),
            BehaviorEvent::view("p-11000", 2),
        ]);

        assert_eq!(profile.price_range.min, 5_000.0);
        assert_eq!(profile.price_range.max, 11_000.0);
        assert!((profile.price_range.average - 8_000.0).abs() < 1e-9);
        // 8000 average with a 6000 spread is under the wide-range ratio.
        assert_eq!(profile.price_range.sensitivity, PriceSensitivity::Moderate);
    }

    #[test]
    fn third_expensive_view_blends_into_mean_before_classifying() {
        let profile = replay(&[
            BehaviorEvent::view("p-5000", 1),
            BehaviorEvent::view("p-11000", 2),
            BehaviorEvent::view("p-20000", 3),
        ]);

        assert!((profile.price_range.average - 12_000.0).abs() < 1e-9);
        assert_eq!(profile.price_range.max, 20_000.0);
        // 12000 is below the premium floor and the 15000 spread exceeds 0.8x.
        assert_eq!(profile.price_range.sensitivity, PriceSensitivity::Indifferent);
    }

    #[test]
    fn premium_requires_blended_average_at_or_above_floor() {
        let mut profile = create_default_profile();
        profile.viewed_product_ids = vec![ProductId::new("a"), ProductId::new("b")];
        profile.price_range.min = 14_000.0;
        profile.price_range.max = 16_000.0;
        profile.price_range.average = 15_000.0;

        update_price_range(&mut profile, 15_000.0);

        assert_eq!(profile.price_range.sensitivity, PriceSensitivity::Premium);
    }

    #[test]
    fn sensitivity_thresholds_apply_in_priority_order() {
        assert_eq!(classify_sensitivity(2_999.0, 10_000.0), PriceSensitivity::Budget);
        assert_eq!(classify_sensitivity(7_999.0, 10_000.0), PriceSensitivity::Moderate);
        assert_eq!(classify_sensitivity(15_000.0, 0.0), PriceSensitivity::Premium);
        assert_eq!(classify_sensitivity(10_000.0, 8_001.0), PriceSensitivity::Indifferent);
        assert_eq!(classify_sensitivity(10_000.0, 8_000.0), PriceSensitivity::Moderate);
    }

    #[test]
    fn reset_keeps_session_identity_and_clears_learning() {
        let learned = replay(&[BehaviorEvent::view("p-5000", 1)]);

        let reset = reset_profile(&learned.session_id, 99);

        assert_eq!(reset.session_id, learned.session_id);
        assert_eq!(reset.interaction_count, 0);
        assert!(reset.viewed_product_ids.is_empty());
        assert_eq!(reset.started_at, 99);
    }
}
