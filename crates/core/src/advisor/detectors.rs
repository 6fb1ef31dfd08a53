use std::collections::HashSet;

use super::{
    ALTERNATIVE_CONFIDENCE, BUNDLE_CONFIDENCE, OVERLAP_CONFIDENCE, PRICE_ALERT_CONFIDENCE,
    QUANTITY_CONFIDENCE,
};
use crate::catalog::Catalog;
use crate::domain::cart::CartItem;
use crate::domain::product::{CategoryId, Product, ProductId};
use crate::domain::recommendation::{CartOptimization, OptimizationKind};
use crate::domain::session::{PriceSensitivity, SessionProfile};
use crate::narrative::format_price;

const BUNDLE_SAVING_RATE: f64 = 0.15;
const ALTERNATIVE_PRICE_RATIO: f64 = 0.85;
const ALTERNATIVE_MIN_RATING: f64 = 3.5;
const PRICE_ALERT_RATIO: f64 = 1.5;
const QUANTITY_SAVING_RATE: f64 = 0.1;
const QUANTITY_NUDGE_MIN: u32 = 2;
const QUANTITY_NUDGE_MAX: u32 = 5;

/// Bundle partners missing from the cart, one suggestion per partner.
pub(super) fn bundles(cart: &[CartItem], catalog: &Catalog) -> Vec<CartOptimization> {
    let in_cart: HashSet<&ProductId> = cart.iter().map(|item| &item.product_id).collect();
    let mut suggested: HashSet<&ProductId> = HashSet::new();
    let mut optimizations = Vec::new();

    for item in cart {
        let Some(product) = catalog.product(&item.product_id) else {
            continue;
        };
        for partner_id in &product.bundle_eligible {
            if in_cart.contains(partner_id) {
                continue;
            }
            let Some(partner) = catalog.product(partner_id) else {
                continue;
            };
            if !suggested.insert(&partner.id) {
                continue;
            }
            optimizations.push(CartOptimization {
                kind: OptimizationKind::Bundle,
                title: format!("Complete the set with {}", partner.name),
                description: format!(
                    "{} pairs great with {}. Customers who bought both saved an average of 15%.",
                    product.name, partner.name
                ),
                confidence: BUNDLE_CONFIDENCE,
                affected_product_ids: vec![item.product_id.clone()],
                suggested_product_id: Some(partner.id.clone()),
                estimated_saving: Some((partner.price * BUNDLE_SAVING_RATE).round()),
            });
        }
    }

    optimizations
}

/// Cheaper, well-rated, tag-sharing products in the same category. Only for
/// shoppers classified as budget or moderate.
pub(super) fn alternatives(
    cart: &[CartItem],
    catalog: &Catalog,
    profile: &SessionProfile,
) -> Vec<CartOptimization> {
    if !matches!(
        profile.price_range.sensitivity,
        PriceSensitivity::Budget | PriceSensitivity::Moderate
    ) {
        return Vec::new();
    }

    cart.iter()
        .filter_map(|item| {
            let product = catalog.product(&item.product_id)?;
            let alternative = best_alternative(product, catalog)?;
            let saving = product.price - alternative.price;
            Some(CartOptimization {
                kind: OptimizationKind::Alternative,
                title: format!("Save {} with a similar option", format_price(saving)),
                description: format!(
                    "{} ({}/5 stars) offers similar features to {} at a lower price.",
                    alternative.name, alternative.rating, product.name
                ),
                confidence: ALTERNATIVE_CONFIDENCE,
                affected_product_ids: vec![item.product_id.clone()],
                suggested_product_id: Some(alternative.id.clone()),
                estimated_saving: Some(saving),
            })
        })
        .collect()
}

// Highest rating wins; equal ratings keep the earliest product in catalog order.
fn best_alternative<'c>(product: &Product, catalog: &'c Catalog) -> Option<&'c Product> {
    let ceiling = product.price * ALTERNATIVE_PRICE_RATIO;
    let mut best: Option<&Product> = None;
    for candidate in catalog.all_products() {
        let eligible = candidate.id != product.id
            && candidate.category == product.category
            && candidate.price < ceiling
            && candidate.rating >= ALTERNATIVE_MIN_RATING
            && candidate.shares_tag_with(product);
        if eligible && best.map_or(true, |current| candidate.rating > current.rating) {
            best = Some(candidate);
        }
    }
    best
}

/// Flags two or more cart lines in the same category and subcategory. Flag
/// only: nothing decides which line to drop.
pub(super) fn overlaps(cart: &[CartItem], catalog: &Catalog) -> Vec<CartOptimization> {
    let mut groups: Vec<((CategoryId, &str), Vec<(&CartItem, &Product)>)> = Vec::new();
    for item in cart {
        let Some(product) = catalog.product(&item.product_id) else {
            continue;
        };
        let key = (product.category, product.subcategory.as_str());
        match groups.iter().position(|(existing, _)| *existing == key) {
            Some(index) => groups[index].1.push((item, product)),
            None => groups.push((key, vec![(item, product)])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|((_, subcategory), members)| {
            let names: Vec<&str> = members.iter().map(|(_, product)| product.name.as_str()).collect();
            CartOptimization {
                kind: OptimizationKind::RemoveDuplicate,
                title: "Similar items detected".to_owned(),
                description: format!(
                    "You have {} items in {}. Did you mean to add both {}?",
                    members.len(),
                    subcategory,
                    names.join(" and ")
                ),
                confidence: OVERLAP_CONFIDENCE,
                affected_product_ids: members
                    .iter()
                    .map(|(item, _)| item.product_id.clone())
                    .collect(),
                suggested_product_id: None,
                estimated_saving: None,
            }
        })
        .collect()
}

/// Whole-cart alert when the average unit price runs well above what the
/// shopper has been browsing.
pub(super) fn price_alert(
    cart: &[CartItem],
    catalog: &Catalog,
    profile: &SessionProfile,
) -> Option<CartOptimization> {
    let browsed_average = profile.price_range.average;
    if browsed_average == 0.0 {
        return None;
    }

    let total: f64 = cart
        .iter()
        .map(|item| {
            catalog
                .product(&item.product_id)
                .map(|product| product.price * f64::from(item.quantity))
                .unwrap_or(0.0)
        })
        .sum();
    let units: u64 = cart.iter().map(|item| u64::from(item.quantity)).sum();
    let cart_average = total / units.max(1) as f64;

    if cart_average <= browsed_average * PRICE_ALERT_RATIO
        || profile.price_range.sensitivity == PriceSensitivity::Premium
    {
        return None;
    }

    Some(CartOptimization {
        kind: OptimizationKind::PriceAlert,
        title: "Cart is above your typical range".to_owned(),
        description: format!(
            "Your cart averages {} per item, while you've been browsing items around {}. Want me to find some alternatives?",
            format_price(cart_average),
            format_price(browsed_average)
        ),
        confidence: PRICE_ALERT_CONFIDENCE,
        affected_product_ids: cart.iter().map(|item| item.product_id.clone()).collect(),
        suggested_product_id: None,
        estimated_saving: None,
    })
}

pub(super) fn quantity_discounts(cart: &[CartItem], catalog: &Catalog) -> Vec<CartOptimization> {
    cart.iter()
        .filter(|item| (QUANTITY_NUDGE_MIN..QUANTITY_NUDGE_MAX).contains(&item.quantity))
        .filter_map(|item| {
            let product = catalog.product(&item.product_id)?;
            Some(CartOptimization {
                kind: OptimizationKind::QuantityDiscount,
                title: format!("Get more value on {}", product.name),
                description: format!(
                    "You already have {}. Buying {} or more often qualifies for multi-buy savings.",
                    item.quantity,
                    item.quantity + 1
                ),
                confidence: QUANTITY_CONFIDENCE,
                affected_product_ids: vec![item.product_id.clone()],
                suggested_product_id: None,
                estimated_saving: Some((product.price * QUANTITY_SAVING_RATE).round()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{alternatives, bundles, overlaps, price_alert, quantity_discounts};
    use crate::catalog::Catalog;
    use crate::domain::cart::CartItem;
    use crate::domain::product::ProductId;
    use crate::domain::recommendation::OptimizationKind;
    use crate::domain::session::PriceSensitivity;
    use crate::learner::create_default_profile;

    fn line(id: &str, quantity: u32) -> CartItem {
        CartItem { product_id: ProductId::new(id), quantity, added_at: 0 }
    }

    fn ids(values: &[&str]) -> Vec<ProductId> {
        values.iter().map(|value| ProductId::new(*value)).collect()
    }

    #[test]
    fn bundle_skips_partners_in_cart_and_dedupes_suggestions() {
        let catalog = Catalog::seeded();
        // Both the headphones and the laptop point at the USB-C hub.
        let cart = [line("elec-001", 1), line("elec-004", 1), line("elec-005", 1)];

        let found = bundles(&cart, &catalog);
        let suggested: Vec<_> =
            found.iter().filter_map(|optimization| optimization.suggested_product_id.clone()).collect();

        assert_eq!(suggested, ids(&["elec-006", "elec-007"]));
        assert_eq!(found[0].affected_product_ids, ids(&["elec-001"]));
        assert_eq!(found[0].estimated_saving, Some(750.0));
        assert_eq!(found[0].title, "Complete the set with Flux USB-C Charging Hub");
        assert_eq!(
            found[0].description,
            "Aurora Wireless Headphones pairs great with Flux USB-C Charging Hub. Customers who bought both saved an average of 15%."
        );
    }

    #[test]
    fn alternatives_only_for_budget_or_moderate_shoppers() {
        let catalog = Catalog::seeded();
        let cart = [line("elec-001", 1)];
        let mut profile = create_default_profile();

        for sensitivity in [PriceSensitivity::Premium, PriceSensitivity::Indifferent] {
            profile.price_range.sensitivity = sensitivity;
            assert!(alternatives(&cart, &catalog, &profile).is_empty());
        }

        profile.price_range.sensitivity = PriceSensitivity::Budget;
        assert_eq!(alternatives(&cart, &catalog, &profile).len(), 1);
    }

    #[test]
    fn alternative_ties_keep_catalog_order() {
        let catalog = Catalog::seeded();
        let mut profile = create_default_profile();
        profile.price_range.sensitivity = PriceSensitivity::Moderate;

        // Speaker and mouse both rate 4.5 and share a tag with the headphones.
        let found = alternatives(&[line("elec-001", 1)], &catalog, &profile);

        assert_eq!(found[0].suggested_product_id, Some(ProductId::new("elec-003")));
        assert_eq!(found[0].estimated_saving, Some(12_000.0));
        assert_eq!(found[0].title, "Save $120.00 with a similar option");
        assert_eq!(
            found[0].description,
            "Nimbus Smart Speaker (4.5/5 stars) offers similar features to Aurora Wireless Headphones at a lower price."
        );
        assert_eq!(found[0].kind, OptimizationKind::Alternative);
    }

    #[test]
    fn overlap_names_both_headphones_once() {
        let catalog = Catalog::seeded();
        let cart = [line("elec-001", 1), line("book-001", 1), line("elec-002", 1)];

        let found = overlaps(&cart, &catalog);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, OptimizationKind::RemoveDuplicate);
        assert_eq!(found[0].confidence, 0.55);
        assert_eq!(found[0].affected_product_ids, ids(&["elec-001", "elec-002"]));
        assert_eq!(
            found[0].description,
            "You have 2 items in headphones. Did you mean to add both Aurora Wireless Headphones and Pulse Sport Earbuds?"
        );
        assert!(found[0].estimated_saving.is_none());
    }

    #[test]
    fn price_alert_needs_browsing_signal_and_non_premium_shopper() {
        let catalog = Catalog::seeded();
        let cart = [line("elec-005", 1), line("book-001", 1)];
        let mut profile = create_default_profile();
        assert!(price_alert(&cart, &catalog, &profile).is_none());

        profile.price_range.average = 5_000.0;
        profile.price_range.sensitivity = PriceSensitivity::Moderate;
        let alert = price_alert(&cart, &catalog, &profile).expect("alert");
        assert_eq!(alert.affected_product_ids, ids(&["elec-005", "book-001"]));
        assert_eq!(
            alert.description,
            "Your cart averages $659.49 per item, while you've been browsing items around $50.00. Want me to find some alternatives?"
        );

        profile.price_range.sensitivity = PriceSensitivity::Premium;
        assert!(price_alert(&cart, &catalog, &profile).is_none());
    }

    #[test]
    fn price_alert_uses_quantity_weighted_average() {
        let catalog = Catalog::seeded();
        let mut profile = create_default_profile();
        profile.price_range.average = 2_000.0;
        profile.price_range.sensitivity = PriceSensitivity::Budget;

        // 1x 4999 + 9x 1999 averages 2299, under 1.5x of 2000.
        let cart = [line("spo-001", 1), line("spo-002", 9)];
        assert!(price_alert(&cart, &catalog, &profile).is_none());
    }

    #[test]
    fn price_alert_handles_huge_line_quantities() {
        let catalog = Catalog::seeded();
        let mut profile = create_default_profile();
        profile.price_range.average = 5_000.0;
        profile.price_range.sensitivity = PriceSensitivity::Moderate;
        let cart = [line("elec-001", u32::MAX), line("book-001", 2)];

        let alert = price_alert(&cart, &catalog, &profile).expect("alert");

        assert!(alert.description.starts_with("Your cart averages $249.99 per item"));
    }

    #[test]
    fn quantity_nudge_covers_two_to_four_units() {
        let catalog = Catalog::seeded();
        let cart = [line("spo-003", 1), line("spo-002", 2), line("book-001", 4), line("bea-001", 5)];

        let found = quantity_discounts(&cart, &catalog);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].affected_product_ids, ids(&["spo-002"]));
        assert_eq!(found[0].estimated_saving, Some(200.0));
        assert_eq!(
            found[0].description,
            "You already have 2. Buying 3 or more often qualifies for multi-buy savings."
        );
        assert_eq!(found[1].title, "Get more value on The Quiet Algorithm");
    }
}
