//! Templated shopper-facing text. Every function here is pure: the same
//! inputs always render the same string.

use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::domain::recommendation::{
    CartOptimization, FactorName, ProductRecommendation, RecommendationFactor,
};
use crate::domain::session::{PriceSensitivity, SessionProfile};

const STRONG_CATEGORY_VIEWS: u32 = 3;
const MATCHING_TAG_THRESHOLD: f64 = 0.3;
const EARLY_SESSION_INTERACTIONS: u64 = 3;
const WARM_SESSION_INTERACTIONS: u64 = 8;
const INSIGHT_MIN_INTERACTIONS: u64 = 2;

/// Up to two sentences keyed by the two heaviest factors.
pub fn generate_reasoning(
    product: &Product,
    factors: &[RecommendationFactor],
    profile: &SessionProfile,
    catalog: &Catalog,
) -> String {
    let mut ranked: Vec<&RecommendationFactor> = factors.iter().collect();
    ranked.sort_by(|left, right| descending(left.weight, right.weight));

    let parts: Vec<String> = ranked
        .into_iter()
        .take(2)
        .filter_map(|factor| factor_sentence(factor.name, product, profile, catalog))
        .collect();

    if parts.is_empty() {
        return "This product could be a great addition based on current trends.".to_owned();
    }
    parts.join(" ")
}

fn factor_sentence(
    name: FactorName,
    product: &Product,
    profile: &SessionProfile,
    catalog: &Catalog,
) -> Option<String> {
    match name {
        FactorName::CategoryAffinity => {
            let views = profile.category_views(product.category);
            let category = catalog.category_name(product.category);
            if views > STRONG_CATEGORY_VIEWS {
                Some(format!(
                    "You've been exploring {category} products ({views} items viewed this session), and this is a strong match in that category."
                ))
            } else if views > 0 {
                Some(format!("Based on your interest in {category}, this could be a great pick."))
            } else {
                None
            }
        }
        FactorName::PriceRangeFit => Some(format!(
            "At {}, this fits well within your typical browsing range around {}.",
            format_price(product.price),
            format_price(profile.price_range.average)
        )),
        FactorName::TagAffinity => {
            let matching: Vec<&str> = product
                .tags
                .iter()
                .filter(|tag| profile.tag_affinity_for(tag) > MATCHING_TAG_THRESHOLD)
                .take(2)
                .map(String::as_str)
                .collect();
            if matching.is_empty() {
                Some("The features of this product align with your browsing patterns.".to_owned())
            } else {
                Some(format!("This matches your interest in {} products.", matching.join(" and ")))
            }
        }
        FactorName::Popularity => Some(format!(
            "This is one of our most popular items with a {}/5 rating from {} reviews.",
            product.rating,
            group_thousands(u64::from(product.review_count))
        )),
        FactorName::RecencyBoost => Some(
            "Based on what you were just browsing, this seems like a great next pick.".to_owned(),
        ),
    }
}

/// Wrapper message for a recommendation batch, tuned by chat query and by how
/// far into the session the shopper is.
pub fn conversational_response(
    recommendations: &[ProductRecommendation],
    query: Option<&str>,
    profile: &SessionProfile,
    catalog: &Catalog,
) -> String {
    let count = recommendations.len();
    let query = query.filter(|query| !query.is_empty());

    let Some(top) = recommendations.first() else {
        return match query {
            Some(query) => format!(
                "I couldn't find products matching \"{query}\" right now. Try browsing our categories or asking me about something else!"
            ),
            None => "I don't have enough data yet to make personalized recommendations. Try browsing some products first!".to_owned(),
        };
    };

    if query.is_some() {
        let top_name = catalog
            .product(&top.product_id)
            .map(|product| product.name.as_str())
            .unwrap_or("this one");
        return format!(
            "Based on your request, I found {count} great options. I'd especially recommend {top_name}. {}.",
            lead_sentence(&top.reasoning)
        );
    }

    if profile.interaction_count < EARLY_SESSION_INTERACTIONS {
        format!(
            "Here are {count} popular picks to get you started! As you browse more, I'll learn your preferences and personalize these suggestions."
        )
    } else if profile.interaction_count < WARM_SESSION_INTERACTIONS {
        format!(
            "I'm starting to understand your taste! Here are {count} products I think you'll like based on your browsing so far."
        )
    } else {
        format!(
            "Based on everything I've learned about your preferences, here are my top {count} picks for you. I'm quite confident about these recommendations!"
        )
    }
}

// Sentence boundaries are ". " so prices and ratings keep their decimals.
fn lead_sentence(reasoning: &str) -> &str {
    let first = reasoning.split(". ").next().unwrap_or(reasoning);
    first.trim_end_matches('.')
}

pub fn session_insight(profile: &SessionProfile, catalog: &Catalog) -> String {
    if profile.interaction_count < INSIGHT_MIN_INTERACTIONS {
        return "I'm just getting started learning your preferences. Browse a few products and I'll start personalizing!".to_owned();
    }

    let mut categories: Vec<_> = profile.category_affinity.iter().collect();
    categories.sort_by(|left, right| descending(*left.1, *right.1));
    let mut tags: Vec<_> = profile.tag_affinity.iter().collect();
    tags.sort_by(|left, right| descending(*left.1, *right.1));

    let mut parts = Vec::new();
    if !categories.is_empty() {
        let names: Vec<String> = categories
            .iter()
            .take(2)
            .map(|(category, _)| catalog.category_name(**category))
            .collect();
        parts.push(format!("You seem to enjoy {}", names.join(" and ")));
    }
    if !tags.is_empty() {
        let names: Vec<&str> = tags.iter().take(3).map(|(tag, _)| tag.as_str()).collect();
        parts.push(format!("with a preference for {} features", names.join(", ")));
    }
    if profile.price_range.average > 0.0 {
        parts.push(format!("in the {} range", format_price(profile.price_range.average)));
    }

    format!("{}.", parts.join(" "))
}

pub fn total_potential_saving(optimizations: &[CartOptimization]) -> f64 {
    optimizations.iter().filter_map(|optimization| optimization.estimated_saving).sum()
}

pub fn cart_summary(optimizations: &[CartOptimization]) -> String {
    let count = optimizations.len();
    if count == 0 {
        return "Your cart looks good! I don't have any optimization suggestions right now."
            .to_owned();
    }

    let plural = if count > 1 { "s" } else { "" };
    let saving = total_potential_saving(optimizations);
    if saving > 0.0 {
        format!(
            "I found {count} suggestion{plural} that could save you up to {}!",
            format_price(saving)
        )
    } else {
        format!("I have {count} suggestion{plural} to optimize your cart.")
    }
}

pub fn price_sensitivity_insight(sensitivity: PriceSensitivity) -> &'static str {
    match sensitivity {
        PriceSensitivity::Budget => {
            "You appear to be a value-conscious shopper, so I'll prioritize affordable options."
        }
        PriceSensitivity::Moderate => {
            "You tend to browse mid-range products, a nice balance of quality and value."
        }
        PriceSensitivity::Premium => {
            "You gravitate toward premium products, so I'll highlight top-tier options."
        }
        PriceSensitivity::Indifferent => {
            "You browse across a wide price range, so I'll show you the best options regardless of price."
        }
    }
}

/// Renders minor currency units as dollars, e.g. `123456.0` as `$1,234.56`.
pub fn format_price(minor_units: f64) -> String {
    let cents = minor_units.round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs() as u64;
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn descending(left: f64, right: f64) -> Ordering {
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}
