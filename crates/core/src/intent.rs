use serde::{Deserialize, Serialize};

use crate::advisor::CartAdvisor;
use crate::catalog::Catalog;
use crate::domain::cart::CartItem;
use crate::domain::recommendation::{CartOptimization, ProductRecommendation};
use crate::domain::session::SessionProfile;
use crate::recommendations::{PageKind, RecommendRequest, RecommendationContext, RecommendationEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatIntent {
    CartAdvice,
    Explain,
    Recommend,
    General,
}

const CART_KEYWORDS: &[&str] = &[
    "cart",
    "checkout",
    "optimize",
    "save money",
    "too expensive",
    "alternatives",
    "bundle",
    "deal",
    "cheaper",
];

const EXPLAIN_KEYWORDS: &[&str] = &["why", "explain", "how come", "reasoning", "because"];

const RECOMMEND_KEYWORDS: &[&str] = &[
    "recommend",
    "suggest",
    "show me",
    "find",
    "looking for",
    "what should",
    "any good",
    "best",
    "popular",
    "trending",
    "similar",
    "headphone",
    "shoe",
    "book",
    "laptop",
    "watch",
    "shirt",
];

const GENERAL_REPLIES: [&str; 4] = [
    "I'm here to help you find the perfect products! Try asking me to recommend something, or I can analyze your cart.",
    "Want me to suggest products based on what you've been browsing? Just say 'recommend something'!",
    "I can help with product recommendations, cart optimization, and finding the best deals for you.",
    "Try asking me things like 'show me headphones', 'analyze my cart', or 'what's trending?'. I'm here to help!",
];

pub const EMPTY_CART_REPLY: &str =
    "Your cart is empty! Add some products first and I'll help you optimize.";

/// Keyword intent, checked cart first, then explain, then recommend.
pub fn detect_intent(message: &str) -> ChatIntent {
    let lowered = message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if mentions(CART_KEYWORDS) {
        ChatIntent::CartAdvice
    } else if mentions(EXPLAIN_KEYWORDS) {
        ChatIntent::Explain
    } else if mentions(RECOMMEND_KEYWORDS) {
        ChatIntent::Recommend
    } else {
        ChatIntent::General
    }
}

pub fn general_reply(interaction_count: u64) -> &'static str {
    GENERAL_REPLIES[(interaction_count % GENERAL_REPLIES.len() as u64) as usize]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub intent: ChatIntent,
    pub message: String,
    pub recommendations: Vec<ProductRecommendation>,
    pub optimizations: Vec<CartOptimization>,
}

/// Answers one chat message against the session's profile and cart.
///
/// Recommendation and explanation requests rank the catalog from the home
/// page with the message as the query, capped at `chat_limit`.
pub fn respond(
    message: &str,
    profile: &SessionProfile,
    cart: &[CartItem],
    catalog: &Catalog,
    chat_limit: usize,
) -> ChatReply {
    let intent = detect_intent(message);
    let mut reply = ChatReply {
        intent,
        message: String::new(),
        recommendations: Vec::new(),
        optimizations: Vec::new(),
    };

    match intent {
        ChatIntent::CartAdvice if cart.is_empty() => {
            reply.message = EMPTY_CART_REPLY.to_owned();
        }
        ChatIntent::CartAdvice => {
            let advice = CartAdvisor::new(catalog).advise(cart, profile);
            reply.message = format!("{} {}", advice.summary, advice.price_sensitivity_insight);
            reply.optimizations = advice.optimizations;
        }
        ChatIntent::Recommend | ChatIntent::Explain => {
            let context = RecommendationContext::new(PageKind::Home)
                .with_cart_products(cart.iter().map(|item| item.product_id.clone()).collect())
                .with_limit(chat_limit);
            let response = RecommendationEngine::new(catalog)
                .recommend(profile, &RecommendRequest::new(context).with_chat_query(message));
            reply.message = response.message;
            reply.recommendations = response.recommendations;
        }
        ChatIntent::General => {
            reply.message = general_reply(profile.interaction_count).to_owned();
        }
    }

    reply
}
