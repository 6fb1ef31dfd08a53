pub mod advisor;
pub mod catalog;
pub mod confidence;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intent;
pub mod learner;
pub mod narrative;
pub mod recommendations;

pub use advisor::{CartAdvice, CartAdvisor};
pub use catalog::Catalog;
pub use confidence::{calculate_confidence, confidence_label};
pub use domain::cart::{Cart, CartItem};
pub use domain::order::{place_order, Order, OrderId, OrderItem, OrderStatus, ShippingAddress};
pub use domain::product::{Category, CategoryId, Product, ProductId};
pub use domain::recommendation::{
    BadgeType, CartOptimization, FactorName, OptimizationKind, ProductRecommendation,
    RecommendationFactor,
};
pub use domain::session::{
    BehaviorEvent, EventKind, PriceRange, PriceSensitivity, SessionId, SessionProfile,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use intent::{detect_intent, ChatIntent};
pub use learner::{create_default_profile, reset_profile, track_event};
pub use recommendations::{
    PageKind, RecommendRequest, RecommendResponse, RecommendationContext, RecommendationEngine,
};
