//! Shopping-assistant endpoints.
//!
//! Recommendation and cart advice read a snapshot of the session and run
//! without the session lock. Chat also records a `chat` event, so it locks.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use shopwise_core::advisor::{CartAdvice, CartAdvisor};
use shopwise_core::domain::session::{BehaviorEvent, SessionId};
use shopwise_core::intent::{self, ChatReply};
use shopwise_core::learner::track_event;
use shopwise_core::recommendations::{
    RecommendRequest, RecommendResponse, RecommendationContext, RecommendationEngine,
};
use tracing::info;

use crate::error::{ApiError, ApiJson};
use crate::sessions::{load_profile, lock_session, now_ms};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendProductsRequest {
    pub session_id: SessionId,
    #[serde(default)]
    pub context: RecommendationContext,
    pub chat_query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdvisorRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/ai/recommend-products", post(recommend_products))
        .route("/api/v1/ai/cart-advisor", post(cart_advisor))
        .route("/api/v1/ai/chat", post(chat))
}

async fn recommend_products(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RecommendProductsRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let profile = load_profile(&state, &body.session_id).await?;
    let mut context = body.context;
    if context.cart_product_ids.is_empty() {
        context.cart_product_ids = state.carts.find(&body.session_id).await?.product_ids();
    }

    let engine = RecommendationEngine::new(&state.catalog)
        .with_limits(state.assistant.default_limit, state.assistant.max_limit);
    let response =
        engine.recommend(&profile, &RecommendRequest { context, chat_query: body.chat_query });

    info!(
        event_name = "assistant.recommend.completed",
        session_id = %body.session_id,
        recommendation_count = response.recommendations.len(),
        confidence = response.confidence,
        "recommendations generated"
    );
    Ok(Json(response))
}

async fn cart_advisor(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CartAdvisorRequest>,
) -> Result<Json<CartAdvice>, ApiError> {
    let profile = load_profile(&state, &body.session_id).await?;
    let cart = state.carts.find(&body.session_id).await?;

    let advice = CartAdvisor::new(&state.catalog).advise(&cart.items, &profile);

    info!(
        event_name = "assistant.cart_advice.completed",
        session_id = %body.session_id,
        optimization_count = advice.optimizations.len(),
        total_potential_saving = advice.total_potential_saving,
        "cart advice generated"
    );
    Ok(Json(advice))
}

async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("chat message must not be empty"));
    }

    let profile = {
        let _guard = lock_session(&state, &body.session_id).await?;
        let profile = load_profile(&state, &body.session_id).await?;
        let updated = track_event(&profile, &BehaviorEvent::chat(message, now_ms()), &state.catalog);
        state.sessions.save(updated.clone()).await?;
        updated
    };
    let cart = state.carts.find(&body.session_id).await?;

    let reply =
        intent::respond(message, &profile, &cart.items, &state.catalog, state.assistant.chat_limit);

    info!(
        event_name = "assistant.chat.completed",
        session_id = %body.session_id,
        intent = ?reply.intent,
        recommendation_count = reply.recommendations.len(),
        optimization_count = reply.optimizations.len(),
        "chat message answered"
    );
    Ok(Json(reply))
}
