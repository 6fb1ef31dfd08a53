//! Catalog browsing, cart and order endpoints.
//!
//! Cart mutations that change membership are also fed to the session learner
//! as `add-to-cart` / `remove-from-cart` events, inside the session lock.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shopwise_core::domain::cart::{Cart, CartItem};
use shopwise_core::domain::order::{place_order, Order, OrderId, ShippingAddress};
use shopwise_core::domain::product::{Category, CategoryId, Product, ProductId};
use shopwise_core::domain::session::{BehaviorEvent, SessionId};
use shopwise_core::errors::DomainError;
use shopwise_core::learner::track_event;
use tracing::info;

use crate::error::{ApiError, ApiJson};
use crate::sessions::{load_profile, lock_session, now_ms};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u64,
    pub total: f64,
    pub last_modified: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{id}", get(get_product))
        .route("/api/v1/sessions/{id}/cart", get(get_cart).delete(clear_cart))
        .route("/api/v1/sessions/{id}/cart/items", axum::routing::post(add_cart_item))
        .route(
            "/api/v1/sessions/{id}/cart/items/{product_id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route("/api/v1/sessions/{id}/orders", get(list_orders).post(create_order))
        .route("/api/v1/orders/{id}", get(get_order).delete(delete_order))
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = match query.category.as_deref() {
        None | Some("") => state.catalog.all_products().to_vec(),
        Some(raw) => {
            let category = CategoryId::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("unknown category `{raw}`")))?;
            state.catalog.products_in(category).cloned().collect()
        }
    };
    Ok(Json(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .product(&ProductId(id.clone()))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("product `{id}` does not exist")))
}

fn cart_view(state: &AppState, cart: Cart) -> CartView {
    CartView {
        item_count: cart.item_count(),
        total: cart.total(&state.catalog),
        last_modified: cart.last_modified,
        items: cart.items,
    }
}

async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>, ApiError> {
    let session_id = SessionId(id);
    load_profile(&state, &session_id).await?;
    let cart = state.carts.find(&session_id).await?;
    Ok(Json(cart_view(&state, cart)))
}

/// Saves the cart and, when the change produced one, learns from the event.
/// The cart is written first so the profile never learns from a change that
/// was not stored.
async fn commit_cart_change(
    state: &AppState,
    session_id: &SessionId,
    cart: Cart,
    event: Option<BehaviorEvent>,
) -> Result<CartView, ApiError> {
    state.carts.save(session_id, cart.clone()).await?;
    if let Some(event) = event {
        let profile = load_profile(state, session_id).await?;
        state.sessions.save(track_event(&profile, &event, &state.catalog)).await?;
        info!(
            event_name = "cart.item.changed",
            session_id = %session_id,
            event_type = event.kind.as_str(),
            "cart change tracked"
        );
    }
    Ok(cart_view(state, cart))
}

async fn add_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AddItemRequest>,
) -> Result<Json<CartView>, ApiError> {
    let session_id = SessionId(id);
    if state.catalog.product(&body.product_id).is_none() {
        return Err(DomainError::UnknownProduct(body.product_id.0).into());
    }

    let _guard = lock_session(&state, &session_id).await?;
    let mut cart = state.carts.find(&session_id).await?;
    let event = cart.add_item(&body.product_id, now_ms());

    Ok(Json(commit_cart_change(&state, &session_id, cart, Some(event)).await?))
}

async fn update_cart_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<QuantityRequest>,
) -> Result<Json<CartView>, ApiError> {
    let session_id = SessionId(id);
    let product_id = ProductId(product_id);

    let _guard = lock_session(&state, &session_id).await?;
    let mut cart = state.carts.find(&session_id).await?;
    if !cart.contains(&product_id) {
        return Err(ApiError::not_found(format!("product `{product_id}` is not in the cart")));
    }
    let event = cart.update_quantity(&product_id, body.quantity, now_ms())?;

    Ok(Json(commit_cart_change(&state, &session_id, cart, event).await?))
}

async fn remove_cart_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<Json<CartView>, ApiError> {
    let session_id = SessionId(id);
    let product_id = ProductId(product_id);

    let _guard = lock_session(&state, &session_id).await?;
    let mut cart = state.carts.find(&session_id).await?;
    if !cart.contains(&product_id) {
        return Err(ApiError::not_found(format!("product `{product_id}` is not in the cart")));
    }
    let event = cart.remove_item(&product_id, now_ms());

    Ok(Json(commit_cart_change(&state, &session_id, cart, Some(event)).await?))
}

async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>, ApiError> {
    let session_id = SessionId(id);

    let _guard = lock_session(&state, &session_id).await?;
    let mut cart = state.carts.find(&session_id).await?;
    cart.clear(now_ms());

    Ok(Json(commit_cart_change(&state, &session_id, cart, None).await?))
}

async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let session_id = SessionId(id);
    load_profile(&state, &session_id).await?;
    Ok(Json(state.orders.list_for_session(&session_id).await?))
}

async fn create_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let session_id = SessionId(id);

    let _guard = lock_session(&state, &session_id).await?;
    let mut cart = state.carts.find(&session_id).await?;
    let now = now_ms();
    let order = place_order(&session_id, &cart, &state.catalog, body.shipping_address, now)?;

    state.orders.save(order.clone()).await?;
    cart.clear(now);
    state.carts.save(&session_id, cart).await?;

    info!(
        event_name = "order.placed",
        session_id = %session_id,
        order_id = %order.id,
        line_count = order.items.len(),
        total = order.total,
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .find_by_id(&OrderId(id.clone()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("order `{id}` does not exist")))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.orders.delete(&OrderId(id.clone())).await? {
        info!(event_name = "order.deleted", order_id = %id, "order deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("order `{id}` does not exist")))
    }
}
