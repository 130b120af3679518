use crate::{
    abstract_trait::DynCartService,
    middleware::{SimpleValidatedJson, visitor::VisitorId, visitor_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    cart::Cart,
    domain::{
        requests::{AddCartItemRequest, UpdateCartQuantityRequest},
        responses::ApiResponse,
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "The visitor's cart", body = ApiResponse<Cart>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(visitor): Extension<VisitorId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(&visitor.0).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Cart after the add", body = ApiResponse<Cart>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(visitor): Extension<VisitorId>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(&visitor.0, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{product_id}",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body = UpdateCartQuantityRequest,
    responses(
        (status = 200, description = "Cart after the update", body = ApiResponse<Cart>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(visitor): Extension<VisitorId>,
    Path(product_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartQuantityRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_quantity(&visitor.0, product_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Cart after the removal", body = ApiResponse<Cart>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(visitor): Extension<VisitorId>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_item(&visitor.0, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "The emptied cart", body = ApiResponse<Cart>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    Extension(visitor): Extension<VisitorId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.clear_cart(&visitor.0).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart", delete(clear_cart))
        .route("/api/cart/items", post(add_cart_item))
        .route("/api/cart/items/{product_id}", put(update_cart_item))
        .route("/api/cart/items/{product_id}", delete(remove_cart_item))
        .route_layer(middleware::from_fn(visitor_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
}
