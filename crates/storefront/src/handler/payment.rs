use crate::{abstract_trait::DynPaymentService, middleware::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::{
        requests::InitiatePaymentRequest,
        responses::{ApiResponse, PaymentInitiatedResponse, PaymentMethodResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/payments/methods",
    tag = "Payment",
    responses(
        (status = 200, description = "Recognized payment methods", body = ApiResponse<Vec<PaymentMethodResponse>>)
    )
)]
pub async fn get_payment_methods(
    Extension(service): Extension<DynPaymentService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_methods();
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payment",
    request_body = InitiatePaymentRequest,
    responses(
        (status = 200, description = "Payment initiated", body = ApiResponse<PaymentInitiatedResponse>),
        (status = 400, description = "Unrecognized method or invalid phone number"),
        (status = 404, description = "Order not found"),
        (status = 502, description = "Provider rejected or unreachable"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_payment(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(body): SimpleValidatedJson<InitiatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.initiate_payment(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/payments/methods", get(get_payment_methods))
        .route("/api/payments", post(create_payment))
        .layer(Extension(app_state.di_container.payment_service.clone()))
}
