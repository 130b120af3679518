use crate::abstract_trait::{DynPaymentGateway, PaymentServiceTrait};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    abstract_trait::{DynOrderCommandRepository, DynOrderQueryRepository},
    domain::{
        requests::{ChargeRequest, InitiatePaymentRequest},
        responses::{ApiResponse, PaymentInitiatedResponse, PaymentMethodResponse},
    },
    errors::ServiceError,
    payment::{PAYMENT_METHODS, PaymentMethodKind, find_method, normalize_msisdn},
    utils::{Method, Metrics, RequestTracer},
};
use tracing::info;
use uuid::Uuid;

/// Routes a payment attempt for an order to the external provider behind
/// the selected method. The order is only touched after the provider has
/// accepted the attempt; every failure before that leaves it as it was.
pub struct PaymentService {
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
    mobile_money: DynPaymentGateway,
    card: DynPaymentGateway,
    aggregator: DynPaymentGateway,
    callback_url: String,
    default_currency: String,
    metrics: Metrics,
}

pub struct PaymentServiceDeps {
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub mobile_money: DynPaymentGateway,
    pub card: DynPaymentGateway,
    pub aggregator: DynPaymentGateway,
    pub callback_url: String,
    pub default_currency: String,
    pub metrics: Metrics,
}

impl PaymentService {
    pub fn new(deps: PaymentServiceDeps) -> Self {
        let PaymentServiceDeps {
            order_query,
            order_command,
            mobile_money,
            card,
            aggregator,
            callback_url,
            default_currency,
            metrics,
        } = deps;

        Self {
            order_query,
            order_command,
            mobile_money,
            card,
            aggregator,
            callback_url,
            default_currency,
            metrics,
        }
    }
}

impl RequestTracer for PaymentService {
    fn tracer_name(&self) -> &'static str {
        "payment-service"
    }

    fn request_metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    fn list_methods(&self) -> ApiResponse<Vec<PaymentMethodResponse>> {
        let methods = PAYMENT_METHODS.iter().map(Into::into).collect();
        ApiResponse::success("Payment methods retrieved successfully", methods)
    }

    async fn initiate_payment(
        &self,
        req: &InitiatePaymentRequest,
    ) -> Result<ApiResponse<PaymentInitiatedResponse>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "InitiatePayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order_id", req.order_id.to_string()),
                KeyValue::new("payment_method", req.payment_method_id.clone()),
            ],
        );

        // The order lookup comes first: a bad phone number against a
        // missing order must still report the missing order.
        let order = match self.order_query.find_by_id(req.order_id).await {
            Ok(order) => order,
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Order {} not found", req.order_id),
                );
                return Err(err.into());
            }
        };

        let method = match find_method(&req.payment_method_id) {
            Some(method) => method,
            None => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Unrecognized payment method '{}'", req.payment_method_id),
                );
                return Err(ServiceError::InvalidPaymentMethod(
                    req.payment_method_id.clone(),
                ));
            }
        };

        let (phone_number, network) = match method.kind {
            PaymentMethodKind::MobileMoney { network } => {
                let raw = req.phone_number.as_deref().unwrap_or_default();
                match normalize_msisdn(raw) {
                    Ok(msisdn) => (Some(msisdn), Some(network)),
                    Err(err) => {
                        self.complete_tracing_error(
                            &tracing_ctx,
                            Method::Post,
                            &format!("Rejected phone number for order {}", req.order_id),
                        );
                        return Err(err);
                    }
                }
            }
            PaymentMethodKind::Card | PaymentMethodKind::Aggregator => (None, None),
        };

        let charge = ChargeRequest {
            tx_ref: format!("MS-{}-{}", order.order_id, Uuid::new_v4().simple()),
            amount: order.total,
            currency: req
                .currency
                .clone()
                .unwrap_or_else(|| self.default_currency.clone()),
            email: order.email.clone(),
            customer_name: order.customer_name.clone(),
            phone_number,
            network,
            redirect_url: self.callback_url.clone(),
            narration: format!("Order #{}", order.order_id),
        };

        let gateway = match method.kind {
            PaymentMethodKind::MobileMoney { .. } => &self.mobile_money,
            PaymentMethodKind::Card => &self.card,
            PaymentMethodKind::Aggregator => &self.aggregator,
        };

        info!(
            "Dispatching payment for order {} via {}",
            order.order_id, method.id
        );

        let outcome = match gateway.initiate(&charge).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // The provider said no: the order stays exactly as it was.
                self.complete_tracing_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Provider rejected payment for order {}", order.order_id),
                );
                return Err(err);
            }
        };

        let updated = match self
            .order_command
            .record_payment_attempt(order.order_id, method.id, &outcome.reference)
            .await
        {
            Ok(updated) => updated,
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Failed to record payment attempt for order {}", order.order_id),
                );
                return Err(err.into());
            }
        };

        let message = format!(
            "Payment for order {} initiated via {}",
            updated.order_id, method.label
        );

        self.complete_tracing_success(&tracing_ctx, Method::Post, &message);

        Ok(ApiResponse::success(
            message,
            PaymentInitiatedResponse {
                order_id: updated.order_id,
                payment_method: method.id.to_string(),
                reference: outcome.reference,
                payment_url: outcome.payment_url,
                tracking_id: outcome.tracking_id,
                payment_status: updated.payment_status,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::PaymentGatewayTrait;
    use shared::{
        abstract_trait::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        domain::{
            requests::{FindAllOrders, NewOrder},
            responses::ChargeOutcome,
        },
        errors::RepositoryError,
        model::{Order, OrderItem},
        payment::PaymentStatus,
    };
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    fn order(order_id: i32, total: i64) -> Order {
        Order {
            order_id,
            email: "jane@example.com".into(),
            customer_name: "Jane Doe".into(),
            visitor_id: None,
            total,
            payment_method: None,
            payment_reference: None,
            payment_status: PaymentStatus::Pending.as_str().into(),
            created_at: None,
            updated_at: None,
        }
    }

    struct StubOrderQuery {
        orders: Vec<Order>,
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for StubOrderQuery {
        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<Order>, i64), RepositoryError> {
            Ok((self.orders.clone(), self.orders.len() as i64))
        }

        async fn find_by_id(&self, id: i32) -> Result<Order, RepositoryError> {
            self.orders
                .iter()
                .find(|o| o.order_id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn find_items(&self, _order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct RecordingOrderCommand {
        attempts: Mutex<Vec<(i32, String, String)>>,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for RecordingOrderCommand {
        async fn create_order(&self, _order: &NewOrder) -> Result<Order, RepositoryError> {
            unreachable!("not exercised by payment dispatch")
        }

        async fn record_payment_attempt(
            &self,
            order_id: i32,
            payment_method: &str,
            reference: &str,
        ) -> Result<Order, RepositoryError> {
            self.attempts.lock().unwrap().push((
                order_id,
                payment_method.to_string(),
                reference.to_string(),
            ));

            let mut updated = order(order_id, 45_000);
            updated.payment_method = Some(payment_method.to_string());
            updated.payment_reference = Some(reference.to_string());
            Ok(updated)
        }
    }

    struct StubGateway {
        outcome: Result<ChargeOutcome, String>,
        calls: AtomicUsize,
        last_charge: Mutex<Option<ChargeRequest>>,
    }

    impl StubGateway {
        fn accepting(reference: &str) -> Self {
            Self {
                outcome: Ok(ChargeOutcome {
                    reference: reference.into(),
                    payment_url: Some("https://pay.example/redirect".into()),
                    tracking_id: Some("track-1".into()),
                }),
                calls: AtomicUsize::new(0),
                last_charge: Mutex::new(None),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                outcome: Err(message.into()),
                calls: AtomicUsize::new(0),
                last_charge: Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGatewayTrait for StubGateway {
        async fn initiate(&self, charge: &ChargeRequest) -> Result<ChargeOutcome, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_charge.lock().unwrap() = Some(charge.clone());

            self.outcome
                .clone()
                .map_err(ServiceError::Provider)
        }
    }

    struct Harness {
        service: PaymentService,
        command: Arc<RecordingOrderCommand>,
        mobile_money: Arc<StubGateway>,
        card: Arc<StubGateway>,
        aggregator: Arc<StubGateway>,
    }

    fn harness(orders: Vec<Order>, mobile_money: StubGateway) -> Harness {
        let command = Arc::new(RecordingOrderCommand::default());
        let mobile_money = Arc::new(mobile_money);
        let card = Arc::new(StubGateway::accepting("CARD-REF"));
        let aggregator = Arc::new(StubGateway::accepting("AGG-REF"));

        let service = PaymentService::new(PaymentServiceDeps {
            order_query: Arc::new(StubOrderQuery { orders }),
            order_command: command.clone(),
            mobile_money: mobile_money.clone(),
            card: card.clone(),
            aggregator: aggregator.clone(),
            callback_url: "https://shop.example/payments/callback".into(),
            default_currency: "UGX".into(),
            metrics: Metrics::new(),
        });

        Harness {
            service,
            command,
            mobile_money,
            card,
            aggregator,
        }
    }

    fn momo_request(order_id: i32, phone: &str) -> InitiatePaymentRequest {
        InitiatePaymentRequest {
            order_id,
            payment_method_id: "mtn-momo".into(),
            phone_number: Some(phone.into()),
            network: None,
            currency: None,
        }
    }

    #[tokio::test]
    async fn unknown_method_is_rejected_without_side_effects() {
        let h = harness(vec![order(1, 45_000)], StubGateway::accepting("FLW-REF"));

        let result = h
            .service
            .initiate_payment(&InitiatePaymentRequest {
                order_id: 1,
                payment_method_id: "bogus-method".into(),
                phone_number: Some("0700123456".into()),
                network: None,
                currency: None,
            })
            .await;

        assert!(matches!(result, Err(ServiceError::InvalidPaymentMethod(_))));
        assert_eq!(h.mobile_money.call_count(), 0);
        assert_eq!(h.card.call_count(), 0);
        assert_eq!(h.aggregator.call_count(), 0);
        assert!(h.command.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_order_short_circuits_before_phone_validation() {
        let h = harness(vec![], StubGateway::accepting("FLW-REF"));

        // The phone number is also invalid; the missing order must win.
        let result = h.service.initiate_payment(&momo_request(99, "12345")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::NotFound))
        ));
        assert_eq!(h.mobile_money.call_count(), 0);
        assert!(h.command.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_phone_number_is_rejected() {
        let h = harness(vec![order(1, 45_000)], StubGateway::accepting("FLW-REF"));

        for bad in ["12345", "25670012", "", "0700 123456"] {
            let result = h.service.initiate_payment(&momo_request(1, bad)).await;
            assert!(matches!(result, Err(ServiceError::InvalidPhoneNumber(_))));
        }

        assert_eq!(h.mobile_money.call_count(), 0);
        assert!(h.command.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_phone_numbers_reach_the_provider_normalized() {
        let h = harness(vec![order(1, 45_000)], StubGateway::accepting("FLW-REF"));

        h.service
            .initiate_payment(&momo_request(1, "0700123456"))
            .await
            .unwrap();

        let charge = h.mobile_money.last_charge.lock().unwrap().clone().unwrap();
        assert_eq!(charge.phone_number.as_deref(), Some("256700123456"));
        assert_eq!(charge.amount, 45_000);
        assert_eq!(charge.currency, "UGX");
    }

    #[tokio::test]
    async fn provider_failure_leaves_the_order_untouched() {
        let h = harness(
            vec![order(1, 45_000)],
            StubGateway::rejecting("insufficient wallet balance"),
        );

        let result = h
            .service
            .initiate_payment(&momo_request(1, "256700123456"))
            .await;

        assert!(matches!(result, Err(ServiceError::Provider(_))));
        assert_eq!(h.mobile_money.call_count(), 1);
        assert!(h.command.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_dispatch_records_the_pending_reference() {
        let h = harness(vec![order(1, 45_000)], StubGateway::accepting("FLW-REF"));

        let response = h
            .service
            .initiate_payment(&momo_request(1, "0700123456"))
            .await
            .unwrap();

        let attempts = h.command.attempts.lock().unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].0, 1);
        assert_eq!(attempts[0].1, "mtn-momo");
        assert_eq!(attempts[0].2, "FLW-REF");

        assert_eq!(response.data.reference, "FLW-REF");
        assert_eq!(
            response.data.payment_url.as_deref(),
            Some("https://pay.example/redirect")
        );
        assert_eq!(response.data.payment_status, "PENDING");
    }

    #[tokio::test]
    async fn card_payments_skip_phone_validation() {
        let h = harness(vec![order(1, 45_000)], StubGateway::accepting("FLW-REF"));

        let response = h
            .service
            .initiate_payment(&InitiatePaymentRequest {
                order_id: 1,
                payment_method_id: "card".into(),
                phone_number: None,
                network: None,
                currency: None,
            })
            .await
            .unwrap();

        assert_eq!(h.card.call_count(), 1);
        assert_eq!(h.mobile_money.call_count(), 0);
        assert_eq!(response.data.payment_method, "card");

        let charge = h.card.last_charge.lock().unwrap().clone().unwrap();
        assert_eq!(charge.phone_number, None);
        assert_eq!(charge.network, None);
    }

    #[tokio::test]
    async fn aggregator_dispatch_uses_the_aggregator_gateway() {
        let h = harness(vec![order(7, 120_000)], StubGateway::accepting("FLW-REF"));

        let response = h
            .service
            .initiate_payment(&InitiatePaymentRequest {
                order_id: 7,
                payment_method_id: "pesapal".into(),
                phone_number: None,
                network: None,
                currency: Some("KES".into()),
            })
            .await
            .unwrap();

        assert_eq!(h.aggregator.call_count(), 1);
        assert_eq!(response.data.reference, "AGG-REF");

        let charge = h.aggregator.last_charge.lock().unwrap().clone().unwrap();
        assert_eq!(charge.currency, "KES");
        assert_eq!(charge.amount, 120_000);
    }
}
