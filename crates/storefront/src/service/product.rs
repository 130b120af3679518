use crate::abstract_trait::ProductServiceTrait;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    abstract_trait::{DynProductCommandRepository, DynProductQueryRepository},
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, RequestTracer},
};

pub struct ProductService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    metrics: Metrics,
}

impl ProductService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            query,
            command,
            metrics,
        }
    }
}

impl RequestTracer for ProductService {
    fn tracer_name(&self) -> &'static str {
        "product-service"
    }

    fn request_metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("search", req.search.clone()),
            ],
        );

        let result = self.query.find_all(req).await;

        match result {
            Ok((products, total_items)) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Fetched {} products", products.len()),
                );

                Ok(ApiResponsePagination {
                    status: "success".into(),
                    message: "Products retrieved successfully".into(),
                    data: products.into_iter().map(Into::into).collect(),
                    pagination: Pagination::new(req.page, req.page_size, total_items),
                })
            }
            Err(err) => {
                self.complete_tracing_error(&tracing_ctx, Method::Get, "Product listing failed");
                Err(err.into())
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.query.find_by_id(id).await?;

        Ok(ApiResponse::success(
            "Product retrieved successfully",
            product.into(),
        ))
    }

    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.create_product(req).await?;

        Ok(ApiResponse::success(
            "Product created successfully",
            product.into(),
        ))
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.update_product(req).await?;

        Ok(ApiResponse::success(
            "Product updated successfully",
            product.into(),
        ))
    }

    async fn trash_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.trash_product(id).await?;

        Ok(ApiResponse::success(
            "Product deleted successfully",
            product.into(),
        ))
    }
}
