use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestIdResponse, BadRequestValidationResponse, DatabaseErrorResponse,
            DatabaseUnavailableResponse, NotFoundResponse,
        },
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            DatabaseErrorResponse,
            DatabaseUnavailableResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

/// Emit one audit event for a write, successful or not.
///
/// Failed writes record the error message instead of the product fields.
fn audit_write(
    headers: &HeaderMap,
    action: &str,
    id: Option<i64>,
    result: Result<Option<&Product>, &ProductError>,
) {
    let (outcome, details) = match result {
        Ok(Some(product)) => (
            AuditOutcome::Success,
            Some(json!({ "name": product.name, "price": product.price })),
        ),
        Ok(None) => (AuditOutcome::Success, None),
        Err(err) => (AuditOutcome::Failure, Some(json!({ "error": err.to_string() }))),
    };

    let mut event = AuditEvent::new(
        None,
        action,
        id.map(|id| format!("product:{}", id)),
        outcome,
    )
    .with_ip(extract_ip_from_headers(headers))
    .with_user_agent(extract_user_agent(headers));

    if let Some(details) = details {
        event = event.with_details(details);
    }

    event.log();
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, response = DatabaseErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = DatabaseErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<Product>> {
    let result = service.create_product(input).await;

    let id = result.as_ref().ok().map(|product| product.id);
    audit_write(
        &headers,
        "product.create",
        id,
        result.as_ref().map(Some),
    );

    result.map(Json)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = DatabaseErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    service
        .get_product(id)
        .await?
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// Replace name and price of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = DatabaseErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<Product>> {
    let result = service.update_product(id, input).await;

    audit_write(
        &headers,
        "product.update",
        Some(id),
        result.as_ref().map(Some),
    );

    result.map(Json)
}

/// Delete a product (no-op when the id does not exist)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted or already absent"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = DatabaseErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    let result = service.delete_product(id).await;

    audit_write(
        &headers,
        "product.delete",
        Some(id),
        result.as_ref().map(|_| None),
    );

    result.map(|_| StatusCode::NO_CONTENT)
}
