//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{InternalErrorBody, ProductError, ProductResult};
use crate::models::{CreateProduct, PriceInput, Product, ProductMessage, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "Products";

pub const CREATED_MESSAGE: &str = "Create product successfully";
pub const REPLACED_MESSAGE: &str = "Produk berhasil diperbarui";
pub const UPDATED_MESSAGE: &str = "Product updated successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, PriceInput, ProductMessage,
            InternalErrorBody
        ),
        responses(BadRequestValidationResponse, BadRequestIdResponse, ConflictResponse)
    ),
    tags(
        (name = TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router; mount it under `/products`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// Storage failures are logged at error level under a route-specific
/// message; client errors only at debug.
fn log_failure(context: &'static str) -> impl Fn(&ProductError) {
    move |err| match err {
        ProductError::Database(_) | ProductError::Conflict(_) => {
            tracing::error!(error = %err, "{}", context)
        }
        ProductError::NotFound(_) | ProductError::Validation(_) => {
            tracing::debug!(error = %err, "{}", context)
        }
    }
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<Product>),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service
        .list_products()
        .await
        .inspect_err(log_failure("Error fetching products"))?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = ProductMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<ProductMessage>> {
    let product = service
        .create_product(input)
        .await
        .inspect_err(log_failure("Error creating product"))?;
    Ok(Json(ProductMessage::new(product, CREATED_MESSAGE)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "product not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service
        .get_product(id)
        .await
        .inspect_err(log_failure("Error fetching product"))?;
    Ok(Json(product))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product replaced", body = ProductMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, description = "product not found", body = String, content_type = "text/plain"),
        (status = 409, response = ConflictResponse),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<ProductMessage>> {
    let product = service
        .replace_product(id, input)
        .await
        .inspect_err(log_failure("Error updating product"))?;
    Ok(Json(ProductMessage::new(product, REPLACED_MESSAGE)))
}

/// Update some fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, description = "product not found", body = String, content_type = "text/plain"),
        (status = 409, response = ConflictResponse),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductMessage>> {
    let product = service
        .update_product(id, input)
        .await
        .inspect_err(log_failure("Error updating product"))?;
    Ok(Json(ProductMessage::new(product, UPDATED_MESSAGE)))
}

/// Delete a product, returning the removed record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ProductMessage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "product not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = InternalErrorBody)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductMessage>> {
    let product = service
        .delete_product(id)
        .await
        .inspect_err(log_failure("Error deleting product"))?;
    Ok(Json(ProductMessage::new(product, DELETED_MESSAGE)))
}
