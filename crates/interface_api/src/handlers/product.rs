//! Product catalog handlers

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::{Page, ProductId, DEFAULT_PAGE_SIZE};
use domain_catalog::Product;

use crate::auth::Claims;
use crate::dto::product::{
    CreateProductRequest, ProductListQuery, ProductListResponse, ProductResponse,
    UpdateProductRequest,
};
use crate::dto::{DeleteResponse, IdListQuery};
use crate::error::ApiError;
use crate::AppState;

/// Lists products, optionally narrowed by a name substring
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let page = Page::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let search = query.search.as_deref().filter(|s| !s.is_empty());

    let (products, total) = state.products.list(search, page).await?;

    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
        page: page.number,
        limit: page.size,
        total,
    }))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    request.validate()?;

    let product = Product::new(request.name, request.price)?;
    state.products.insert(&product).await?;

    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(Json(ProductResponse::from(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    request.validate()?;

    let product = Product {
        id: request.id,
        name: request.name,
        price: request.price,
    };
    product.validate()?;
    state.products.update(&product).await?;

    Ok(Json(ProductResponse::from(product)))
}

/// Bulk delete; admin only, idempotent over missing ids
pub async fn delete_products(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<IdListQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !claims.role.is_admin() {
        return Err(ApiError::Forbidden("admin role required".to_string()));
    }

    let ids: Vec<ProductId> = query.parse_ids()?;
    let deleted = state.products.delete_many(&ids).await?;

    info!(requested = ids.len(), deleted, "Products deleted");

    Ok(Json(DeleteResponse { deleted }))
}
