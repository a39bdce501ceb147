//! Products API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::repository::ProductRepository;
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate, ProductUpdate};

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/products - list products
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ProductsResponse>> {
    let products = ProductRepository::new(state.store.clone()).find_all()?;
    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductResponse>> {
    let product = ProductRepository::new(state.store.clone()).create(payload, Some(user.id))?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// PUT /api/products/{id} - update a product
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    let product =
        ProductRepository::new(state.store.clone()).update(&id, payload, Some(user.id))?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// DELETE /api/products/{id} - remove a product
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    ProductRepository::new(state.store.clone()).delete(&id)?;
    Ok(Json(DeleteResponse { success: true }))
}
