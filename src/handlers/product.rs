// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::dtos::product::{ProductRequest, ProductResponse};
use crate::state::AppState;
use crate::error::AppError;
use tracing::{error, info, instrument};

fn found_or_404(product: Option<crate::models::product::Product>) -> Response {
    match product {
        Some(product) => Json(ProductResponse::from(product)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match state.products.get_all_products().await {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e)
        }
    }
}

// GET /products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let product = state
        .products
        .get_product_by_id(id)
        .await
        .inspect_err(|e| error!(?e, "Failed to fetch product"))?;

    Ok(found_or_404(product))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state
        .products
        .create_product(payload.into())
        .await
        .inspect_err(|e| error!(?e, "Failed to create product"))?;

    info!(id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/{id} - Replace product fields; the body id is ignored
#[instrument(skip(state, payload))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Response, AppError> {
    let product = state
        .products
        .update_product(id, payload.into())
        .await
        .inspect_err(|e| error!(?e, "Failed to update product"))?;

    Ok(found_or_404(product))
}

// DELETE /products/{id} - Delete product, 204 whether or not it existed
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .products
        .delete_product(id)
        .await
        .inspect_err(|e| error!(?e, "Failed to delete product"))?;

    Ok(StatusCode::NO_CONTENT)
}
