//! 商品目录处理器

use axum::{
    extract::{Path, State},
    response::Json,
};
use vitrina::Category;

use super::model::ProductEntry;
use crate::core::{error::CoreError, response::ApiResponse};
use crate::AppState;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductEntry>>>, CoreError> {
    let products = state.catalog.list_products()?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn get_featured(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProductEntry>>, CoreError> {
    let product = state.catalog.featured()?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn list_recommended(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductEntry>>>, CoreError> {
    let products = state.catalog.recommended()?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductEntry>>, CoreError> {
    let product = state.catalog.get_product(&id)?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<Category>>> {
    Json(ApiResponse::list(state.catalog.categories()))
}
