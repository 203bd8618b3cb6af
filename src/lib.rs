//! # Vitrina 预览服务器
//!
//! 本地托管静态店铺首页：
//! - 静态文件（`index.html`、样式、wasm 包、`data/*.json`）
//! - 商品目录 JSON API
//! - 服务端渲染的推荐面板和商品网格片段

pub mod app;
pub mod core;

use app::catalog::{handler as catalog, service::CatalogService};
use app::fragments::handler as fragments;
use axum::{extract::State, middleware, response::Json, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use vitrina::config::HttpConfig;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// 构建路由，未匹配的路径交给静态文件服务
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/featured", get(catalog::get_featured))
        .route("/api/products/recommended", get(catalog::list_recommended))
        .route("/api/products/:id", get(catalog::get_product))
        .route("/api/categories", get(catalog::list_categories))
        .route("/fragments/featured", get(fragments::featured))
        .route("/fragments/grid", get(fragments::grid))
        .fallback_service(ServeDir::new(&http.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
                .layer(middleware::from_fn(
                    crate::core::middleware::request_logging_middleware,
                )),
        )
        .with_state(state)
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let products = state
        .catalog
        .load_result()
        .map(|c| c.len())
        .unwrap_or(0);
    let status = if products > 0 { "healthy" } else { "degraded" };
    Json(serde_json::json!({
        "status": status,
        "products": products,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
