//! 页面片段处理器

use axum::{extract::State, response::Html};

use super::service;
use crate::AppState;

pub async fn featured(State(state): State<AppState>) -> Html<String> {
    let page = service::render_page(&state.catalog);
    Html(service::featured_fragment(&page))
}

pub async fn grid(State(state): State<AppState>) -> Html<String> {
    let page = service::render_page(&state.catalog);
    Html(service::grid_fragment(&page))
}
