//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use vitrina::CatalogError;

/// 核心错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    NotFound(String),
    /// 商品目录未能加载
    ServiceUnavailable(String),
}

impl From<&CatalogError> for CoreError {
    fn from(err: &CatalogError) -> Self {
        CoreError::ServiceUnavailable(err.to_string())
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}
