//! 核心响应处理模块

use serde::Serialize;
use uuid::Uuid;

/// API 响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    /// 列表响应的条目数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub request_id: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            total: None,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            total: Some(total),
            ..Self::success(data)
        }
    }
}
