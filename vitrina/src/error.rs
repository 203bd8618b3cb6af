//! 错误类型定义

use thiserror::Error;

/// 单次获取失败
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("网络请求失败: {0}")]
    Network(String),
    #[error("HTTP 状态异常: {0}")]
    Status(u16),
}

/// 某个候选路径的失败记录
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    pub path: String,
    pub error: FetchError,
}

/// 商品目录加载错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("获取 {path} 失败: {message}")]
    Network { path: String, message: String },
    #[error("获取 {path} 返回 HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("解析 {path} 失败: {message}")]
    Parse { path: String, message: String },
    #[error("{path} 中没有商品")]
    EmptyCatalog { path: String },
    #[error("所有候选路径均失败 ({})", summarize(.0))]
    Exhausted(Vec<CandidateFailure>),
    #[error("没有配置候选路径")]
    NoCandidates,
}

impl CatalogError {
    pub fn from_fetch(path: &str, error: FetchError) -> Self {
        match error {
            FetchError::Network(message) => CatalogError::Network {
                path: path.to_string(),
                message,
            },
            FetchError::Status(status) => CatalogError::Status {
                path: path.to_string(),
                status,
            },
        }
    }
}

fn summarize(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.path, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// 单个商品渲染失败，只记录日志
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("商品 {id} 缺少价格")]
    MissingPrice { id: String },
}
