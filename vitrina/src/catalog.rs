//! 商品目录加载
//!
//! 按顺序尝试候选路径，使用第一个成功应答的文件。

use crate::config::CatalogConfig;
use crate::error::{CandidateFailure, CatalogError, FetchError};
use crate::fetch::Fetcher;
use crate::model::{Catalog, CatalogDocument, Category, CategoryDocument, Product};
use tracing::{debug, info, warn};

/// 商品目录加载器
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    candidates: Vec<String>,
    categories_path: String,
}

impl CatalogLoader {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            categories_path: CatalogConfig::default().categories_path,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            candidates: config.candidates.clone(),
            categories_path: config.categories_path.clone(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// 加载商品目录
    ///
    /// 网络失败或非 2xx 的候选会被跳过；一旦某个候选应答成功，
    /// 它的解析错误或空列表即为最终结果，不再尝试后续候选。
    pub async fn load<F: Fetcher>(&self, fetcher: &F) -> Result<Catalog, CatalogError> {
        if self.candidates.is_empty() {
            return Err(CatalogError::NoCandidates);
        }

        info!("开始加载商品数据，候选路径 {} 个", self.candidates.len());

        let mut failures = Vec::new();
        for path in &self.candidates {
            let response = match fetcher.fetch(path).await {
                Ok(response) => response,
                Err(error) => {
                    warn!("获取 {} 失败: {}", path, error);
                    failures.push(CandidateFailure {
                        path: path.clone(),
                        error,
                    });
                    continue;
                }
            };

            if !response.is_success() {
                warn!("获取 {} 返回 HTTP {}", path, response.status);
                failures.push(CandidateFailure {
                    path: path.clone(),
                    error: FetchError::Status(response.status),
                });
                continue;
            }

            debug!("使用候选路径 {}", path);
            return parse_catalog(path, &response.body);
        }

        Err(CatalogError::Exhausted(failures))
    }

    /// 加载分类，失败只记录警告
    pub async fn load_categories<F: Fetcher>(&self, fetcher: &F) -> Option<Vec<Category>> {
        match self.try_load_categories(fetcher).await {
            Ok(categories) => {
                info!("分类加载完成: {} 个", categories.len());
                Some(categories)
            }
            Err(e) => {
                warn!("无法加载分类: {}", e);
                None
            }
        }
    }

    async fn try_load_categories<F: Fetcher>(
        &self,
        fetcher: &F,
    ) -> Result<Vec<Category>, CatalogError> {
        let path = self.categories_path.as_str();
        let response = fetcher
            .fetch(path)
            .await
            .map_err(|e| CatalogError::from_fetch(path, e))?;
        if !response.is_success() {
            return Err(CatalogError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }

        let document: CategoryDocument =
            serde_json::from_str(&response.body).map_err(|e| CatalogError::Parse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(document.categories)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

/// 解析目录文档，缺少或为空的商品列表视为失败
///
/// 无法解析的单条商品记录记录警告后跳过。
pub fn parse_catalog(path: &str, body: &str) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(body).map_err(|e| CatalogError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let products = document
        .products
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!("{} 中第 {} 个商品记录无效，已跳过: {}", path, index, e);
                None
            }
        })
        .collect();

    let catalog = Catalog::new(products).ok_or_else(|| CatalogError::EmptyCatalog {
        path: path.to_string(),
    })?;

    info!("商品加载完成: {} 个", catalog.len());
    Ok(catalog)
}
