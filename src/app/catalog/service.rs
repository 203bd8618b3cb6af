//! 商品目录业务服务

use super::model::ProductEntry;
use crate::core::error::CoreError;
use std::sync::Arc;
use tracing::{info, warn};
use vitrina::{
    Catalog, CatalogError, CatalogLoader, Category, Config, FsFetcher, StorefrontSettings,
};

/// 启动时加载的目录快照
#[derive(Debug)]
struct Snapshot {
    result: Result<Catalog, CatalogError>,
    categories: Vec<Category>,
    settings: StorefrontSettings,
}

#[derive(Clone, Debug)]
pub struct CatalogService {
    snapshot: Arc<Snapshot>,
}

impl CatalogService {
    /// 从静态站点目录加载商品目录和分类
    pub async fn load(config: &Config) -> Self {
        let fetcher = FsFetcher::new(&config.http.static_dir);
        let loader = CatalogLoader::from_config(&config.catalog);

        info!("从 {} 加载商品目录", fetcher.root().display());
        let result = loader.load(&fetcher).await;
        if let Err(e) = &result {
            warn!("商品目录加载失败，API 将返回 503: {}", e);
        }

        let categories = if config.catalog.load_categories {
            loader.load_categories(&fetcher).await.unwrap_or_default()
        } else {
            Vec::new()
        };

        Self::new(result, categories, StorefrontSettings::from(config))
    }

    pub fn new(
        result: Result<Catalog, CatalogError>,
        categories: Vec<Category>,
        settings: StorefrontSettings,
    ) -> Self {
        Self {
            snapshot: Arc::new(Snapshot {
                result,
                categories,
                settings,
            }),
        }
    }

    pub fn load_result(&self) -> Result<&Catalog, &CatalogError> {
        self.snapshot.result.as_ref()
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.snapshot.settings
    }

    fn catalog(&self) -> Result<&Catalog, CoreError> {
        self.load_result().map_err(CoreError::from)
    }

    fn entry(&self, product: &vitrina::Product) -> ProductEntry {
        ProductEntry::new(product, &self.snapshot.settings.currency_prefix)
    }

    pub fn list_products(&self) -> Result<Vec<ProductEntry>, CoreError> {
        Ok(self
            .catalog()?
            .products()
            .iter()
            .map(|p| self.entry(p))
            .collect())
    }

    pub fn featured(&self) -> Result<ProductEntry, CoreError> {
        Ok(self.entry(self.catalog()?.featured()))
    }

    pub fn recommended(&self) -> Result<Vec<ProductEntry>, CoreError> {
        let limit = self.snapshot.settings.max_recommended;
        Ok(self
            .catalog()?
            .recommended(limit)
            .into_iter()
            .map(|p| self.entry(p))
            .collect())
    }

    pub fn get_product(&self, id: &str) -> Result<ProductEntry, CoreError> {
        self.catalog()?
            .find(id)
            .map(|p| self.entry(p))
            .ok_or_else(|| CoreError::NotFound(format!("商品 {} 不存在", id)))
    }

    pub fn categories(&self) -> Vec<Category> {
        self.snapshot.categories.clone()
    }
}
