//! 商品 API 数据模型

use serde::Serialize;
use vitrina::markup::{brand_swatch, PriceView};
use vitrina::Product;

/// 商品条目：原始记录加上页面使用的展示字段
#[derive(Debug, Clone, Serialize)]
pub struct ProductEntry {
    #[serde(flatten)]
    pub product: Product,
    pub swatch: &'static str,
    /// `US$ 40.00`，缺少价格时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
}

impl ProductEntry {
    pub fn new(product: &Product, currency_prefix: &str) -> Self {
        let price = PriceView::from_product(product, currency_prefix);
        let (original_price_label, discount_label) =
            match price.as_ref().and_then(|p| p.markdown.clone()) {
                Some((original, discount)) => (Some(original), Some(discount)),
                None => (None, None),
            };
        Self {
            product: product.clone(),
            swatch: brand_swatch(&product.brand),
            price_label: price.map(|p| p.current),
            original_price_label,
            discount_label,
        }
    }
}
