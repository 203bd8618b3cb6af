//! 商品目录数据模型
//!
//! JSON 字段沿用站点 `data/products.json` 的西班牙语键名。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 商品标识，站点数据中既有数字也有字符串
///
/// 负数和小数按 JSON 原文保存为文本。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => match n.as_u64() {
                Some(id) => ProductId::Number(id),
                None => ProductId::Text(n.to_string()),
            },
            Raw::Text(s) => ProductId::Text(s),
        })
    }
}

/// `null` 按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 只有 JSON `true` 才算推荐，其它值（包括 `null` 和字符串）都不算
fn strictly_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)? == Value::Bool(true))
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

/// 商品记录，加载后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "marca", default, deserialize_with = "null_as_default")]
    pub brand: String,
    /// 缺失时渲染该商品会失败
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        rename = "precioOriginal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<f64>,
    /// 折扣百分比
    #[serde(rename = "descuento", default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(
        rename = "descripcion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "destacado", default, deserialize_with = "strictly_true")]
    pub featured: bool,
}

impl Product {
    /// 原价与折扣同时存在且非零时才显示划线价
    pub fn markdown(&self) -> Option<(f64, f64)> {
        match (self.original_price, self.discount) {
            (Some(original), Some(discount)) if original != 0.0 && discount != 0.0 => {
                Some((original, discount))
            }
            _ => None,
        }
    }
}

/// `data/products.json` 顶层文档，商品逐条解析，单条记录有误不影响其它商品
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(rename = "productos", default)]
    pub products: Option<Vec<Value>>,
}

/// 分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: ProductId,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "subcategorias", default)]
    pub subcategories: Vec<String>,
}

/// `data/categories.json` 顶层文档
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDocument {
    #[serde(rename = "categorias", default)]
    pub categories: Vec<Category>,
}

/// 已加载的商品目录，保证非空
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// 空列表返回 `None`
    pub fn new(products: Vec<Product>) -> Option<Self> {
        if products.is_empty() {
            None
        } else {
            Some(Self { products })
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.to_string() == id)
    }

    /// 第一个标记为推荐的商品，没有则取第一个
    pub fn featured(&self) -> &Product {
        self.products
            .iter()
            .find(|p| p.featured)
            .unwrap_or(&self.products[0])
    }

    /// 网格商品：优先非推荐商品，不足 `limit` 个时退回前 `limit` 个
    pub fn recommended(&self, limit: usize) -> Vec<&Product> {
        let picked: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| !p.featured)
            .take(limit)
            .collect();

        if picked.len() < limit {
            self.products.iter().take(limit).collect()
        } else {
            picked
        }
    }
}
