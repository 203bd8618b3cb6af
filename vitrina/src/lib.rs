//! # Vitrina 店铺首页
//!
//! 静态店铺首页的页面逻辑，与运行环境无关：
//! - 按候选路径顺序加载 `data/products.json`
//! - 渲染推荐商品面板和推荐商品网格
//! - 导航下拉菜单、加入购物车反馈、搜索提示
//!
//! 浏览器绑定见 `vitrina-web`，本地预览服务器见 `vitrina-server`。

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod interaction;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod markup;
pub mod memory;
pub mod model;
pub mod page;
pub mod storefront;

pub use catalog::CatalogLoader;
pub use config::{Config, ConfigError};
pub use error::{CatalogError, FetchError, RenderError};
pub use fetch::{FetchResponse, Fetcher};
pub use interaction::{CartTarget, UiEvent};
pub use memory::MemoryPage;
pub use model::{Catalog, Category, Product, ProductId};
pub use page::{Page, Slot};
pub use storefront::{LoadState, Storefront, StorefrontSettings};

#[cfg(not(target_arch = "wasm32"))]
pub use fetch::FsFetcher;
