//! 服务端渲染页面片段
//!
//! 与浏览器端使用同一个视图模型，渲染到内存页面后取出标记。

use crate::app::catalog::service::CatalogService;
use vitrina::markup::escape_html;
use vitrina::{MemoryPage, Page, Slot, Storefront};

/// 渲染完成的内存页面
pub fn render_page(catalog: &CatalogService) -> MemoryPage {
    let mut storefront = Storefront::new(catalog.settings().clone());
    let mut page = MemoryPage::new();
    storefront.apply_load(catalog.load_result().cloned().map_err(|e| e.clone()), &mut page);
    page
}

/// 推荐商品面板片段，使用与静态模板相同的类名
pub fn featured_fragment(page: &MemoryPage) -> String {
    let title = page.text(Slot::ProductTitle).unwrap_or_default();
    let price = page.html(Slot::ProductPrice).unwrap_or_default();
    let image = page.html(Slot::ProductImage).unwrap_or_default();

    let mut html = format!(
        r#"<div class="product-image">{}</div><div class="product-info"><h1 class="product-title">{}</h1><div class="product-price">{}</div>"#,
        image,
        escape_html(&title),
        price
    );
    if let Some(note) = page.text(Slot::EditorNote) {
        html.push_str(&format!(
            r#"<div class="editor-note"><p>{}</p></div>"#,
            escape_html(&note)
        ));
    }
    html.push_str("</div>");
    html
}

/// 商品网格片段，加载失败时为错误提示
pub fn grid_fragment(page: &MemoryPage) -> String {
    page.grid_html().unwrap_or_default()
}
