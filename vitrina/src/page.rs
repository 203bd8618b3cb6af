//! 渲染上下文
//!
//! 页面逻辑只通过 `Page` 访问文档、窗口和设备信息，浏览器端由 `vitrina-web`
//! 的 `DomPage` 实现，测试和服务端渲染使用 [`crate::memory::MemoryPage`]。

use crate::interaction::{ButtonLook, CartTarget, UiEvent};
use crate::markup::CardView;
use std::time::Duration;

/// 推荐商品面板中的固定位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ProductTitle,
    ProductPrice,
    EditorNote,
    ProductImage,
    /// 推荐面板现价，读取用
    CurrentPrice,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::ProductTitle,
        Slot::ProductPrice,
        Slot::EditorNote,
        Slot::ProductImage,
        Slot::CurrentPrice,
    ];

    /// 对应的 CSS 选择器
    pub fn selector(self) -> &'static str {
        match self {
            Slot::ProductTitle => ".product-title",
            Slot::ProductPrice => ".product-price",
            Slot::EditorNote => ".editor-note p",
            Slot::ProductImage => ".product-image",
            Slot::CurrentPrice => ".product-info .current-price",
        }
    }
}

/// 其余页面约定的选择器
pub mod selectors {
    pub const PRODUCTS_GRID: &str = ".products-grid";
    pub const PRODUCT_CARD: &str = ".product-card";
    pub const PRODUCT_INFO: &str = ".product-info";
    pub const ADD_BUTTON: &str = ".btn-add";
    pub const NAV_ITEM: &str = ".nav-item";
    pub const NAV_LINK: &str = ".nav-link";
    pub const DROPDOWN_MENU: &str = ".dropdown-menu";
    pub const SEARCH_INPUT: &str = ".search-bar input";
    pub const SEARCH_BUTTON: &str = ".search-bar button";
    pub const CART_ICON: &str = ".fa-shopping-cart";
    pub const CART_BADGE: &str = ".cart-badge";
    pub const RETRY_BUTTON: &str = "[data-action=\"retry\"]";
}

/// 页面渲染上下文
///
/// 写入类方法在目标元素不存在时返回 `false`，调用方据此静默跳过。
pub trait Page {
    /// 设置元素文本
    fn set_text(&mut self, slot: Slot, text: &str) -> bool;

    /// 设置元素内部 HTML
    fn set_html(&mut self, slot: Slot, html: &str) -> bool;

    /// 读取元素文本
    fn text(&self, slot: Slot) -> Option<String>;

    /// 清空商品网格
    fn clear_grid(&mut self) -> bool;

    /// 向网格追加一张卡片
    fn append_card(&mut self, card: &CardView) -> bool;

    /// 用给定 HTML 替换整个网格内容
    fn replace_grid(&mut self, html: &str) -> bool;

    /// 导航项数量
    fn nav_item_count(&self) -> usize;

    /// 显示或隐藏第 `index` 个导航项的下拉菜单
    fn set_dropdown_visible(&mut self, index: usize, visible: bool);

    /// 是否为触屏设备，只在初始化时调用
    fn is_touch_device(&self) -> bool;

    /// 当前视口宽度（像素）
    fn viewport_width(&self) -> u32;

    /// 搜索框的当前输入
    fn search_value(&self) -> Option<String>;

    /// 购物车角标的当前文字
    fn cart_badge(&self) -> Option<String>;

    /// 写入购物车角标，角标不存在时在购物车图标旁创建
    fn set_cart_badge(&mut self, count: u32) -> bool;

    /// 切换加入购物车按钮外观，`None` 恢复原样
    fn set_add_button(&mut self, target: &CartTarget, look: Option<&ButtonLook>) -> bool;

    /// 阻塞式提示
    fn alert(&mut self, message: &str);

    /// 延时派发事件
    fn schedule(&mut self, delay: Duration, event: UiEvent);

    /// 重新加载页面
    fn reload(&mut self);
}
