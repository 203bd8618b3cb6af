//! 页面交互状态：导航下拉菜单、购物车按钮、搜索框

use std::collections::HashMap;
use std::fmt;

/// 加入购物车按钮所在位置
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartTarget {
    /// 网格卡片：`data-index` 定位，`data-id` 用于核对
    Card { index: usize, id: String },
    /// 推荐商品面板 `.product-info`
    Featured,
}

impl fmt::Display for CartTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartTarget::Card { index, id } => write!(f, "card#{}:{}", index, id),
            CartTarget::Featured => f.write_str("featured"),
        }
    }
}

/// 页面事件，浏览器端通过事件委托统一派发
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// 点击第 `index` 个导航项的链接
    NavLinkClick { index: usize },
    /// 鼠标进入或离开第 `index` 个导航项
    NavHover { index: usize, entered: bool },
    /// 点击发生在所有 `.nav-item` 之外
    OutsideClick,
    AddToCart(CartTarget),
    /// 延时恢复按钮外观
    RestoreButton { target: CartTarget, generation: u64 },
    SearchSubmit,
    SearchKey { key: String },
    /// 加载失败提示中的重试按钮
    Retry,
}

/// 按钮外观
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLook {
    pub label: &'static str,
    pub background: &'static str,
    pub color: &'static str,
}

/// 刚加入购物车时的按钮外观
pub const ADDED_LOOK: ButtonLook = ButtonLook {
    label: "¡AGREGADO!",
    background: "#4CAF50",
    color: "white",
};

/// 导航下拉菜单状态
///
/// 设备类型在初始化时检测一次，之后不再随窗口变化重新判断。
#[derive(Debug, Clone)]
pub struct NavMenu {
    touch: bool,
    breakpoint: u32,
    open: Vec<bool>,
}

impl NavMenu {
    pub fn new(item_count: usize, touch: bool, breakpoint: u32) -> Self {
        Self {
            touch,
            breakpoint,
            open: vec![false; item_count],
        }
    }

    pub fn is_touch(&self) -> bool {
        self.touch
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// 触屏且窄屏时切换当前下拉并关闭其它下拉
    ///
    /// 返回需要更新的 (序号, 是否显示) 列表；`None` 表示保留链接默认行为。
    pub fn link_click(&mut self, index: usize, viewport_width: u32) -> Option<Vec<(usize, bool)>> {
        if !self.touch || viewport_width > self.breakpoint || index >= self.open.len() {
            return None;
        }

        let mut changes = Vec::new();
        for (i, open) in self.open.iter_mut().enumerate() {
            let next = if i == index { !*open } else { false };
            if i == index || *open != next {
                changes.push((i, next));
            }
            *open = next;
        }
        Some(changes)
    }

    /// 非触屏设备悬停打开、离开关闭
    pub fn hover(&mut self, index: usize, entered: bool) -> Option<(usize, bool)> {
        if self.touch {
            return None;
        }
        let slot = self.open.get_mut(index)?;
        *slot = entered;
        Some((index, entered))
    }

    /// 触屏设备点击导航外部时关闭所有下拉
    pub fn close_all(&mut self) -> Vec<(usize, bool)> {
        if !self.touch {
            return Vec::new();
        }
        self.open.iter_mut().for_each(|open| *open = false);
        (0..self.open.len()).map(|i| (i, false)).collect()
    }
}

/// 购物车角标计数与按钮反馈状态
#[derive(Debug, Clone, Default)]
pub struct CartState {
    count: u32,
    generations: HashMap<CartTarget, u64>,
}

impl CartState {
    /// 从页面已有角标文字恢复计数，无法解析视为 0
    pub fn from_badge(text: Option<&str>) -> Self {
        let count = text
            .and_then(|t| t.trim().parse::<u32>().ok())
            .unwrap_or(0);
        Self {
            count,
            generations: HashMap::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// 计数加一，返回新计数，达到上限后不再增加
    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    /// 开始一次按钮反馈，返回本次反馈的代号
    pub fn begin_feedback(&mut self, target: &CartTarget) -> u64 {
        let generation = self.generations.entry(target.clone()).or_insert(0);
        *generation += 1;
        *generation
    }

    /// 只有最近一次反馈到期才恢复按钮
    pub fn finish_feedback(&mut self, target: &CartTarget, generation: u64) -> bool {
        match self.generations.get(target) {
            Some(&latest) if latest == generation => {
                self.generations.remove(target);
                true
            }
            _ => false,
        }
    }
}

/// 加入购物车提示
pub fn cart_alert(title: &str, price: &str) -> String {
    format!(
        "✅ Producto agregado al carrito:\n{}\nPrecio: {}",
        title, price
    )
}

/// 搜索提示，空白输入返回 `None`
pub fn search_alert(raw: &str) -> Option<String> {
    let term = raw.trim();
    if term.is_empty() {
        return None;
    }
    Some(format!(
        "🔍 Buscando: \"{}\"\n\nEn una versión completa, aquí se filtrarían los productos según tu búsqueda.",
        term
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_tap_toggles_and_closes_siblings() {
        let mut nav = NavMenu::new(3, true, 768);

        let changes = nav.link_click(1, 400).unwrap();
        assert_eq!(changes, vec![(1, true)]);
        assert!(nav.is_open(1));

        let changes = nav.link_click(2, 400).unwrap();
        assert_eq!(changes, vec![(1, false), (2, true)]);
        assert!(!nav.is_open(1));
        assert!(nav.is_open(2));

        let changes = nav.link_click(2, 400).unwrap();
        assert_eq!(changes, vec![(2, false)]);
        assert!(!nav.is_open(2));
    }

    #[test]
    fn test_touch_tap_on_wide_viewport_keeps_navigation() {
        let mut nav = NavMenu::new(2, true, 768);
        assert!(nav.link_click(0, 1024).is_none());
        assert!(!nav.is_open(0));
        // 断点本身仍算窄屏
        assert!(nav.link_click(0, 768).is_some());
    }

    #[test]
    fn test_outside_click_closes_all_on_touch() {
        let mut nav = NavMenu::new(2, true, 768);
        nav.link_click(0, 320);
        assert_eq!(nav.close_all(), vec![(0, false), (1, false)]);
        assert!(!nav.is_open(0));
    }

    #[test]
    fn test_hover_only_on_pointer_devices() {
        let mut pointer = NavMenu::new(2, false, 768);
        assert_eq!(pointer.hover(1, true), Some((1, true)));
        assert!(pointer.is_open(1));
        assert_eq!(pointer.hover(1, false), Some((1, false)));
        assert!(pointer.link_click(1, 320).is_none());
        assert!(pointer.close_all().is_empty());

        let mut touch = NavMenu::new(2, true, 768);
        assert_eq!(touch.hover(1, true), None);
    }

    #[test]
    fn test_cart_count_from_badge() {
        assert_eq!(CartState::from_badge(None).count(), 0);
        assert_eq!(CartState::from_badge(Some("3")).count(), 3);
        assert_eq!(CartState::from_badge(Some("abc")).count(), 0);
    }

    #[test]
    fn test_cart_count_saturates() {
        let mut cart = CartState::from_badge(Some("4294967295"));
        assert_eq!(cart.increment(), u32::MAX);
        assert_eq!(cart.count(), u32::MAX);
    }

    #[test]
    fn test_only_latest_feedback_restores() {
        let mut cart = CartState::default();
        let target = CartTarget::Card {
            index: 0,
            id: "1".to_string(),
        };
        let first = cart.begin_feedback(&target);
        let second = cart.begin_feedback(&target);

        assert!(!cart.finish_feedback(&target, first));
        assert!(cart.finish_feedback(&target, second));
        assert!(!cart.finish_feedback(&target, second));
    }

    #[test]
    fn test_search_alert() {
        assert_eq!(search_alert("   "), None);
        let message = search_alert("  sérum  ").unwrap();
        assert!(message.starts_with("🔍 Buscando: \"sérum\""));
    }
}
