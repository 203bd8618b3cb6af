//! 内存中的页面实现
//!
//! 记录所有写入、提示和延时事件，供测试断言和服务端渲染片段使用。

use crate::interaction::{ButtonLook, CartTarget, UiEvent};
use crate::markup::{self, CardView};
use crate::page::{Page, Slot};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// 网格内容
#[derive(Debug, Clone, PartialEq)]
enum GridContent {
    Cards(Vec<CardView>),
    Html(String),
}

/// 内存页面
#[derive(Debug, Clone)]
pub struct MemoryPage {
    present: HashSet<Slot>,
    texts: HashMap<Slot, String>,
    htmls: HashMap<Slot, String>,
    grid: Option<GridContent>,
    dropdowns: Vec<bool>,
    touch: bool,
    viewport_width: u32,
    search_value: Option<String>,
    cart_icon: bool,
    badge: Option<String>,
    buttons: HashMap<CartTarget, ButtonLook>,
    alerts: Vec<String>,
    scheduled: Vec<(Duration, UiEvent)>,
    reloads: u32,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// 包含全部约定元素的桌面页面：3 个导航项、非触屏、1280 像素宽
    pub fn new() -> Self {
        Self {
            present: Slot::ALL.into_iter().collect(),
            texts: HashMap::new(),
            htmls: HashMap::new(),
            grid: Some(GridContent::Cards(Vec::new())),
            dropdowns: vec![false; 3],
            touch: false,
            viewport_width: 1280,
            search_value: Some(String::new()),
            cart_icon: true,
            badge: None,
            buttons: HashMap::new(),
            alerts: Vec::new(),
            scheduled: Vec::new(),
            reloads: 0,
        }
    }

    /// 没有任何约定元素的空白页面
    pub fn blank() -> Self {
        Self {
            present: HashSet::new(),
            grid: None,
            dropdowns: Vec::new(),
            search_value: None,
            cart_icon: false,
            ..Self::new()
        }
    }

    /// 模拟触屏设备
    pub fn with_touch(mut self, viewport_width: u32) -> Self {
        self.touch = true;
        self.viewport_width = viewport_width;
        self
    }

    pub fn with_nav_items(mut self, count: usize) -> Self {
        self.dropdowns = vec![false; count];
        self
    }

    pub fn without_slot(mut self, slot: Slot) -> Self {
        self.present.remove(&slot);
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }

    pub fn without_cart_icon(mut self) -> Self {
        self.cart_icon = false;
        self
    }

    pub fn with_badge(mut self, text: impl Into<String>) -> Self {
        self.badge = Some(text.into());
        self
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn type_search(&mut self, value: impl Into<String>) {
        self.search_value = Some(value.into());
    }

    pub fn html(&self, slot: Slot) -> Option<&str> {
        self.htmls.get(&slot).map(String::as_str)
    }

    /// 网格中的卡片，网格被错误提示替换时为空
    pub fn cards(&self) -> &[CardView] {
        match &self.grid {
            Some(GridContent::Cards(cards)) => cards,
            _ => &[],
        }
    }

    /// 网格的完整 HTML
    pub fn grid_html(&self) -> Option<String> {
        match self.grid.as_ref()? {
            GridContent::Cards(cards) => Some(cards.iter().map(markup::card_html).collect()),
            GridContent::Html(html) => Some(html.clone()),
        }
    }

    pub fn dropdown_visible(&self, index: usize) -> bool {
        self.dropdowns.get(index).copied().unwrap_or(false)
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    pub fn button_look(&self, target: &CartTarget) -> Option<&ButtonLook> {
        self.buttons.get(target)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// 取出所有待派发的延时事件
    pub fn take_scheduled(&mut self) -> Vec<(Duration, UiEvent)> {
        std::mem::take(&mut self.scheduled)
    }
}

impl Page for MemoryPage {
    fn set_text(&mut self, slot: Slot, text: &str) -> bool {
        if !self.present.contains(&slot) {
            return false;
        }
        self.htmls.remove(&slot);
        self.texts.insert(slot, text.to_string());
        true
    }

    fn set_html(&mut self, slot: Slot, html: &str) -> bool {
        if !self.present.contains(&slot) {
            return false;
        }
        self.texts.remove(&slot);
        self.htmls.insert(slot, html.to_string());
        true
    }

    fn text(&self, slot: Slot) -> Option<String> {
        if !self.present.contains(&slot) {
            return None;
        }
        self.texts.get(&slot).cloned()
    }

    fn clear_grid(&mut self) -> bool {
        match self.grid.as_mut() {
            Some(grid) => {
                *grid = GridContent::Cards(Vec::new());
                true
            }
            None => false,
        }
    }

    fn append_card(&mut self, card: &CardView) -> bool {
        match self.grid.as_mut() {
            Some(GridContent::Cards(cards)) => {
                cards.push(card.clone());
                true
            }
            Some(grid @ GridContent::Html(_)) => {
                *grid = GridContent::Cards(vec![card.clone()]);
                true
            }
            None => false,
        }
    }

    fn replace_grid(&mut self, html: &str) -> bool {
        match self.grid.as_mut() {
            Some(grid) => {
                *grid = GridContent::Html(html.to_string());
                true
            }
            None => false,
        }
    }

    fn nav_item_count(&self) -> usize {
        self.dropdowns.len()
    }

    fn set_dropdown_visible(&mut self, index: usize, visible: bool) {
        if let Some(dropdown) = self.dropdowns.get_mut(index) {
            *dropdown = visible;
        }
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn search_value(&self) -> Option<String> {
        self.search_value.clone()
    }

    fn cart_badge(&self) -> Option<String> {
        self.badge.clone()
    }

    fn set_cart_badge(&mut self, count: u32) -> bool {
        if !self.cart_icon {
            return false;
        }
        self.badge = Some(count.to_string());
        true
    }

    fn set_add_button(&mut self, target: &CartTarget, look: Option<&ButtonLook>) -> bool {
        match look {
            Some(look) => {
                self.buttons.insert(target.clone(), *look);
            }
            None => {
                self.buttons.remove(target);
            }
        }
        true
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn schedule(&mut self, delay: Duration, event: UiEvent) {
        self.scheduled.push((delay, event));
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}
