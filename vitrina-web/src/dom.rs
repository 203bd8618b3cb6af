//! 基于 web-sys 的页面实现

use std::time::Duration;
use vitrina::interaction::ButtonLook;
use vitrina::markup::{self, CardView, CART_BADGE_STYLE};
use vitrina::page::selectors;
use vitrina::{CartTarget, Page, Slot, UiEvent};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// 保存按钮原文字的属性
const ORIGINAL_LABEL_ATTR: &str = "data-original-label";

pub struct DomPage {
    window: Window,
    document: Document,
    /// 等待交给定时器的事件
    pending: Vec<(Duration, UiEvent)>,
}

impl DomPage {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("没有 window 对象"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("没有 document 对象"))?;
        Ok(Self {
            window,
            document,
            pending: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn take_pending(&mut self) -> Vec<(Duration, UiEvent)> {
        std::mem::take(&mut self.pending)
    }

    fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    /// 第 `index` 个导航项
    pub fn nav_item(&self, index: usize) -> Option<Element> {
        let items = self.document.query_selector_all(selectors::NAV_ITEM).ok()?;
        items.item(index as u32)?.dyn_into::<Element>().ok()
    }

    /// 元素在所有导航项中的序号
    pub fn nav_index_of(&self, item: &Element) -> Option<usize> {
        let items = self.document.query_selector_all(selectors::NAV_ITEM).ok()?;
        (0..items.length())
            .find(|&i| {
                items
                    .item(i)
                    .map(|node| node.is_same_node(Some(item.as_ref())))
                    .unwrap_or(false)
            })
            .map(|i| i as usize)
    }

    fn cart_holder(&self) -> Option<Element> {
        self.find(selectors::CART_ICON)?.parent_element()
    }

    fn add_button(&self, target: &CartTarget) -> Option<HtmlElement> {
        let selector = match target {
            CartTarget::Card { index, id } => format!(
                "{}[data-index=\"{}\"][data-id=\"{}\"] {}",
                selectors::PRODUCT_CARD,
                index,
                escape_attr(id),
                selectors::ADD_BUTTON
            ),
            CartTarget::Featured => {
                format!("{} {}", selectors::PRODUCT_INFO, selectors::ADD_BUTTON)
            }
        };
        self.find(&selector)?.dyn_into::<HtmlElement>().ok()
    }
}

/// 属性选择器中的字符串转义
fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Page for DomPage {
    fn set_text(&mut self, slot: Slot, text: &str) -> bool {
        match self.find(slot.selector()) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_html(&mut self, slot: Slot, html: &str) -> bool {
        match self.find(slot.selector()) {
            Some(element) => {
                element.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn text(&self, slot: Slot) -> Option<String> {
        self.find(slot.selector())?.text_content()
    }

    fn clear_grid(&mut self) -> bool {
        match self.find(selectors::PRODUCTS_GRID) {
            Some(grid) => {
                grid.set_inner_html("");
                true
            }
            None => false,
        }
    }

    fn append_card(&mut self, card: &CardView) -> bool {
        let Some(grid) = self.find(selectors::PRODUCTS_GRID) else {
            return false;
        };
        let Ok(element) = self.document.create_element("div") else {
            return false;
        };
        element.set_class_name("product-card");
        if element
            .set_attribute("data-index", &card.index.to_string())
            .is_err()
            || element.set_attribute("data-id", &card.id).is_err()
        {
            return false;
        }
        element.set_inner_html(&markup::card_inner_html(card));
        grid.append_child(&element).is_ok()
    }

    fn replace_grid(&mut self, html: &str) -> bool {
        match self.find(selectors::PRODUCTS_GRID) {
            Some(grid) => {
                grid.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn nav_item_count(&self) -> usize {
        self.document
            .query_selector_all(selectors::NAV_ITEM)
            .map(|items| items.length() as usize)
            .unwrap_or(0)
    }

    fn set_dropdown_visible(&mut self, index: usize, visible: bool) {
        let dropdown = self
            .nav_item(index)
            .and_then(|item| item.query_selector(selectors::DROPDOWN_MENU).ok().flatten())
            .and_then(|menu| menu.dyn_into::<HtmlElement>().ok());
        if let Some(menu) = dropdown {
            let display = if visible { "block" } else { "none" };
            let _ = menu.style().set_property("display", display);
        }
    }

    fn is_touch_device(&self) -> bool {
        let has_touch_start =
            js_sys::Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
        has_touch_start || self.window.navigator().max_touch_points() > 0
    }

    fn viewport_width(&self) -> u32 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .map(|w| w as u32)
            .unwrap_or(0)
    }

    fn search_value(&self) -> Option<String> {
        let input = self
            .find(selectors::SEARCH_INPUT)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(input.value())
    }

    fn cart_badge(&self) -> Option<String> {
        self.cart_holder()?
            .query_selector(selectors::CART_BADGE)
            .ok()
            .flatten()?
            .text_content()
    }

    fn set_cart_badge(&mut self, count: u32) -> bool {
        let Some(holder) = self.cart_holder() else {
            return false;
        };

        let existing = holder.query_selector(selectors::CART_BADGE).ok().flatten();
        let badge = match existing {
            Some(badge) => badge,
            None => {
                let Ok(badge) = self.document.create_element("span") else {
                    return false;
                };
                badge.set_class_name("cart-badge");
                let _ = badge.set_attribute("style", CART_BADGE_STYLE);
                if let Some(holder) = holder.dyn_ref::<HtmlElement>() {
                    let _ = holder.style().set_property("position", "relative");
                }
                if holder.append_child(&badge).is_err() {
                    return false;
                }
                badge
            }
        };
        badge.set_text_content(Some(&count.to_string()));
        true
    }

    fn set_add_button(&mut self, target: &CartTarget, look: Option<&ButtonLook>) -> bool {
        let Some(button) = self.add_button(target) else {
            return false;
        };
        let style = button.style();

        match look {
            Some(look) => {
                if !button.has_attribute(ORIGINAL_LABEL_ATTR) {
                    let label = button.text_content().unwrap_or_default();
                    let _ = button.set_attribute(ORIGINAL_LABEL_ATTR, &label);
                }
                button.set_text_content(Some(look.label));
                let _ = style.set_property("background-color", look.background);
                let _ = style.set_property("color", look.color);
            }
            None => {
                let label = button
                    .get_attribute(ORIGINAL_LABEL_ATTR)
                    .unwrap_or_else(|| markup::ADD_LABEL.to_string());
                let _ = button.remove_attribute(ORIGINAL_LABEL_ATTR);
                button.set_text_content(Some(&label));
                let _ = style.remove_property("background-color");
                let _ = style.remove_property("color");
            }
        }
        true
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn schedule(&mut self, delay: Duration, event: UiEvent) {
        self.pending.push((delay, event));
    }

    fn reload(&mut self) {
        let _ = self.window.location().reload();
    }
}
