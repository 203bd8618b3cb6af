//! 事件委托
//!
//! 文档级点击监听器负责购物车按钮、重试、搜索按钮、导航链接和导航外点击；
//! 网格重建后不需要重新绑定。

use crate::app::{dispatch, App};
use std::rc::Rc;
use vitrina::page::selectors;
use vitrina::{CartTarget, UiEvent};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// 按钮所在的商品
fn cart_target(button: &Element) -> Option<CartTarget> {
    if let Some(card) = closest(button, selectors::PRODUCT_CARD) {
        let index = card.get_attribute("data-index")?.parse().ok()?;
        let id = card.get_attribute("data-id")?;
        return Some(CartTarget::Card { index, id });
    }
    closest(button, selectors::PRODUCT_INFO).map(|_| CartTarget::Featured)
}

fn on_click(app: &Rc<App>, event: &Event) {
    let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return;
    };

    if let Some(button) = closest(&target, selectors::ADD_BUTTON) {
        if let Some(cart_target) = cart_target(&button) {
            if dispatch(app, UiEvent::AddToCart(cart_target)) {
                event.stop_propagation();
            }
        }
        return;
    }

    if closest(&target, selectors::RETRY_BUTTON).is_some() {
        dispatch(app, UiEvent::Retry);
        return;
    }

    if closest(&target, selectors::SEARCH_BUTTON).is_some() {
        dispatch(app, UiEvent::SearchSubmit);
    }

    let nav_item = closest(&target, selectors::NAV_ITEM);
    match nav_item {
        Some(item) => {
            if closest(&target, selectors::NAV_LINK).is_none() {
                return;
            }
            let index = app.page.borrow().nav_index_of(&item);
            if let Some(index) = index {
                if dispatch(app, UiEvent::NavLinkClick { index }) {
                    event.prevent_default();
                }
            }
        }
        None => {
            dispatch(app, UiEvent::OutsideClick);
        }
    }
}

fn listen<F>(target: &web_sys::EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    // 监听器与页面同生命周期
    closure.forget();
    Ok(())
}

/// 安装所有监听器，只调用一次
pub fn install(app: &Rc<App>) -> Result<(), JsValue> {
    let (document, nav_count, search_input) = {
        let page = app.page.borrow();
        let document = page.document().clone();
        let search_input = document.query_selector(selectors::SEARCH_INPUT)?;
        let nav_count = document.query_selector_all(selectors::NAV_ITEM)?.length();
        (document, nav_count, search_input)
    };

    let click_app = Rc::clone(app);
    listen(&document, "click", move |event| on_click(&click_app, &event))?;

    if let Some(input) = search_input {
        let key_app = Rc::clone(app);
        listen(&input, "keypress", move |event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                dispatch(&key_app, UiEvent::SearchKey { key: key_event.key() });
            }
        })?;
    }

    // 悬停监听对触屏设备无效，由视图模型判断
    for index in 0..nav_count as usize {
        let Some(item) = app.page.borrow().nav_item(index) else {
            continue;
        };
        let enter_app = Rc::clone(app);
        listen(&item, "mouseenter", move |_| {
            dispatch(&enter_app, UiEvent::NavHover { index, entered: true });
        })?;
        let leave_app = Rc::clone(app);
        listen(&item, "mouseleave", move |_| {
            dispatch(&leave_app, UiEvent::NavHover { index, entered: false });
        })?;
    }

    Ok(())
}
