//! Vitrina 浏览器入口
//!
//! 编译为 WebAssembly 后由站点 `index.html` 加载；非 wasm 目标下为空库。
#![cfg(target_arch = "wasm32")]

mod app;
mod console;
mod dom;
mod events;
mod fetch;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init_logging();
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = app::run().await {
            tracing::error!("页面初始化失败: {:?}", e);
        }
    });
}
