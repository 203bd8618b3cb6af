use crate::dom::DomPage;
use crate::events;
use crate::fetch::BrowserFetcher;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use vitrina::{CatalogLoader, Config, Storefront, UiEvent};
use wasm_bindgen::prelude::*;

/// 页面运行时：视图模型和 DOM 只在 UI 线程上访问
pub struct App {
    pub storefront: RefCell<Storefront>,
    pub page: RefCell<DomPage>,
}

/// 派发事件，返回是否阻止默认行为
///
/// 处理过程中产生的延时事件在释放借用后交给定时器。
pub fn dispatch(app: &Rc<App>, event: UiEvent) -> bool {
    let (prevent, pending) = {
        let mut page = app.page.borrow_mut();
        let prevent = app.storefront.borrow_mut().handle(event, &mut *page);
        (prevent, page.take_pending())
    };
    for (delay, event) in pending {
        schedule(app, delay, event);
    }
    prevent
}

fn schedule(app: &Rc<App>, delay: Duration, event: UiEvent) {
    let app = Rc::clone(app);
    let window = app.page.borrow().window().clone();
    let callback = Closure::once_into_js(move || {
        dispatch(&app, event);
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay.as_millis()).unwrap_or(i32::MAX),
    );
}

/// 页面启动：先连接交互，再加载并渲染商品
pub async fn run() -> Result<(), JsValue> {
    let config = Config::default();
    let page = DomPage::new()?;

    let mut storefront = Storefront::new((&config).into());
    storefront.attach(&page);

    let app = Rc::new(App {
        storefront: RefCell::new(storefront),
        page: RefCell::new(page),
    });
    events::install(&app)?;

    // 加载期间不持有借用，交互事件照常处理
    let loader = CatalogLoader::from_config(&config.catalog);
    let result = loader.load(&BrowserFetcher).await;
    let categories = if config.catalog.load_categories {
        loader.load_categories(&BrowserFetcher).await
    } else {
        None
    };

    let mut storefront = app.storefront.borrow_mut();
    if let Some(categories) = categories {
        storefront.set_categories(categories);
    }
    storefront.apply_load(result, &mut *app.page.borrow_mut());
    info!("页面初始化完成");
    Ok(())
}
