//! 店铺首页视图模型
//!
//! 持有加载结果和交互状态，通过 [`Page`] 渲染；所有页面事件经
//! [`Storefront::handle`] 统一处理，网格重建后无需重新绑定事件。

use crate::catalog::CatalogLoader;
use crate::config::Config;
use crate::error::{CatalogError, RenderError};
use crate::fetch::Fetcher;
use crate::interaction::{
    cart_alert, search_alert, CartState, CartTarget, NavMenu, UiEvent, ADDED_LOOK,
};
use crate::markup::{self, CardView, PriceSize, PriceView};
use crate::model::{Catalog, Category, Product};
use crate::page::{Page, Slot};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 推荐商品面板展示数据
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedView {
    pub id: String,
    pub title: String,
    pub brand: String,
    /// 缺失时面板渲染到价格为止
    pub price: Option<PriceView>,
    pub description: Option<String>,
}

impl FeaturedView {
    pub fn from_product(product: &Product, prefix: &str) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.name.clone(),
            brand: product.brand.clone(),
            price: PriceView::from_product(product, prefix),
            description: product.description.clone(),
        }
    }

    /// 依次写入标题、价格、描述、品牌色块，缺失的元素静默跳过
    pub fn render<P: Page>(&self, page: &mut P) -> Result<(), RenderError> {
        page.set_text(Slot::ProductTitle, &self.title);

        let price = self.price.as_ref().ok_or_else(|| RenderError::MissingPrice {
            id: self.id.clone(),
        })?;
        page.set_html(
            Slot::ProductPrice,
            &markup::price_html(price, PriceSize::Featured),
        );

        if let Some(description) = &self.description {
            page.set_text(Slot::EditorNote, description);
        }

        page.set_html(Slot::ProductImage, &markup::featured_image_html(&self.brand));
        Ok(())
    }
}

/// 构建网格卡片，遇到无法渲染的商品即停止
pub fn build_cards(products: &[&Product], prefix: &str) -> (Vec<CardView>, Option<RenderError>) {
    let mut cards = Vec::with_capacity(products.len());
    for product in products {
        match PriceView::from_product(product, prefix) {
            Some(price) => cards.push(CardView {
                index: cards.len(),
                id: product.id.to_string(),
                name: product.name.clone(),
                brand: product.brand.clone(),
                price,
            }),
            None => {
                return (
                    cards,
                    Some(RenderError::MissingPrice {
                        id: product.id.to_string(),
                    }),
                )
            }
        }
    }
    (cards, None)
}

/// 加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(CatalogError),
}

/// 视图模型中与配置相关的参数
#[derive(Debug, Clone)]
pub struct StorefrontSettings {
    pub currency_prefix: String,
    pub max_recommended: usize,
    pub mobile_breakpoint: u32,
    pub added_feedback: Duration,
    pub load_categories: bool,
}

impl From<&Config> for StorefrontSettings {
    fn from(config: &Config) -> Self {
        Self {
            currency_prefix: config.ui.currency_prefix.clone(),
            max_recommended: config.catalog.max_recommended,
            mobile_breakpoint: config.ui.mobile_breakpoint,
            added_feedback: Duration::from_millis(config.ui.added_feedback_ms),
            load_categories: config.catalog.load_categories,
        }
    }
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// 店铺首页
#[derive(Debug, Clone)]
pub struct Storefront {
    settings: StorefrontSettings,
    state: LoadState,
    catalog: Option<Catalog>,
    featured: Option<FeaturedView>,
    cards: Vec<CardView>,
    categories: Vec<Category>,
    nav: NavMenu,
    cart: CartState,
}

impl Storefront {
    pub fn new(settings: StorefrontSettings) -> Self {
        let nav = NavMenu::new(0, false, settings.mobile_breakpoint);
        Self {
            settings,
            state: LoadState::Pending,
            catalog: None,
            featured: None,
            cards: Vec::new(),
            categories: Vec::new(),
            nav,
            cart: CartState::default(),
        }
    }

    /// 读取页面初始状态：导航项、设备类型（只检测一次）和已有角标
    pub fn attach<P: Page>(&mut self, page: &P) {
        let touch = page.is_touch_device();
        self.nav = NavMenu::new(page.nav_item_count(), touch, self.settings.mobile_breakpoint);
        self.cart = CartState::from_badge(page.cart_badge().as_deref());
        debug!(
            "页面已连接: 导航项 {} 个, 触屏设备: {}",
            self.nav.len(),
            touch
        );
    }

    /// 完整启动流程：连接页面、加载目录、渲染
    pub async fn boot<F: Fetcher, P: Page>(
        &mut self,
        loader: &CatalogLoader,
        fetcher: &F,
        page: &mut P,
    ) {
        self.attach(page);
        let result = loader.load(fetcher).await;
        if self.settings.load_categories {
            if let Some(categories) = loader.load_categories(fetcher).await {
                self.set_categories(categories);
            }
        }
        self.apply_load(result, page);
    }

    /// 应用加载结果并渲染；失败时网格替换为错误提示
    pub fn apply_load<P: Page>(&mut self, result: Result<Catalog, CatalogError>, page: &mut P) {
        match result {
            Ok(catalog) => {
                info!("商品数据就绪: {} 个商品", catalog.len());
                self.featured = Some(FeaturedView::from_product(
                    catalog.featured(),
                    &self.settings.currency_prefix,
                ));
                let (cards, failure) = build_cards(
                    &catalog.recommended(self.settings.max_recommended),
                    &self.settings.currency_prefix,
                );
                if let Some(e) = failure {
                    error!("渲染推荐商品中断: {}", e);
                }
                self.cards = cards;
                self.catalog = Some(catalog);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!("加载商品失败: {}", e);
                self.featured = None;
                self.cards.clear();
                self.catalog = None;
                self.state = LoadState::Failed(e);
            }
        }
        self.render(page);
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// 按当前视图模型重新渲染推荐面板和网格
    pub fn render<P: Page>(&self, page: &mut P) {
        match &self.state {
            LoadState::Pending => {}
            LoadState::Ready => {
                if let Some(featured) = &self.featured {
                    if let Err(e) = featured.render(page) {
                        error!("渲染推荐商品面板中断: {}", e);
                    }
                }
                self.render_grid(page);
            }
            LoadState::Failed(_) => {
                if !page.replace_grid(&markup::load_error_html()) {
                    warn!("页面中没有商品网格，无法显示加载错误");
                }
            }
        }
    }

    fn render_grid<P: Page>(&self, page: &mut P) {
        if !page.clear_grid() {
            return;
        }
        for card in &self.cards {
            page.append_card(card);
        }
    }

    /// 处理页面事件，返回是否需要阻止浏览器默认行为
    pub fn handle<P: Page>(&mut self, event: UiEvent, page: &mut P) -> bool {
        match event {
            UiEvent::NavLinkClick { index } => {
                match self.nav.link_click(index, page.viewport_width()) {
                    Some(changes) => {
                        for (i, visible) in changes {
                            page.set_dropdown_visible(i, visible);
                        }
                        true
                    }
                    None => false,
                }
            }
            UiEvent::NavHover { index, entered } => {
                if let Some((i, visible)) = self.nav.hover(index, entered) {
                    page.set_dropdown_visible(i, visible);
                }
                false
            }
            UiEvent::OutsideClick => {
                for (i, visible) in self.nav.close_all() {
                    page.set_dropdown_visible(i, visible);
                }
                false
            }
            UiEvent::AddToCart(target) => {
                self.add_to_cart(target, page);
                true
            }
            UiEvent::RestoreButton { target, generation } => {
                if self.cart.finish_feedback(&target, generation) {
                    page.set_add_button(&target, None);
                }
                false
            }
            UiEvent::SearchSubmit => {
                self.search(page);
                false
            }
            UiEvent::SearchKey { key } => {
                if key == "Enter" {
                    self.search(page);
                }
                false
            }
            UiEvent::Retry => {
                info!("重新加载页面");
                page.reload();
                true
            }
        }
    }

    /// 标题和价格文字：网格卡片取视图模型，推荐面板优先视图模型、其次页面现有文字
    fn target_details<P: Page>(&self, target: &CartTarget, page: &P) -> Option<(String, String)> {
        match target {
            CartTarget::Card { index, id } => self
                .cards
                .get(*index)
                .filter(|card| &card.id == id)
                .map(|card| (card.name.clone(), card.price.current.clone())),
            CartTarget::Featured => match &self.featured {
                Some(FeaturedView {
                    title,
                    price: Some(price),
                    ..
                }) => Some((title.clone(), price.current.clone())),
                _ => Some((page.text(Slot::ProductTitle)?, page.text(Slot::CurrentPrice)?)),
            },
        }
    }

    fn add_to_cart<P: Page>(&mut self, target: CartTarget, page: &mut P) {
        let Some((title, price)) = self.target_details(&target, page) else {
            debug!("无法识别按钮所在商品: {}", target);
            return;
        };
        if title.is_empty() || price.is_empty() {
            return;
        }

        page.alert(&cart_alert(&title, &price));

        page.set_add_button(&target, Some(&ADDED_LOOK));
        let generation = self.cart.begin_feedback(&target);
        page.schedule(
            self.settings.added_feedback,
            UiEvent::RestoreButton { target, generation },
        );

        let count = self.cart.increment();
        if !page.set_cart_badge(count) {
            warn!("页面中没有购物车图标，无法显示数量");
        }
    }

    fn search<P: Page>(&self, page: &mut P) {
        let Some(value) = page.search_value() else {
            return;
        };
        if let Some(message) = search_alert(&value) {
            page.alert(&message);
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn featured(&self) -> Option<&FeaturedView> {
        self.featured.as_ref()
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(StorefrontSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;
    use crate::model::ProductId;

    fn product(id: u64, price: Option<f64>) -> Product {
        Product {
            id: ProductId::Number(id),
            name: format!("Producto {}", id),
            brand: "LANEIGE".to_string(),
            price,
            original_price: None,
            discount: None,
            description: Some("Hidratante".to_string()),
            featured: false,
        }
    }

    #[test]
    fn test_featured_render_writes_every_slot() {
        let mut p = product(1, Some(40.0));
        p.original_price = Some(50.0);
        p.discount = Some(20.0);
        let view = FeaturedView::from_product(&p, "US$");
        let mut page = MemoryPage::new();

        view.render(&mut page).unwrap();

        assert_eq!(page.text(Slot::ProductTitle).as_deref(), Some("Producto 1"));
        let price = page.html(Slot::ProductPrice).unwrap();
        assert!(price.contains("US$ 40.00"));
        assert!(price.contains("US$ 50.00"));
        assert!(price.contains("20% OFF"));
        assert_eq!(page.text(Slot::EditorNote).as_deref(), Some("Hidratante"));
        assert!(page.html(Slot::ProductImage).unwrap().contains("#e6e7f7"));
    }

    #[test]
    fn test_featured_render_skips_missing_slots() {
        let view = FeaturedView::from_product(&product(1, Some(10.0)), "US$");
        let mut page = MemoryPage::new().without_slot(Slot::ProductPrice);

        view.render(&mut page).unwrap();
        assert!(page.html(Slot::ProductPrice).is_none());
        assert!(page.html(Slot::ProductImage).is_some());
    }

    #[test]
    fn test_featured_render_stops_at_missing_price() {
        let view = FeaturedView::from_product(&product(9, None), "US$");
        let mut page = MemoryPage::new();

        let err = view.render(&mut page).unwrap_err();
        assert_eq!(err, RenderError::MissingPrice { id: "9".to_string() });
        assert_eq!(page.text(Slot::ProductTitle).as_deref(), Some("Producto 9"));
        assert!(page.text(Slot::EditorNote).is_none());
        assert!(page.html(Slot::ProductImage).is_none());
    }

    #[test]
    fn test_build_cards_stops_at_first_failure() {
        let products = [product(1, Some(1.0)), product(2, None), product(3, Some(3.0))];
        let refs: Vec<&Product> = products.iter().collect();

        let (cards, failure) = build_cards(&refs, "US$");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "1");
        assert!(failure.is_some());
    }

    #[test]
    fn test_pending_render_touches_nothing() {
        let storefront = Storefront::default();
        let mut page = MemoryPage::new();
        storefront.render(&mut page);
        assert_eq!(page.grid_html().as_deref(), Some(""));
        assert!(page.text(Slot::ProductTitle).is_none());
    }
}
