use std::time::Duration;
use tempfile::tempdir;
use vitrina::interaction::ADDED_LOOK;
use vitrina::markup::{LOAD_ERROR_MESSAGE, ADD_LABEL};
use vitrina::{
    CartTarget, Catalog, CatalogLoader, FsFetcher, LoadState, MemoryPage, Page, Product,
    ProductId, Slot, Storefront, UiEvent,
};

const CATALOG: &str = r#"{
    "productos": [
        {"id": 1, "nombre": "Relief Sun", "marca": "Beauty of Joseon", "precio": 18.0},
        {"id": 2, "nombre": "Snail 96 Mucin", "marca": "COSRX", "precio": 40.0,
         "precioOriginal": 50.0, "descuento": 20, "descripcion": "Esencia reparadora",
         "destacado": true},
        {"id": 3, "nombre": "Water Sleeping Mask", "marca": "LANEIGE", "precio": 25.0},
        {"id": 4, "nombre": "Rice Toner", "marca": "I'm from", "precio": 21.0},
        {"id": 5, "nombre": "Pore Tightening Toner", "marca": "celimax", "precio": 15.0},
        {"id": 6, "nombre": "Green Cleanser", "marca": "Punto SEOUL", "precio": 12.0},
        {"id": 7, "nombre": "Crema Misteriosa", "marca": "Sin Marca", "precio": 9.5}
    ]
}"#;

fn site_with(path: &str, body: &str) -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let file = dir.path().join(path);
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    std::fs::write(file, body).unwrap();
    dir
}

/// 网格第 `index` 张卡片的按钮
fn card(index: usize, id: &str) -> CartTarget {
    CartTarget::Card {
        index,
        id: id.to_string(),
    }
}

fn product(id: u64, name: &str, price: Option<f64>, featured: bool) -> Product {
    Product {
        id: ProductId::Number(id),
        name: name.to_string(),
        brand: "COSRX".to_string(),
        price,
        original_price: None,
        discount: None,
        description: None,
        featured,
    }
}

async fn booted(page: &mut MemoryPage) -> (Storefront, tempfile::TempDir) {
    let site = site_with("data/products.json", CATALOG);
    let fetcher = FsFetcher::new(site.path());
    let mut storefront = Storefront::default();
    storefront
        .boot(&CatalogLoader::default(), &fetcher, page)
        .await;
    (storefront, site)
}

#[tokio::test]
async fn test_boot_renders_featured_and_grid() {
    let mut page = MemoryPage::new();
    let (storefront, _site) = booted(&mut page).await;

    assert_eq!(*storefront.state(), LoadState::Ready);
    assert_eq!(page.text(Slot::ProductTitle).as_deref(), Some("Snail 96 Mucin"));
    let price = page.html(Slot::ProductPrice).unwrap();
    assert!(price.contains("US$ 40.00"));
    assert!(price.contains("US$ 50.00"));
    assert!(price.contains("20% OFF"));
    assert_eq!(page.text(Slot::EditorNote).as_deref(), Some("Esencia reparadora"));
    assert!(page.html(Slot::ProductImage).unwrap().contains("#e6f4f7"));

    let ids: Vec<&str> = page.cards().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "4", "5", "6"]);

    let grid = page.grid_html().unwrap();
    assert_eq!(grid.matches(r#"class="product-card""#).count(), 5);
    assert_eq!(grid.matches(ADD_LABEL).count(), 5);
}

#[tokio::test]
async fn test_unmapped_brand_uses_default_swatch() {
    let site = site_with(
        "data/products.json",
        r#"{"productos": [{"id": 7, "nombre": "Crema", "marca": "Sin Marca", "precio": 9.5}]}"#,
    );
    let mut page = MemoryPage::new();
    let mut storefront = Storefront::default();
    storefront
        .boot(&CatalogLoader::default(), &FsFetcher::new(site.path()), &mut page)
        .await;

    assert!(page.html(Slot::ProductImage).unwrap().contains("#f5f5f5"));
    assert_eq!(page.cards()[0].swatch(), "#f5f5f5");
}

#[tokio::test]
async fn test_fallback_to_later_candidate() {
    let site = site_with("catalogo/products.json", CATALOG);
    let loader = CatalogLoader::new(vec![
        "data/products.json".to_string(),
        "catalogo/products.json".to_string(),
    ]);
    let mut page = MemoryPage::new();
    let mut storefront = Storefront::default();
    storefront
        .boot(&loader, &FsFetcher::new(site.path()), &mut page)
        .await;

    assert_eq!(*storefront.state(), LoadState::Ready);
    assert_eq!(page.cards().len(), 5);
}

#[tokio::test]
async fn test_all_candidates_failing_shows_error() {
    let empty_site = tempdir().unwrap();
    let mut page = MemoryPage::new();
    let mut storefront = Storefront::default();
    storefront
        .boot(
            &CatalogLoader::default(),
            &FsFetcher::new(empty_site.path()),
            &mut page,
        )
        .await;

    assert!(matches!(storefront.state(), LoadState::Failed(_)));
    let grid = page.grid_html().unwrap();
    assert!(grid.contains(LOAD_ERROR_MESSAGE));
    assert!(page.cards().is_empty());

    // 重试即重新加载页面
    assert!(storefront.handle(UiEvent::Retry, &mut page));
    assert_eq!(page.reloads(), 1);
}

#[tokio::test]
async fn test_failure_without_grid_does_not_panic() {
    let empty_site = tempdir().unwrap();
    let mut page = MemoryPage::blank();
    let mut storefront = Storefront::default();
    storefront
        .boot(
            &CatalogLoader::default(),
            &FsFetcher::new(empty_site.path()),
            &mut page,
        )
        .await;
    assert!(page.grid_html().is_none());
}

#[tokio::test]
async fn test_add_to_cart_flow() {
    let mut page = MemoryPage::new();
    let (mut storefront, _site) = booted(&mut page).await;
    assert_eq!(page.badge(), None);

    let target = card(1, "3");
    storefront.handle(UiEvent::AddToCart(target.clone()), &mut page);

    assert_eq!(page.badge(), Some("1"));
    assert_eq!(
        page.alerts().last().unwrap(),
        "✅ Producto agregado al carrito:\nWater Sleeping Mask\nPrecio: US$ 25.00"
    );
    assert_eq!(page.button_look(&target), Some(&ADDED_LOOK));

    storefront.handle(UiEvent::AddToCart(CartTarget::Featured), &mut page);
    storefront.handle(UiEvent::AddToCart(target.clone()), &mut page);
    assert_eq!(page.badge(), Some("3"));
    assert_eq!(storefront.cart_count(), 3);

    let scheduled = page.take_scheduled();
    assert_eq!(scheduled.len(), 3);
    assert!(scheduled
        .iter()
        .all(|(delay, _)| *delay == Duration::from_millis(2000)));

    // 同一按钮连续点击，只有最后一次到期才恢复
    for (_, event) in scheduled {
        let restores_card = matches!(
            &event,
            UiEvent::RestoreButton { target: t, generation: 1 } if *t == target
        );
        storefront.handle(event, &mut page);
        if restores_card {
            assert_eq!(page.button_look(&target), Some(&ADDED_LOOK));
        }
    }
    assert_eq!(page.button_look(&target), None);
    assert_eq!(page.button_look(&CartTarget::Featured), None);
}

#[tokio::test]
async fn test_existing_badge_and_missing_icon() {
    let mut page = MemoryPage::new().with_badge("4");
    let (mut storefront, _site) = booted(&mut page).await;
    storefront.handle(UiEvent::AddToCart(card(0, "1")), &mut page);
    assert_eq!(page.badge(), Some("5"));

    let mut page = MemoryPage::new().without_cart_icon();
    let (mut storefront, _site) = booted(&mut page).await;
    storefront.handle(UiEvent::AddToCart(card(0, "1")), &mut page);
    assert_eq!(page.badge(), None);
    assert_eq!(page.alerts().len(), 1);
}

#[tokio::test]
async fn test_unknown_card_is_ignored() {
    let mut page = MemoryPage::new();
    let (mut storefront, _site) = booted(&mut page).await;
    storefront.handle(UiEvent::AddToCart(card(9, "99")), &mut page);
    // 位置与 id 不一致（网格已重建）
    storefront.handle(UiEvent::AddToCart(card(0, "3")), &mut page);
    assert!(page.alerts().is_empty());
    assert_eq!(page.badge(), None);
}

#[tokio::test]
async fn test_search_alerts_only_for_non_empty_terms() {
    let mut page = MemoryPage::new();
    let (mut storefront, _site) = booted(&mut page).await;

    page.type_search("   ");
    storefront.handle(UiEvent::SearchSubmit, &mut page);
    assert!(page.alerts().is_empty());

    page.type_search(" mascarilla ");
    storefront.handle(UiEvent::SearchKey { key: "a".to_string() }, &mut page);
    assert!(page.alerts().is_empty());
    storefront.handle(UiEvent::SearchKey { key: "Enter".to_string() }, &mut page);
    assert_eq!(page.alerts().len(), 1);
    assert!(page.alerts()[0].starts_with("🔍 Buscando: \"mascarilla\""));

    // 搜索不会改变网格
    assert_eq!(page.cards().len(), 5);
}

#[tokio::test]
async fn test_touch_navbar() {
    let mut page = MemoryPage::new().with_touch(375).with_nav_items(3);
    let (mut storefront, _site) = booted(&mut page).await;
    assert!(storefront.nav().is_touch());

    assert!(storefront.handle(UiEvent::NavLinkClick { index: 0 }, &mut page));
    assert!(page.dropdown_visible(0));
    storefront.handle(UiEvent::NavLinkClick { index: 2 }, &mut page);
    assert!(!page.dropdown_visible(0));
    assert!(page.dropdown_visible(2));

    storefront.handle(UiEvent::OutsideClick, &mut page);
    assert!(!page.dropdown_visible(2));

    // 视口变宽后保留链接默认行为，设备类型不重新检测
    page.set_viewport_width(1024);
    assert!(!storefront.handle(UiEvent::NavLinkClick { index: 1 }, &mut page));
    assert!(!page.dropdown_visible(1));
    assert!(storefront.nav().is_touch());
}

#[tokio::test]
async fn test_pointer_navbar_hover() {
    let mut page = MemoryPage::new();
    let (mut storefront, _site) = booted(&mut page).await;

    storefront.handle(UiEvent::NavHover { index: 1, entered: true }, &mut page);
    assert!(page.dropdown_visible(1));
    storefront.handle(UiEvent::OutsideClick, &mut page);
    assert!(page.dropdown_visible(1));
    storefront.handle(UiEvent::NavHover { index: 1, entered: false }, &mut page);
    assert!(!page.dropdown_visible(1));
}

#[tokio::test]
async fn test_rerender_keeps_handlers_working() {
    let mut page = MemoryPage::new();
    let (mut storefront, _site) = booted(&mut page).await;

    storefront.render(&mut page);
    storefront.render(&mut page);
    assert_eq!(page.cards().len(), 5);

    storefront.handle(UiEvent::AddToCart(card(2, "4")), &mut page);
    assert_eq!(page.alerts().len(), 1);
    assert_eq!(page.badge(), Some("1"));
}

#[tokio::test]
async fn test_categories_loaded_when_enabled() {
    let site = site_with("data/products.json", CATALOG);
    std::fs::write(
        site.path().join("data/categories.json"),
        r#"{"categorias": [{"id": 1, "nombre": "Protección solar"}]}"#,
    )
    .unwrap();

    let mut config = vitrina::Config::default();
    config.catalog.load_categories = true;
    let mut storefront = Storefront::new((&config).into());
    let mut page = MemoryPage::new();
    storefront
        .boot(
            &CatalogLoader::from_config(&config.catalog),
            &FsFetcher::new(site.path()),
            &mut page,
        )
        .await;

    assert_eq!(storefront.categories().len(), 1);
    assert_eq!(storefront.categories()[0].name, "Protección solar");
}

#[test]
fn test_cards_with_same_id_are_told_apart() {
    let catalog = Catalog::new(vec![
        product(1, "Primero", Some(10.0), false),
        product(1, "Segundo", Some(20.0), false),
    ])
    .unwrap();
    let mut storefront = Storefront::default();
    let mut page = MemoryPage::new();
    storefront.apply_load(Ok(catalog), &mut page);

    let grid = page.grid_html().unwrap();
    assert!(grid.contains(r#"data-index="1" data-id="1""#));

    let second = card(1, "1");
    storefront.handle(UiEvent::AddToCart(second.clone()), &mut page);
    assert_eq!(
        page.alerts().last().unwrap(),
        "✅ Producto agregado al carrito:\nSegundo\nPrecio: US$ 20.00"
    );
    assert_eq!(page.button_look(&second), Some(&ADDED_LOOK));
    assert_eq!(page.button_look(&card(0, "1")), None);
}

#[test]
fn test_featured_cart_reads_page_when_price_missing() {
    let catalog = Catalog::new(vec![
        product(1, "Sin Precio", None, true),
        product(2, "Con Precio", Some(15.0), false),
    ])
    .unwrap();
    let mut storefront = Storefront::default();
    let mut page = MemoryPage::new();
    page.set_text(Slot::CurrentPrice, "US$ 30.00");
    storefront.apply_load(Ok(catalog), &mut page);

    // 面板渲染在价格处中断，标题已写入
    assert_eq!(page.text(Slot::ProductTitle).as_deref(), Some("Sin Precio"));
    assert_eq!(page.html(Slot::ProductPrice), None);

    storefront.handle(UiEvent::AddToCart(CartTarget::Featured), &mut page);
    assert_eq!(
        page.alerts().last().unwrap(),
        "✅ Producto agregado al carrito:\nSin Precio\nPrecio: US$ 30.00"
    );
    assert_eq!(page.badge(), Some("1"));
    assert_eq!(page.button_look(&CartTarget::Featured), Some(&ADDED_LOOK));
}

#[test]
fn test_featured_cart_without_page_price_is_ignored() {
    let catalog = Catalog::new(vec![product(1, "Sin Precio", None, true)]).unwrap();
    let mut storefront = Storefront::default();
    let mut page = MemoryPage::new();
    storefront.apply_load(Ok(catalog), &mut page);

    storefront.handle(UiEvent::AddToCart(CartTarget::Featured), &mut page);
    assert!(page.alerts().is_empty());
    assert_eq!(page.badge(), None);
}
