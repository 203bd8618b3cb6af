//! HTML 片段生成
//!
//! 浏览器端和预览服务器共用同一套标记，类名即页面脚本与模板之间的约定。

use crate::model::Product;

/// 未登记品牌的色块颜色
pub const DEFAULT_SWATCH: &str = "#f5f5f5";

/// 品牌色块颜色表
const BRAND_SWATCHES: &[(&str, &str)] = &[
    ("Beauty of Joseon", "#f0e6d6"),
    ("celimax", "#e6f0f7"),
    ("Dr. Althea", "#f7e6e6"),
    ("Punto SEOUL", "#e6f7e9"),
    ("AP LB", "#f0e6f7"),
    ("COSRX", "#e6f4f7"),
    ("I'm from", "#f7f0e6"),
    ("LANEIGE", "#e6e7f7"),
];

/// 按品牌名取色块颜色，大小写敏感
pub fn brand_swatch(brand: &str) -> &'static str {
    BRAND_SWATCHES
        .iter()
        .find(|(name, _)| *name == brand)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_SWATCH)
}

/// 转义文本中的 HTML 特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `US$ 40.00`，两位小数，恰好处于中间的值远离零取整
pub fn format_price(prefix: &str, amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    format!("{} {:.2}", prefix, cents)
}

/// `20% OFF`，整数折扣不带小数
pub fn format_discount(discount: f64) -> String {
    format!("{}% OFF", discount)
}

/// 价格展示数据
#[derive(Debug, Clone, PartialEq)]
pub struct PriceView {
    pub current: String,
    /// 划线原价与折扣标签
    pub markdown: Option<(String, String)>,
}

impl PriceView {
    pub fn from_product(product: &Product, prefix: &str) -> Option<Self> {
        let current = format_price(prefix, product.price?);
        let markdown = product
            .markdown()
            .map(|(original, discount)| (format_price(prefix, original), format_discount(discount)));
        Some(Self { current, markdown })
    }
}

/// 价格区块的两种尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSize {
    /// 推荐商品面板 `.product-price`
    Featured,
    /// 网格卡片 `.product-card-price`
    Card,
}

impl PriceSize {
    fn current_class(self) -> &'static str {
        match self {
            PriceSize::Featured => "current-price",
            PriceSize::Card => "product-current-price",
        }
    }

    fn original_style(self) -> &'static str {
        match self {
            PriceSize::Featured => {
                "text-decoration: line-through; color: #999; font-size: 18px; margin-left: 10px;"
            }
            PriceSize::Card => {
                "text-decoration: line-through; color: #999; font-size: 14px; margin-left: 5px;"
            }
        }
    }

    fn discount_style(self) -> &'static str {
        match self {
            PriceSize::Featured => "color: #d97777; font-weight: bold; margin-left: 10px;",
            PriceSize::Card => "color: #d97777; font-size: 14px; margin-left: 5px;",
        }
    }
}

/// 价格标记：现价，以及可选的划线原价和折扣标签
pub fn price_html(price: &PriceView, size: PriceSize) -> String {
    let mut html = format!(
        r#"<span class="{}">{}</span>"#,
        size.current_class(),
        escape_html(&price.current)
    );
    if let Some((original, discount)) = &price.markdown {
        html.push_str(&format!(
            r#"<span class="original-price" style="{}">{}</span><span class="discount-label" style="{}">{}</span>"#,
            size.original_style(),
            escape_html(original),
            size.discount_style(),
            escape_html(discount)
        ));
    }
    html
}

/// 推荐商品面板的品牌色块
pub fn featured_image_html(brand: &str) -> String {
    format!(
        r#"<div style="background-color: {}; height: 300px; display: flex; align-items: center; justify-content: center; border-radius: 8px;"><span style="color: rgba(0,0,0,0.5); font-size: 18px; font-weight: bold;">{}</span></div>"#,
        brand_swatch(brand),
        escape_html(brand)
    )
}

/// 加入购物车按钮文字
pub const ADD_LABEL: &str = "AGREGAR A LA CESTA";

/// 网格卡片展示数据
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// 卡片在网格中的位置，商品 id 可能重复
    pub index: usize,
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: PriceView,
}

impl CardView {
    pub fn swatch(&self) -> &'static str {
        brand_swatch(&self.brand)
    }
}

/// 单张商品卡片的内部标记，外层 `.product-card` 元素由调用方创建
pub fn card_inner_html(card: &CardView) -> String {
    format!(
        r#"<div class="product-card-image" style="background-color: {swatch}">{brand}</div><div class="product-card-info"><h3 class="product-card-title">{name}</h3><div class="product-card-price">{price}</div><button class="btn-add" style="margin-top: 10px; width: 100%;">{label}</button></div>"#,
        swatch = card.swatch(),
        brand = escape_html(&card.brand),
        name = escape_html(&card.name),
        price = price_html(&card.price, PriceSize::Card),
        label = ADD_LABEL,
    )
}

/// 完整的卡片标记，服务端渲染使用
pub fn card_html(card: &CardView) -> String {
    format!(
        r#"<div class="product-card" data-index="{}" data-id="{}">{}</div>"#,
        card.index,
        escape_html(&card.id),
        card_inner_html(card)
    )
}

/// 加载失败提示
pub const LOAD_ERROR_MESSAGE: &str =
    "⚠️ No se pudieron cargar los productos. Por favor, verifica tu conexión.";

/// 重试按钮文字
pub const RETRY_LABEL: &str = "Reintentar";

/// 加载失败时替换网格的内容，重试按钮带 `data-action="retry"`
pub fn load_error_html() -> String {
    format!(
        r#"<div class="load-error" style="grid-column: 1 / -1; text-align: center; padding: 40px;"><p style="color: #666; margin-bottom: 20px;">{}</p><button data-action="retry" style="background-color: #333; color: white; border: none; padding: 10px 20px; border-radius: 4px; cursor: pointer;">{}</button></div>"#,
        LOAD_ERROR_MESSAGE, RETRY_LABEL
    )
}

/// 购物车角标样式
pub const CART_BADGE_STYLE: &str = "position: absolute; top: -8px; right: -8px; background-color: #d97777; color: white; border-radius: 50%; width: 18px; height: 18px; font-size: 12px; display: flex; align-items: center; justify-content: center;";
