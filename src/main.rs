use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use vitrina::config;
use vitrina_server::{app::catalog::service::CatalogService, build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置系统
    let config = config::init_config()?;

    // 初始化日志系统 - 按日期分割日志文件
    vitrina::logging::init_logging(&config.logging)?;

    info!("启动 Vitrina 预览服务器");

    let catalog = CatalogService::load(config).await;
    let app = build_router(AppState { catalog }, &config.http);

    let addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 预览服务器运行在 http://{}", addr);
    info!("   静态站点目录: {}", config.http.static_dir.display());
    info!("   GET /api/products              - 全部商品");
    info!("   GET /api/products/featured     - 推荐商品");
    info!("   GET /api/products/recommended  - 推荐网格商品");
    info!("   GET /api/products/:id          - 单个商品");
    info!("   GET /api/categories            - 分类");
    info!("   GET /fragments/featured|grid   - 服务端渲染片段");

    axum::serve(listener, app).await?;
    Ok(())
}
