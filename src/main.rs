use payment_linker::{api, create_pool, AppConfig, PgStore, SmartPaymentLinker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    let store = PgStore::new(pool, Duration::from_secs(config.linker.query_timeout_secs));
    let linker = Arc::new(
        SmartPaymentLinker::new(store).with_batch_concurrency(config.linker.batch_concurrency),
    );

    let app = api::router(linker);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/link/contract              - best contract for one payment");
    info!("  POST /api/link/batch                 - link payments by id");
    info!("  POST /api/reconcile                  - reconcile a company's unlinked payments");
    info!("  GET  /api/link/history/:payment_id   - linking decisions");
    info!("  DELETE /api/link/history             - clear linking decisions");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
