use claimshield::{api, AppConfig, AuditAssembler, CodeDefinitions, ReferenceRateTable};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式，RUST_LOG 控制级别
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claimshield=info,tower_http=info".into()),
        )
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 启动时加载一次参照表，之后只读共享
    let rates = ReferenceRateTable::load(&config.reference.rates_path);
    let definitions = CodeDefinitions::load(&config.reference.definitions_path);
    info!("Loaded {} CPT codes.", definitions.len());
    info!("Loaded {} CPT Medicare rates.", rates.len());

    let assembler = Arc::new(AuditAssembler::new(Arc::new(rates), Arc::new(definitions)));
    let app = api::router(assembler);

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/price-check          - price findings for an invoice");
    info!("  POST /api/price-check/csv      - same, as CSV");
    info!("  POST /api/codes/definitions    - official code definitions");
    info!("  POST /api/audit/assemble       - attach findings to an audit report");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
