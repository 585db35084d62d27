pub mod handlers;

pub use handlers::*;

use crate::service::AuditAssembler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 构建路由
pub fn router(assembler: Arc<AuditAssembler>) -> Router {
    let audit_routes = Router::new()
        .route("/api/price-check", post(price_check))
        .route("/api/price-check/csv", post(price_check_csv))
        .route("/api/codes/definitions", post(code_definitions))
        .route("/api/audit/assemble", post(assemble_report))
        .with_state(assembler);

    Router::new()
        .route("/health", get(health_check))
        .merge(audit_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
