use crate::models::{GougingFinding, Invoice};
use crate::service::{write_findings_csv, AuditAssembler};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// 报告合并请求体: 外部审计报告 + 结构化账单
#[derive(Debug, Deserialize)]
pub struct AssembleRequest {
    pub report: Value,
    #[serde(default)]
    pub invoice: Invoice,
}

/// 比价响应体
#[derive(Debug, Serialize)]
pub struct PriceCheckResponse {
    pub success: bool,
    pub message: String,
    pub price_gouging_details: Vec<GougingFinding>,
}

/// 编码释义响应体
#[derive(Debug, Serialize)]
pub struct DefinitionsResponse {
    pub success: bool,
    pub message: String,
    pub official_definitions: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// 请求体无法解析时同样返回 `{success: false, message}`
fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::warn!("request body rejected: {}", rejection.body_text());
    let response = ErrorResponse {
        success: false,
        message: format!("Error: {}", rejection.body_text()),
    };
    (rejection.status(), Json(response)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 账单比价
pub async fn price_check(
    State(assembler): State<Arc<AuditAssembler>>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> Response {
    let Json(invoice) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let findings = assembler.price_findings(&invoice);
    let response = PriceCheckResponse {
        success: true,
        message: format!(
            "Checked {} line items, {} priced against reference rates",
            invoice.line_items.len(),
            findings.len()
        ),
        price_gouging_details: findings,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 比价结果导出为 CSV
pub async fn price_check_csv(
    State(assembler): State<Arc<AuditAssembler>>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> Response {
    let Json(invoice) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let findings = assembler.price_findings(&invoice);
    let mut buf = Vec::new();
    match write_findings_csv(&findings, &mut buf) {
        Ok(()) => {
            let disposition = format!(
                "attachment; filename=\"price_findings_{}.csv\"",
                Local::now().format("%Y%m%d%H%M%S")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                buf,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            let response = ErrorResponse {
                success: false,
                message: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 账单编码官方释义
pub async fn code_definitions(
    State(assembler): State<Arc<AuditAssembler>>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> Response {
    let Json(invoice) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let response = DefinitionsResponse {
        success: true,
        message: format!("Resolved {} codes", invoice.cpt_codes.len()),
        official_definitions: assembler.official_definitions(&invoice),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 将比价结果并入外部审计报告
pub async fn assemble_report(
    State(assembler): State<Arc<AuditAssembler>>,
    payload: Result<Json<AssembleRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match assembler.assemble(req.report, &req.invoice) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::warn!("report assembly rejected: {}", e);
            let response = ErrorResponse {
                success: false,
                message: format!("Error: {}", e),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response()
        }
    }
}
