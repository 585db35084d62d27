use crate::error::AssembleError;
use crate::models::{GougingFinding, Invoice};
use crate::reference::{CodeDefinitions, ReferenceRateTable};
use crate::service::comparator::compute_findings;
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;

pub const PRICE_GOUGING_FIELD: &str = "price_gouging_details";

/// 审计报告组装服务：持有只读参照表，把比价结果并入外部审计报告
#[derive(Debug, Clone)]
pub struct AuditAssembler {
    rates: Arc<ReferenceRateTable>,
    definitions: Arc<CodeDefinitions>,
}

impl AuditAssembler {
    pub fn new(rates: Arc<ReferenceRateTable>, definitions: Arc<CodeDefinitions>) -> Self {
        Self { rates, definitions }
    }

    pub fn price_findings(&self, invoice: &Invoice) -> Vec<GougingFinding> {
        let findings = compute_findings(&invoice.line_items, &self.rates);
        tracing::info!(
            "price check: {} line items, {} findings",
            invoice.line_items.len(),
            findings.len()
        );
        findings
    }

    /// 账单编码的官方释义，每个编码一行 (按首次出现顺序去重)
    pub fn official_definitions(&self, invoice: &Invoice) -> String {
        let codes: IndexSet<String> = invoice.cpt_codes.iter().filter_map(|c| c.as_code()).collect();

        codes
            .iter()
            .map(|code| {
                format!(
                    "Code {} Official Definition: {}",
                    code,
                    self.definitions.describe(code)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 将比价结果写入报告的 `price_gouging_details` 字段 (覆盖已有值)
    pub fn assemble(&self, report: Value, invoice: &Invoice) -> Result<Value, AssembleError> {
        let mut report = match report {
            Value::Object(map) => map,
            other => return Err(AssembleError::ReportNotObject(json_kind(&other))),
        };

        let findings = self.price_findings(invoice);
        let details = findings
            .iter()
            .filter_map(|f| serde_json::to_value(f).ok())
            .collect();
        report.insert(PRICE_GOUGING_FIELD.to_string(), Value::Array(details));

        Ok(Value::Object(report))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
