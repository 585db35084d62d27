use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

/// 价格虚高比对结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GougingFinding {
    #[serde(rename = "cpt_code")]
    pub billing_code: String,
    #[serde(serialize_with = "decimal_as_number")]
    pub charged_amount: BigDecimal,
    #[serde(rename = "medicare_rate", serialize_with = "decimal_as_number")]
    pub reference_rate: BigDecimal,
    /// 已按两位小数四舍五入
    #[serde(rename = "gouging_multiple", serialize_with = "decimal_as_number")]
    pub markup_multiple: BigDecimal,
}

/// 报告中以 JSON 数字输出金额
fn decimal_as_number<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // 按十进制文本解析为 f64
    match value.to_string().parse::<f64>() {
        Ok(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => serializer.serialize_str(&value.to_string()),
    }
}
