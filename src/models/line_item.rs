use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 上游抽取结果中形状未知的标量值
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl Scalar {
    /// 作为计费编码读取：去除首尾空白，空串视为缺失
    pub fn as_code(&self) -> Option<String> {
        let code = match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Other(_) => return None,
        };
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(Scalar::Number)
            .unwrap_or(Scalar::Other(Value::Null))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v.into())
    }
}

/// 账单明细行 (外部抽取产出，不可信输入)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub cpt_code: Option<Scalar>,
    #[serde(default)]
    pub description: Option<Scalar>,
    #[serde(default)]
    pub amount: Option<Scalar>,
}

impl LineItem {
    pub fn new(cpt_code: impl Into<Scalar>, amount: impl Into<Scalar>) -> Self {
        Self {
            cpt_code: Some(cpt_code.into()),
            description: None,
            amount: Some(amount.into()),
        }
    }

    pub fn billing_code(&self) -> Option<String> {
        self.cpt_code.as_ref().and_then(Scalar::as_code)
    }
}

/// 结构化账单 (外部发票抽取服务的 JSON 输出)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Invoice {
    #[serde(default, deserialize_with = "lenient_line_items")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub cpt_codes: Vec<Scalar>,
}

impl Invoice {
    pub fn from_line_items(line_items: Vec<LineItem>) -> Self {
        Self {
            line_items,
            cpt_codes: Vec::new(),
        }
    }
}

/// null 视为空列表；无法解析为明细的元素直接丢弃
fn lenient_line_items<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<LineItem>(v) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("dropping malformed line item: {}", e);
                None
            }
        })
        .collect())
}

fn lenient_codes<'de, D>(deserializer: D) -> Result<Vec<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Scalar>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
