use super::{insert_first, load_or_empty, parse_code_map, read_code_map};
use crate::error::ReferenceError;
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use std::path::Path;
use std::str::FromStr;

/// 计费编码 -> 政府参考价 (只读，启动时加载一次)
#[derive(Debug, Clone, Default)]
pub struct ReferenceRateTable {
    rates: IndexMap<String, BigDecimal>,
}

impl ReferenceRateTable {
    /// 从文件加载；文件缺失或格式错误时返回空表
    pub fn load(path: impl AsRef<Path>) -> Self {
        load_or_empty(path.as_ref(), "reference rate", |p| {
            read_code_map::<serde_json::Number>(p).map(Self::from_numbers)
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReferenceError> {
        parse_code_map::<serde_json::Number>(raw).map(Self::from_numbers)
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, BigDecimal)>,
        K: Into<String>,
    {
        let mut rates = IndexMap::new();
        for (code, rate) in entries {
            let code = code.into().trim().to_string();
            if rate < BigDecimal::zero() {
                tracing::warn!("dropping negative reference rate {} for code {}", rate, code);
                continue;
            }
            insert_first(&mut rates, code, rate);
        }
        Self { rates }
    }

    fn from_numbers(raw: IndexMap<String, serde_json::Number>) -> Self {
        Self::from_entries(raw.into_iter().filter_map(|(code, n)| {
            // JSON 数字的文本形式可精确转换
            BigDecimal::from_str(&n.to_string()).ok().map(|rate| (code, rate))
        }))
    }

    /// 按已去空白的编码精确查找
    pub fn get(&self, code: &str) -> Option<&BigDecimal> {
        self.rates.get(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
