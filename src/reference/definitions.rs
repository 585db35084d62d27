use super::{insert_first, load_or_empty, parse_code_map, read_code_map};
use crate::error::ReferenceError;
use indexmap::IndexMap;
use std::path::Path;

pub const DEFINITION_NOT_FOUND: &str = "Definition not found in local database.";

/// 计费编码 -> 官方释义
#[derive(Debug, Clone, Default)]
pub struct CodeDefinitions {
    entries: IndexMap<String, String>,
}

impl CodeDefinitions {
    pub fn load(path: impl AsRef<Path>) -> Self {
        load_or_empty(path.as_ref(), "code definition", |p| {
            read_code_map::<String>(p).map(|entries| Self { entries })
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReferenceError> {
        parse_code_map::<String>(raw).map(|entries| Self { entries })
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut codes = IndexMap::new();
        for (code, text) in entries {
            insert_first(&mut codes, code.into().trim().to_string(), text.into());
        }
        Self { entries: codes }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// 查不到时返回固定提示文本
    pub fn describe(&self, code: &str) -> &str {
        self.get(code).unwrap_or(DEFINITION_NOT_FOUND)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
