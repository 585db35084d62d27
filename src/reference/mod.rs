pub mod definitions;
pub mod rates;

pub use definitions::CodeDefinitions;
pub use rates::ReferenceRateTable;

use crate::error::ReferenceError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::path::Path;

/// 读取 `{编码: 值}` 形式的 JSON 文件
pub(crate) fn read_code_map<V: DeserializeOwned>(
    path: &Path,
) -> Result<IndexMap<String, V>, ReferenceError> {
    let raw = std::fs::read_to_string(path)?;
    parse_code_map(&raw)
}

/// 编码去首尾空白后按文件顺序保留首个条目
pub(crate) fn parse_code_map<V: DeserializeOwned>(
    raw: &str,
) -> Result<IndexMap<String, V>, ReferenceError> {
    let map: IndexMap<String, V> = serde_json::from_str(raw)?;
    let mut codes = IndexMap::with_capacity(map.len());
    for (code, value) in map {
        insert_first(&mut codes, code.trim().to_string(), value);
    }
    Ok(codes)
}

/// 重复编码保留先出现的值
pub(crate) fn insert_first<V>(codes: &mut IndexMap<String, V>, code: String, value: V) {
    match codes.entry(code) {
        Entry::Occupied(entry) => {
            tracing::warn!("duplicate reference code {:?}, keeping first entry", entry.key());
        }
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
    }
}

/// 加载失败时降级为空表，不中断启动
pub(crate) fn load_or_empty<T: Default>(
    path: &Path,
    kind: &str,
    load: impl FnOnce(&Path) -> Result<T, ReferenceError>,
) -> T {
    match load(path) {
        Ok(table) => table,
        Err(ReferenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("{} file {} not found, using empty table", kind, path.display());
            T::default()
        }
        Err(e) => {
            tracing::warn!("{} file {} unusable ({}), using empty table", kind, path.display(), e);
            T::default()
        }
    }
}
