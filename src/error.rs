use thiserror::Error;

/// 参照表加载错误
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 报告合并错误
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("audit report must be a JSON object, got {0}")]
    ReportNotObject(&'static str),
}
