pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reference;
pub mod service;

pub use config::AppConfig;
pub use error::{AssembleError, ReferenceError};
pub use models::{GougingFinding, Invoice, LineItem};
pub use reference::{CodeDefinitions, ReferenceRateTable};
pub use service::{compute_findings, AuditAssembler};
