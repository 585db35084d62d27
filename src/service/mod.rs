pub mod assembler;
pub mod comparator;
pub mod export;
pub mod normalizer;

pub use assembler::AuditAssembler;
pub use comparator::{assess_line_item, compute_findings, round_half_up, SkipReason};
pub use export::write_findings_csv;
pub use normalizer::{normalize_amount, parse_currency};
