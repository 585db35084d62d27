pub mod finding;
pub mod line_item;

pub use finding::GougingFinding;
pub use line_item::{Invoice, LineItem, Scalar};
