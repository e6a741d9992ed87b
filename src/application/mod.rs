//! Application layer: update engine, seed loading and reporting
//!
//! This layer orchestrates the domain algorithms over tree snapshots.

pub mod engine;
pub mod error;
pub mod error_ext;
pub mod input;
pub mod report;
pub mod seed;

pub use engine::{adjust_by_percentage, set_value, Update, Workbook};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use input::{parse_amount, parse_percentage};
pub use report::{totals, GrandTotal, Report, Row, Trend};
pub use seed::{load_seed, parse_seed, SeedFormat};
