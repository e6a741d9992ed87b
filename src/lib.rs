//! alloctree: hierarchical value allocation
//!
//! Keeps a forest of labeled values, redistributes a change at any node across its
//! children, restores subtotals bottom-up and reports variance against the baseline.
//!
//! # Architecture
//!
//! - `domain`: node model and recalculation algorithms (no I/O)
//! - `application`: update engine, workbook, seed loading, reports
//! - `cli`: argument parsing, command dispatch, terminal rendering
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
