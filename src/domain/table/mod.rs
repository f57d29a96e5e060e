// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core types for in-memory tables of analytics rows
// No I/O, no async, no external dependencies

mod cell;
mod row;

pub use cell::CellValue;
pub use row::{Row, Table};
