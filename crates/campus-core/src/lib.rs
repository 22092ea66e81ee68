//! Core types and trait definitions for the campus record system.
//!
//! This crate is deliberately free of HTTP and terminal dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod confirm;
pub mod controller;
pub mod entity;
pub mod notice;
pub mod records;
pub mod render;
pub mod store;

pub use confirm::Confirm;
pub use controller::{EntityController, Mode};
pub use entity::{Entity, FieldSpec, FormError, Row, RowId};
pub use notice::{Notice, Severity, StatusNotifier};
pub use records::{Course, Professor, Student};
pub use render::{NO_RECORDS, TableRow, table_rows};
pub use store::TableStore;

#[cfg(test)]
mod tests;
