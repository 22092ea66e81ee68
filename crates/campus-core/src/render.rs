//! Declarative row descriptions for table rendering.
//!
//! Front ends render from these descriptions instead of constructing rows by
//! hand, so the "exactly one placeholder when empty" rule lives in one place.

use crate::entity::{Entity, Row, RowId};

/// Placeholder text rendered when a table has no rows.
pub const NO_RECORDS: &str = "no records";

/// A structured description of one rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
  /// A real record: its internal id (the target for edit/delete actions)
  /// and one cell per field, in column order.
  Record { id: RowId, cells: Vec<String> },
  /// The single "no records" row shown instead of an empty body.
  Placeholder(&'static str),
}

impl TableRow {
  /// The internal id, if this row is a record.
  pub fn id(&self) -> Option<RowId> {
    match self {
      TableRow::Record { id, .. } => Some(*id),
      TableRow::Placeholder(_) => None,
    }
  }
}

/// Map a row set to its rendered description. An empty set yields exactly one
/// placeholder row — never zero rows, never more than one placeholder.
pub fn table_rows<E: Entity>(rows: &[Row<E>]) -> Vec<TableRow> {
  if rows.is_empty() {
    return vec![TableRow::Placeholder(NO_RECORDS)];
  }
  rows
    .iter()
    .map(|row| TableRow::Record { id: row.id, cells: row.record.cells() })
    .collect()
}
