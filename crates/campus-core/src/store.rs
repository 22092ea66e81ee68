//! The `TableStore` trait — the remote row-store contract.
//!
//! Implemented by storage backends (e.g. `campus-store-rest` for a
//! PostgREST-compatible service). Higher layers depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::entity::{Entity, Row, RowId};

/// Abstraction over a hosted row-store, one method per remote table
/// operation.
///
/// Every method targets the table named by `E::TABLE`. Mutations return no
/// row data — callers re-fetch the full row set afterwards rather than
/// patching local state.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait TableStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All rows of the table, ordered ascending by the entity's natural key.
  fn list<E: Entity>(
    &self,
  ) -> impl Future<Output = Result<Vec<Row<E>>, Self::Error>> + Send + '_;

  /// The single row with internal id `id`, or `None` if it does not exist.
  /// Used only by the edit-load flow.
  fn get<E: Entity>(
    &self,
    id: RowId,
  ) -> impl Future<Output = Result<Option<Row<E>>, Self::Error>> + Send + '_;

  /// Insert `record` as a new row. The store assigns the internal id; no
  /// returned row is consumed.
  fn insert<'a, E: Entity>(
    &'a self,
    record: &'a E,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Replace the fields of the row with internal id `id`.
  fn update<'a, E: Entity>(
    &'a self,
    id: RowId,
    record: &'a E,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete the row with internal id `id`.
  fn delete<E: Entity>(
    &self,
    id: RowId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
