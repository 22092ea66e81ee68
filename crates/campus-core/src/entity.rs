//! The [`Entity`] trait — the per-table contract every record kind fulfils.
//!
//! An entity is a flat row: an ordered list of string-ish fields, the first of
//! which is the user-facing natural key (student id, course code, …). The
//! remote store additionally assigns every persisted row an opaque internal
//! [`RowId`]; mutations always target that id, never the natural key.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

// ─── Field descriptors ───────────────────────────────────────────────────────

/// Describes one column of an entity: the wire name and the human label shown
/// as a form caption and table header.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
  pub name:  &'static str,
  pub label: &'static str,
}

/// A form value could not be turned into a record field.
///
/// The only non-string field in the system is an integer; everything else is
/// accepted as-is after trimming.
#[derive(Debug, Error)]
pub enum FormError {
  #[error("{field} must be a whole number, got {value:?}")]
  NotAnInteger { field: &'static str, value: String },
}

// ─── Row identity ────────────────────────────────────────────────────────────

/// The internal identifier the remote store assigns to a persisted row.
///
/// Opaque to this system: never generated locally, never changes after
/// creation, and is distinct from the entity's natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl std::fmt::Display for RowId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// A persisted row: the store-assigned id plus the entity fields, flattened
/// on the wire as `{ "id": n, ...fields }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row<E> {
  pub id: RowId,
  #[serde(flatten)]
  pub record: E,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// One record kind bound to one remote table.
///
/// Field order is significant and shared by [`fields`](Entity::fields),
/// [`from_form`](Entity::from_form), [`to_form`](Entity::to_form) and
/// [`cells`](Entity::cells); the natural key is always field 0.
pub trait Entity:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Remote table name.
  const TABLE: &'static str;
  /// Singular noun for status messages ("student created").
  const NOUN: &'static str;
  /// Page title for the front end.
  const TITLE: &'static str;

  /// Ordered column descriptors; element 0 is the natural key.
  fn fields() -> &'static [FieldSpec];

  /// Wire name of the natural-key column, used for ascending ordering.
  fn key_column() -> &'static str {
    Self::fields()[0].name
  }

  /// Build a record from one (already trimmed) value per field.
  fn from_form(values: &[String]) -> Result<Self, FormError>;

  /// The field values in form order, for populating an edit form.
  fn to_form(&self) -> Vec<String>;

  /// The field values rendered as table cells, in column order.
  fn cells(&self) -> Vec<String>;

  /// The user-facing natural key of this record.
  fn natural_key(&self) -> &str;
}
