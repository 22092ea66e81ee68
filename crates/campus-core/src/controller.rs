//! The generic entity controller.
//!
//! One controller binds one page's form and table to one remote table. The
//! three pages of the application are instances of this type, parameterized
//! by their [`Entity`], not separate copies.
//!
//! Every mutation is a single remote call followed by a full reload of the
//! row set — there is no local diffing or incremental patching. Remote
//! failures are never fatal: they surface as a status notice (carrying the
//! remote message verbatim) and on the diagnostic log, and the user may
//! simply retry.

use std::sync::Arc;

use crate::{
  confirm::Confirm,
  entity::{Entity, Row, RowId},
  notice::{Notice, StatusNotifier},
  render::{TableRow, table_rows},
  store::TableStore,
};

// ─── Mode ────────────────────────────────────────────────────────────────────

/// What the form's submit action currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Submitting creates a new row.
  Creating,
  /// Submitting replaces the fields of the row with this internal id.
  Editing(RowId),
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// Form-and-table state for one entity page, bound to a [`TableStore`].
pub struct EntityController<E: Entity, S: TableStore> {
  store:    Arc<S>,
  rows:     Vec<Row<E>>,
  form:     Vec<String>,
  mode:     Mode,
  notifier: StatusNotifier,
}

impl<E: Entity, S: TableStore> EntityController<E, S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      rows: Vec::new(),
      form: vec![String::new(); E::fields().len()],
      mode: Mode::Creating,
      notifier: StatusNotifier::new(),
    }
  }

  // ── Read-side accessors ───────────────────────────────────────────────────

  pub fn rows(&self) -> &[Row<E>] {
    &self.rows
  }

  /// The rendered description of the table body.
  pub fn table_rows(&self) -> Vec<TableRow> {
    table_rows(&self.rows)
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn notice(&self) -> Option<&Notice> {
    self.notifier.current()
  }

  /// Cosmetic close affordance for the status banner.
  pub fn dismiss_notice(&mut self) {
    self.notifier.clear();
  }

  pub fn form_value(&self, field: usize) -> &str {
    &self.form[field]
  }

  /// The natural key is locked against edits while an edit is in progress.
  pub fn is_locked(&self, field: usize) -> bool {
    field == 0 && matches!(self.mode, Mode::Editing(_))
  }

  /// Mutable access to one form value, or `None` if the field is locked.
  pub fn form_value_mut(&mut self, field: usize) -> Option<&mut String> {
    if self.is_locked(field) {
      return None;
    }
    self.form.get_mut(field)
  }

  // ── Load ──────────────────────────────────────────────────────────────────

  /// Fetch all rows, ordered ascending by natural key.
  ///
  /// On failure the existing rows are left untouched (stale but visible) and
  /// the error is surfaced as a notice.
  pub async fn load(&mut self) {
    match self.store.list::<E>().await {
      Ok(rows) => {
        self.rows = rows;
      }
      Err(e) => {
        tracing::error!(table = E::TABLE, error = %e, "load failed");
        self.notifier.error(format!("failed to load {}: {e}", E::TABLE));
      }
    }
  }

  // ── Create / Update ───────────────────────────────────────────────────────

  /// Submit the form: create in [`Mode::Creating`], update in
  /// [`Mode::Editing`].
  pub async fn submit(&mut self) {
    match self.mode {
      Mode::Creating => self.create().await,
      Mode::Editing(id) => self.update(id).await,
    }
  }

  /// Build a record from the trimmed form values. The form itself is not
  /// modified, so a failed submission leaves the user's input intact.
  fn record_from_form(&self) -> Result<E, crate::entity::FormError> {
    let trimmed: Vec<String> =
      self.form.iter().map(|v| v.trim().to_string()).collect();
    E::from_form(&trimmed)
  }

  async fn create(&mut self) {
    let record = match self.record_from_form() {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!(table = E::TABLE, error = %e, "form rejected");
        self.notifier.error(e.to_string());
        return;
      }
    };

    match self.store.insert(&record).await {
      Ok(()) => {
        self.clear_form();
        self.notifier.success(format!("{} created", E::NOUN));
        self.load().await;
      }
      Err(e) => {
        tracing::error!(table = E::TABLE, error = %e, "insert failed");
        self.notifier.error(e.to_string());
      }
    }
  }

  async fn update(&mut self, id: RowId) {
    let record = match self.record_from_form() {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!(table = E::TABLE, error = %e, "form rejected");
        self.notifier.error(e.to_string());
        return;
      }
    };

    match self.store.update(id, &record).await {
      Ok(()) => {
        self.mode = Mode::Creating;
        self.clear_form();
        self.notifier.success(format!("{} updated", E::NOUN));
        self.load().await;
      }
      Err(e) => {
        // Stay in edit mode so the user can correct and retry.
        tracing::error!(table = E::TABLE, id = id.0, error = %e, "update failed");
        self.notifier.error(e.to_string());
      }
    }
  }

  // ── Edit flow ─────────────────────────────────────────────────────────────

  /// Fetch the row with internal id `id`, populate the form with its values,
  /// lock the natural key, and switch the submit action to update mode.
  pub async fn begin_edit(&mut self, id: RowId) {
    match self.store.get::<E>(id).await {
      Ok(Some(row)) => {
        self.form = row.record.to_form();
        self.mode = Mode::Editing(id);
        self
          .notifier
          .info(format!("now editing {} {}", E::NOUN, row.record.natural_key()));
      }
      Ok(None) => {
        self.notifier.error(format!("{} not found", E::NOUN));
      }
      Err(e) => {
        tracing::error!(table = E::TABLE, id = id.0, error = %e, "edit load failed");
        self.notifier.error(e.to_string());
      }
    }
  }

  /// Abandon an in-progress edit and restore the form to create mode.
  pub fn cancel_edit(&mut self) {
    self.mode = Mode::Creating;
    self.clear_form();
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Delete the row with internal id `id`, after an explicit confirmation.
  /// A declined confirmation is a silent no-op, not an error.
  pub async fn delete(&mut self, id: RowId, confirm: &mut impl Confirm) {
    if !confirm.confirm(&format!("delete this {}?", E::NOUN)) {
      return;
    }

    match self.store.delete::<E>(id).await {
      Ok(()) => {
        // The row being edited may be the one that just went away.
        if self.mode == Mode::Editing(id) {
          self.cancel_edit();
        }
        self.notifier.success(format!("{} deleted", E::NOUN));
        self.load().await;
      }
      Err(e) => {
        tracing::error!(table = E::TABLE, id = id.0, error = %e, "delete failed");
        self.notifier.error(e.to_string());
      }
    }
  }

  fn clear_form(&mut self) {
    for value in &mut self.form {
      value.clear();
    }
  }
}
