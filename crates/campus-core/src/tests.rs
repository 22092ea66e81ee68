//! Controller tests against an in-memory [`TableStore`].

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
  },
  time::Duration,
};

use crate::{
  Course, EntityController, Mode, NO_RECORDS, Severity, StatusNotifier,
  Student, TableRow,
  entity::{Entity, Row, RowId},
  store::TableStore,
};

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug)]
struct StoreError(String);

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl std::error::Error for StoreError {}

/// A `TableStore` holding rows as JSON values, one vector per table name.
/// `fail_with` makes every subsequent operation return that message.
#[derive(Default)]
struct MemoryStore {
  tables:  Mutex<HashMap<&'static str, Vec<(i64, serde_json::Value)>>>,
  next_id: AtomicI64,
  failure: Mutex<Option<String>>,
}

impl MemoryStore {
  fn fail_with(&self, message: &str) {
    *self.failure.lock().unwrap() = Some(message.to_string());
  }

  fn heal(&self) {
    *self.failure.lock().unwrap() = None;
  }

  fn check(&self) -> Result<(), StoreError> {
    match self.failure.lock().unwrap().as_ref() {
      Some(message) => Err(StoreError(message.clone())),
      None => Ok(()),
    }
  }

  fn row_count(&self, table: &'static str) -> usize {
    self
      .tables
      .lock()
      .unwrap()
      .get(table)
      .map(Vec::len)
      .unwrap_or(0)
  }
}

impl TableStore for MemoryStore {
  type Error = StoreError;

  async fn list<E: Entity>(&self) -> Result<Vec<Row<E>>, StoreError> {
    self.check()?;
    let tables = self.tables.lock().unwrap();
    let mut rows: Vec<Row<E>> = tables
      .get(E::TABLE)
      .map(|rows| {
        rows
          .iter()
          .map(|(id, value)| Row {
            id:     RowId(*id),
            record: serde_json::from_value(value.clone()).expect("decode"),
          })
          .collect()
      })
      .unwrap_or_default();
    rows.sort_by(|a, b| a.record.natural_key().cmp(b.record.natural_key()));
    Ok(rows)
  }

  async fn get<E: Entity>(&self, id: RowId) -> Result<Option<Row<E>>, StoreError> {
    self.check()?;
    let tables = self.tables.lock().unwrap();
    Ok(tables.get(E::TABLE).and_then(|rows| {
      rows.iter().find(|(row_id, _)| *row_id == id.0).map(|(row_id, value)| {
        Row {
          id:     RowId(*row_id),
          record: serde_json::from_value(value.clone()).expect("decode"),
        }
      })
    }))
  }

  async fn insert<E: Entity>(&self, record: &E) -> Result<(), StoreError> {
    self.check()?;
    let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let value = serde_json::to_value(record).expect("encode");
    self
      .tables
      .lock()
      .unwrap()
      .entry(E::TABLE)
      .or_default()
      .push((id, value));
    Ok(())
  }

  async fn update<E: Entity>(&self, id: RowId, record: &E) -> Result<(), StoreError> {
    self.check()?;
    let value = serde_json::to_value(record).expect("encode");
    let mut tables = self.tables.lock().unwrap();
    let rows = tables.entry(E::TABLE).or_default();
    match rows.iter_mut().find(|(row_id, _)| *row_id == id.0) {
      Some(slot) => {
        slot.1 = value;
        Ok(())
      }
      None => Err(StoreError(format!("row {} not found", id.0))),
    }
  }

  async fn delete<E: Entity>(&self, id: RowId) -> Result<(), StoreError> {
    self.check()?;
    let mut tables = self.tables.lock().unwrap();
    let rows = tables.entry(E::TABLE).or_default();
    let before = rows.len();
    rows.retain(|(row_id, _)| *row_id != id.0);
    if rows.len() == before {
      return Err(StoreError(format!("row {} not found", id.0)));
    }
    Ok(())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn students() -> (Arc<MemoryStore>, EntityController<Student, MemoryStore>) {
  let store = Arc::new(MemoryStore::default());
  let controller = EntityController::new(store.clone());
  (store, controller)
}

fn courses() -> (Arc<MemoryStore>, EntityController<Course, MemoryStore>) {
  let store = Arc::new(MemoryStore::default());
  let controller = EntityController::new(store.clone());
  (store, controller)
}

fn fill_form<E: Entity, S: TableStore>(
  controller: &mut EntityController<E, S>,
  values: &[&str],
) {
  for (field, value) in values.iter().enumerate() {
    *controller.form_value_mut(field).expect("unlocked field") =
      value.to_string();
  }
}

async fn seed_student(
  controller: &mut EntityController<Student, MemoryStore>,
  values: &[&str],
) -> RowId {
  fill_form(controller, values);
  controller.submit().await;
  controller
    .rows()
    .iter()
    .find(|row| row.record.student_id == values[0].trim())
    .expect("seeded row")
    .id
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_reloads_and_shows_row() {
  let (_, mut controller) = students();

  fill_form(&mut controller, &["S1", "  Ana ", "a@x.com", "CS"]);
  controller.submit().await;

  assert_eq!(controller.rows().len(), 1);
  let described = controller.table_rows();
  assert_eq!(described.len(), 1);
  assert_eq!(
    described[0],
    TableRow::Record {
      id:    described[0].id().unwrap(),
      cells: vec!["S1".into(), "Ana".into(), "a@x.com".into(), "CS".into()],
    }
  );

  // Form cleared on success.
  for field in 0..4 {
    assert_eq!(controller.form_value(field), "");
  }
  assert_eq!(controller.notice().unwrap().severity, Severity::Success);
}

#[tokio::test]
async fn failed_create_keeps_form_values() {
  let (store, mut controller) = students();
  store.fail_with("duplicate key value violates unique constraint");

  fill_form(&mut controller, &["S1", "Ana", "a@x.com", "CS"]);
  controller.submit().await;

  assert_eq!(controller.form_value(0), "S1");
  assert_eq!(controller.form_value(1), "Ana");
  assert_eq!(controller.form_value(2), "a@x.com");
  assert_eq!(controller.form_value(3), "CS");
  assert!(controller.rows().is_empty());

  let notice = controller.notice().unwrap();
  assert_eq!(notice.severity, Severity::Error);
  assert!(notice.text.contains("duplicate key value"));
}

#[tokio::test]
async fn course_credits_must_be_an_integer() {
  let (store, mut controller) = courses();

  fill_form(&mut controller, &["CS101", "Intro", "three", "MWF 9-10"]);
  controller.submit().await;

  assert_eq!(store.row_count(Course::TABLE), 0);
  let notice = controller.notice().unwrap();
  assert_eq!(notice.severity, Severity::Error);
  assert!(notice.text.contains("credit_count"));
  // The offending value stays in the form for correction.
  assert_eq!(controller.form_value(2), "three");
}

#[tokio::test]
async fn rows_come_back_ordered_by_natural_key() {
  let (_, mut controller) = students();

  seed_student(&mut controller, &["S2", "Bo", "b@x.com", "EE"]).await;
  seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  let keys: Vec<&str> = controller
    .rows()
    .iter()
    .map(|row| row.record.student_id.as_str())
    .collect();
  assert_eq!(keys, ["S1", "S2"]);
}

// ─── Load ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_load_renders_exactly_one_placeholder() {
  let (_, mut controller) = students();
  controller.load().await;

  let rows = controller.table_rows();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0], TableRow::Placeholder(NO_RECORDS));
}

#[tokio::test]
async fn failed_load_keeps_stale_rows_visible() {
  let (store, mut controller) = students();
  seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  store.fail_with("network unreachable");
  controller.load().await;

  assert_eq!(controller.rows().len(), 1);
  let notice = controller.notice().unwrap();
  assert_eq!(notice.severity, Severity::Error);
  assert!(notice.text.contains("network unreachable"));
}

// ─── Edit flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn begin_edit_populates_form_and_locks_key() {
  let (_, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.begin_edit(id).await;

  assert_eq!(controller.mode(), Mode::Editing(id));
  assert_eq!(controller.form_value(0), "S1");
  assert_eq!(controller.form_value(1), "Ana");
  assert!(controller.is_locked(0));
  assert!(controller.form_value_mut(0).is_none());
  assert!(controller.form_value_mut(1).is_some());

  let notice = controller.notice().unwrap();
  assert_eq!(notice.severity, Severity::Info);
  assert!(notice.text.contains("S1"));
}

#[tokio::test]
async fn update_returns_to_create_mode_and_reloads() {
  let (_, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.begin_edit(id).await;
  *controller.form_value_mut(3).unwrap() = "Math".to_string();
  controller.submit().await;

  assert_eq!(controller.mode(), Mode::Creating);
  assert_eq!(controller.form_value(3), "");
  assert_eq!(controller.rows().len(), 1);
  assert_eq!(controller.rows()[0].record.major, "Math");
  assert_eq!(controller.rows()[0].id, id);
}

#[tokio::test]
async fn failed_update_stays_in_edit_mode() {
  let (store, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.begin_edit(id).await;
  *controller.form_value_mut(1).unwrap() = "Anya".to_string();
  store.fail_with("permission denied");
  controller.submit().await;

  assert_eq!(controller.mode(), Mode::Editing(id));
  assert_eq!(controller.form_value(1), "Anya");
  assert!(controller.notice().unwrap().text.contains("permission denied"));
}

#[tokio::test]
async fn cancel_edit_restores_create_mode() {
  let (_, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.begin_edit(id).await;
  controller.cancel_edit();

  assert_eq!(controller.mode(), Mode::Creating);
  assert_eq!(controller.form_value(0), "");
  assert!(!controller.is_locked(0));
}

#[tokio::test]
async fn begin_edit_of_missing_row_reports_error() {
  let (_, mut controller) = students();

  controller.begin_edit(RowId(99)).await;

  assert_eq!(controller.mode(), Mode::Creating);
  assert_eq!(controller.notice().unwrap().severity, Severity::Error);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn confirmed_delete_removes_row_then_placeholder() {
  let (store, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.delete(id, &mut |_: &str| true).await;

  assert_eq!(store.row_count(Student::TABLE), 0);
  assert!(controller.rows().iter().all(|row| row.id != id));
  assert_eq!(controller.table_rows(), vec![TableRow::Placeholder(NO_RECORDS)]);
}

#[tokio::test]
async fn declined_delete_changes_nothing() {
  let (store, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;
  controller.dismiss_notice();

  let mut prompts: Vec<String> = Vec::new();
  controller
    .delete(id, &mut |prompt: &str| {
      prompts.push(prompt.to_string());
      false
    })
    .await;

  // The prompt was shown, but nothing was issued remotely and no notice
  // was posted — a declined confirmation is not an error.
  assert_eq!(prompts.len(), 1);
  assert_eq!(store.row_count(Student::TABLE), 1);
  assert_eq!(controller.rows().len(), 1);
  assert!(controller.notice().is_none());
}

#[tokio::test]
async fn failed_delete_surfaces_remote_message() {
  let (store, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  store.fail_with("row is locked");
  controller.delete(id, &mut |_: &str| true).await;
  store.heal();

  assert!(controller.notice().unwrap().text.contains("row is locked"));
  assert_eq!(controller.rows().len(), 1);
}

#[tokio::test]
async fn deleting_the_row_under_edit_resets_the_form() {
  let (_, mut controller) = students();
  let id = seed_student(&mut controller, &["S1", "Ana", "a@x.com", "CS"]).await;

  controller.begin_edit(id).await;
  controller.delete(id, &mut |_: &str| true).await;

  assert_eq!(controller.mode(), Mode::Creating);
  assert_eq!(controller.form_value(0), "");
}

// ─── Notifier ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn a_new_notice_replaces_the_current_one() {
  let mut notifier = StatusNotifier::new();
  notifier.success("first");
  notifier.error("second");

  let notice = notifier.current().unwrap();
  assert_eq!(notice.severity, Severity::Error);
  assert_eq!(notice.text, "second");
}

#[tokio::test]
async fn notices_expire_after_the_ttl() {
  let mut notifier = StatusNotifier::with_ttl(Duration::ZERO);
  notifier.info("gone in a blink");
  assert!(notifier.current().is_none());
}

#[tokio::test]
async fn notices_can_be_dismissed() {
  let mut notifier = StatusNotifier::new();
  notifier.info("closable");
  notifier.clear();
  assert!(notifier.current().is_none());
}

// ─── Scenario ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn student_lifecycle_scenario() {
  let (_, mut controller) = students();

  // Create S1 / Ana / a@x.com / CS.
  fill_form(&mut controller, &["S1", "Ana", "a@x.com", "CS"]);
  controller.submit().await;

  let rows = controller.table_rows();
  assert_eq!(rows.len(), 1);
  let id = rows[0].id().unwrap();
  assert_eq!(
    rows[0],
    TableRow::Record {
      id,
      cells: vec!["S1".into(), "Ana".into(), "a@x.com".into(), "CS".into()],
    }
  );

  // Confirmed delete brings back the placeholder.
  controller.delete(id, &mut |_: &str| true).await;
  assert_eq!(controller.table_rows(), vec![TableRow::Placeholder(NO_RECORDS)]);
}
