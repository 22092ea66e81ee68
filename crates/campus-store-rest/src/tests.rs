//! Unit tests for the pure parts of the REST client. No network involved.

use campus_core::{Row, RowId, Student};

use crate::{
  RestConfig, RestStore,
  store::remote_message,
};

fn store(base_url: &str) -> RestStore {
  RestStore::new(RestConfig {
    base_url: base_url.to_string(),
    api_key:  "anon-key".to_string(),
  })
  .expect("client")
}

// ─── URL construction ────────────────────────────────────────────────────────

#[test]
fn table_url_targets_rest_v1() {
  let s = store("https://example.supabase.co");
  assert_eq!(
    s.table_url("students"),
    "https://example.supabase.co/rest/v1/students"
  );
}

#[test]
fn table_url_tolerates_trailing_slash() {
  let s = store("https://example.supabase.co/");
  assert_eq!(
    s.table_url("courses"),
    "https://example.supabase.co/rest/v1/courses"
  );
}

// ─── Error body extraction ───────────────────────────────────────────────────

#[test]
fn remote_message_prefers_postgrest_message_field() {
  let body = r#"{"code":"23505","message":"duplicate key value","details":null}"#;
  assert_eq!(remote_message(body).as_deref(), Some("duplicate key value"));
}

#[test]
fn remote_message_falls_back_to_raw_text() {
  assert_eq!(
    remote_message("upstream connect error").as_deref(),
    Some("upstream connect error")
  );
}

#[test]
fn remote_message_is_none_for_blank_bodies() {
  assert!(remote_message("").is_none());
  assert!(remote_message("  \n").is_none());
}

#[test]
fn remote_message_ignores_json_without_message() {
  // Valid JSON but no message field: the raw body is better than nothing.
  let body = r#"{"hint":"check the table name"}"#;
  assert_eq!(remote_message(body).as_deref(), Some(body));
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

#[test]
fn rows_decode_with_flattened_fields() {
  let body = r#"[
    {"id": 7, "student_id": "S1", "name": "Ana", "email": "a@x.com", "major": "CS"}
  ]"#;

  let rows: Vec<Row<Student>> = serde_json::from_str(body).unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, RowId(7));
  assert_eq!(rows[0].record.student_id, "S1");
  assert_eq!(rows[0].record.email, "a@x.com");
}

#[test]
fn records_encode_without_an_id() {
  let student = Student {
    student_id: "S1".into(),
    name:       "Ana".into(),
    email:      "a@x.com".into(),
    major:      "CS".into(),
  };

  let value = serde_json::to_value([&student]).unwrap();
  assert!(value[0].get("id").is_none());
  assert_eq!(value[0]["student_id"], "S1");
}
