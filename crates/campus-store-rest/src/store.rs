//! [`RestStore`] — the PostgREST implementation of [`TableStore`].
//!
//! Speaks the Supabase `rest/v1` dialect: per-table endpoints, `order` and
//! `id=eq.N` query parameters, the anon key sent as both `apikey` and bearer
//! token.

use std::time::Duration;

use campus_core::{
  entity::{Entity, Row, RowId},
  store::TableStore,
};
use reqwest::{Client, Method, RequestBuilder, Response};

use crate::{Error, Result};

/// Connection settings for the hosted row-store.
#[derive(Debug, Clone)]
pub struct RestConfig {
  pub base_url: String,
  pub api_key:  String,
}

/// Remote table client over a PostgREST-compatible HTTP API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: RestConfig,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  pub(crate) fn table_url(&self, table: &str) -> String {
    format!(
      "{}/rest/v1/{table}",
      self.config.base_url.trim_end_matches('/')
    )
  }

  fn request(&self, method: Method, table: &str) -> RequestBuilder {
    self
      .client
      .request(method, self.table_url(table))
      .header("apikey", &self.config.api_key)
      .bearer_auth(&self.config.api_key)
  }

  /// Pass 2xx responses through; turn anything else into [`Error::Remote`]
  /// carrying the body's message text.
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Remote {
      status:  status.as_u16(),
      message: remote_message(&body)
        .unwrap_or_else(|| format!("HTTP {status}")),
    })
  }
}

/// Extract the `message` field of a PostgREST error body, falling back to the
/// raw body text. `None` when the body is blank.
pub(crate) fn remote_message(body: &str) -> Option<String> {
  let from_json = serde_json::from_str::<serde_json::Value>(body)
    .ok()
    .and_then(|v| v.get("message")?.as_str().map(str::to_owned));
  from_json.or_else(|| {
    let raw = body.trim();
    (!raw.is_empty()).then(|| raw.to_string())
  })
}

fn id_filter(id: RowId) -> [(&'static str, String); 1] {
  [("id", format!("eq.{id}"))]
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for RestStore {
  type Error = Error;

  async fn list<E: Entity>(&self) -> Result<Vec<Row<E>>> {
    let resp = self
      .request(Method::GET, E::TABLE)
      .query(&[
        ("select", "*".to_string()),
        ("order", format!("{}.asc", E::key_column())),
      ])
      .send()
      .await?;

    let body = Self::check(resp).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
  }

  async fn get<E: Entity>(&self, id: RowId) -> Result<Option<Row<E>>> {
    let resp = self
      .request(Method::GET, E::TABLE)
      .query(&[("select", "*".to_string())])
      .query(&id_filter(id))
      .send()
      .await?;

    let body = Self::check(resp).await?.text().await?;
    let rows: Vec<Row<E>> = serde_json::from_str(&body)?;
    Ok(rows.into_iter().next())
  }

  async fn insert<E: Entity>(&self, record: &E) -> Result<()> {
    // PostgREST takes an array of rows; nothing in the response is consumed.
    let resp = self
      .request(Method::POST, E::TABLE)
      .header("Prefer", "return=minimal")
      .json(&[record])
      .send()
      .await?;

    Self::check(resp).await?;
    Ok(())
  }

  async fn update<E: Entity>(&self, id: RowId, record: &E) -> Result<()> {
    let resp = self
      .request(Method::PATCH, E::TABLE)
      .query(&id_filter(id))
      .header("Prefer", "return=minimal")
      .json(record)
      .send()
      .await?;

    Self::check(resp).await?;
    Ok(())
  }

  async fn delete<E: Entity>(&self, id: RowId) -> Result<()> {
    let resp = self
      .request(Method::DELETE, E::TABLE)
      .query(&id_filter(id))
      .send()
      .await?;

    Self::check(resp).await?;
    Ok(())
  }
}
