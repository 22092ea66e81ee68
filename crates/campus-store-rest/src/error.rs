//! Error type for `campus-store-rest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// A non-2xx response. Displays only the remote-supplied message so it
  /// reaches the status banner verbatim.
  #[error("{message}")]
  Remote { status: u16, message: String },

  #[error("decoding response: {0}")]
  Decode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
