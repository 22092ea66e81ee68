//! PostgREST backend for the campus table store.
//!
//! The hosted database service is an external collaborator; this crate is
//! only the thin HTTP handle to it.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{RestConfig, RestStore};

#[cfg(test)]
mod tests;
