//! The delete-confirmation capability.
//!
//! Deletes require an explicit confirmation step. The capability is a trait
//! rather than a blocking dialog so controllers can be exercised without a
//! real UI; the front end gathers the user's answer and passes it through
//! this seam.

/// Answers a yes/no prompt.
pub trait Confirm {
  fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
  fn confirm(&mut self, prompt: &str) -> bool {
    self(prompt)
  }
}
