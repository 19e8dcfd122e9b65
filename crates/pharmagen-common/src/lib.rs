//! pharmagen-common — Shared error types used across all Pharmagen crates.

pub mod error;

pub use error::{PharmagenError, Result, ValidationError};
