//! Core types shared across the grappelli workspace.
//!
//! Currently this is the exception module: the error enum every other
//! crate propagates, plus the `Result` alias.

pub mod exception;

pub use exception::{Error, Result};
