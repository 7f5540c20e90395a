//! File-backed collaborators for the Vicinity engine.
//!
//! Responsibilities:
//! - Load JSON datasets that serve as both the neighborhood directory and the
//!   metrics store.
//! - Load custom metric catalogues into validated registries.
//!
//! Boundaries:
//! - Do not encode domain rules (they live in `vicinity-core`).
//! - Read files through `cap-std` with explicit ambient authority.
//!
//! Invariants:
//! - Loaded values are immutable; no global mutable state.

#![forbid(unsafe_code)]

mod catalogue;
mod dataset;
mod error;
mod fs;

pub use catalogue::{load_catalogue, parse_catalogue};
pub use dataset::{Dataset, load_dataset};
pub use error::DataError;
