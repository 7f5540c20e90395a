//! Comparison service for the Vicinity engine.
//!
//! This crate wires the pure domain logic in `vicinity_core` to its data
//! collaborators. [`SnapshotResolver`] turns neighborhood names into fetched
//! snapshots with bounded, order-preserving concurrency;
//! [`ComparisonService::compare_neighborhoods`] validates a request, resolves
//! it and hands the snapshots to the synthesiser. [`BlockingComparisonService`]
//! offers the same entry point to synchronous callers.
//!
//! Per-neighborhood failures are absorbed: the affected neighborhood is
//! dropped, logged through the `log` facade and listed in
//! `ComparisonResult::dropped`. Only an unusable request, too few surviving
//! neighborhoods or an unavailable directory produce a [`ComparisonError`];
//! a region the directory does not list counts as zero surviving
//! neighborhoods.
//!
//! The async API must run on a Tokio runtime: per-fetch deadlines use
//! `tokio::time`, which panics without a Tokio reactor.

#![forbid(unsafe_code)]

mod blocking;
mod config;
mod error;
mod resolver;
mod service;

pub use blocking::BlockingComparisonService;
pub use config::{DEFAULT_MAX_CONCURRENT_FETCHES, ResolverConfig};
pub use error::{ComparisonError, ServiceBuildError};
pub use resolver::{Resolution, SnapshotResolver};
pub use service::ComparisonService;
