//! Core types for the foosball match tracker.
//!
//! Team normalization, match records, ingestion validation, and the
//! statistics aggregator. This crate does no I/O; storage backends implement
//! [`store::MatchStore`] and presentation layers consume [`stats::Standings`].

pub mod entry;
pub mod error;
pub mod record;
pub mod stats;
pub mod store;
pub mod team;

pub use error::{Error, NormalizationError, ValidationError};
