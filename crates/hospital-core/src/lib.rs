//! Core types and trait definitions for the hospital record system.
//!
//! This crate is deliberately free of HTTP, database and crypto dependencies.
//! Every other crate depends on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod disease;
pub mod doctor;
pub mod error;
pub mod patient;
pub mod portfolio;
pub mod record;
pub mod specialization;
pub mod store;
pub mod validate;

pub use error::{Error, Result};

/// Storage-assigned identifier shared by every entity.
pub type Id = i64;
