//! Library crate for userdir-sync.
//!
//! This crate exposes the building blocks of the client-side store:
//! - Record enrichment with directory attributes (`enrich`)
//! - Error and result types (`error`)
//! - The remote CRUD gateway (`gateway`)
//! - The derived-view filter engine (`search`)
//! - Store state and its operations (`store`)
//!
//! It is used by the `userdir-sync` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod enrich;
pub mod error;
pub mod gateway;
pub mod search;
pub mod store;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{Result, SyncError};
