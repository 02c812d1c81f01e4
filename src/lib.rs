//! Test client for a queued scraping service: submits scrape jobs concurrently
//! and polls each one until it finishes.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod worker;

pub use error::{ProbeError, Result};
