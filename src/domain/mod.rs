//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - catalog entries (`SiteDescriptor`, `StationType`)
//! - measurement categories (`Category`)
//! - per-station aggregates and report rows (`StationAggregate`, `ReportRow`)
//! - the resolved run configuration (`StatsConfig`)

pub mod types;

pub use types::*;
