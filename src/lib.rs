//! `nem-station-stats` library crate.
//!
//! Fetches per-station generation statistics (energy, emissions, market value)
//! from the OpenNEM API and reshapes them into per-generator report rows.
//!
//! The binary (`nemstats`) is a thin wrapper around this library so the
//! fetch/classify pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
