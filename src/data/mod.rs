//! Data acquisition: the site catalog, the HTTP client, and per-station aggregation.

pub mod aggregate;
pub mod catalog;
pub mod client;

pub use aggregate::{aggregate, classify_station, station_url};
pub use catalog::list_sites;
pub use client::{ApiResponse, StatsClient, StatsFetch};
