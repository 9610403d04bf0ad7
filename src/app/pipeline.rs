//! Shared report pipeline used by the show commands.
//!
//! catalog -> per-station fetch + classify -> report rows
//!
//! Front-ends only decide what to print; the pipeline never writes to stdout.

use log::warn;
use serde_json::Value;

use crate::data::client::{StatsFetch, join_url};
use crate::domain::{Category, ReportRow, SiteDescriptor, StationAggregate, StatsConfig};
use crate::error::{AppError, FetchError};
use crate::io::dump::DumpSink;

/// All computed outputs of a single show command.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub category: Category,
    pub aggregates: Vec<StationAggregate>,
    pub rows: Vec<ReportRow>,
}

/// Aggregate every site and flatten the selected category into rows.
pub fn run_report<F: StatsFetch>(
    fetcher: &F,
    config: &StatsConfig,
    category: Category,
    sites: &[SiteDescriptor],
    sink: &mut dyn DumpSink,
) -> Result<RunOutput, AppError> {
    let aggregates = crate::data::aggregate(fetcher, config, sites, sink)?;
    let rows = crate::report::build_rows(&aggregates, category);

    Ok(RunOutput {
        category,
        aggregates,
        rows,
    })
}

/// Issue a custom GET against the API base.
///
/// Returns `None` when the body is not JSON; transport failures propagate. The
/// decoded body is recorded in `sink` whatever the status code.
pub fn run_custom<F: StatsFetch>(
    fetcher: &F,
    config: &StatsConfig,
    path: &str,
    params: &[(String, String)],
    sink: &mut dyn DumpSink,
) -> Result<Option<Value>, AppError> {
    let url = custom_url(config, path);
    let response = fetcher.fetch(&url, params)?;

    if !response.is_success() {
        warn!("{url} returned status {}", response.status);
    }

    match response.json() {
        Ok(body) => {
            sink.record(&body)?;
            Ok(Some(body))
        }
        Err(err @ FetchError::Decode { .. }) => {
            warn!("{err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// The URL a custom request for `path` is sent to.
pub fn custom_url(config: &StatsConfig, path: &str) -> String {
    join_url(&config.base_url, custom_path(path))
}

/// Strip shell quoting left around the path and surrounding whitespace.
fn custom_path(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}
