//! Per-station statistics: fetch each site and sort its records into
//! energy / emissions / market value series.
//!
//! Failure isolation:
//! - a non-success status, an undecodable body or an empty `data` array gives
//!   the station an empty aggregate
//! - a malformed record is skipped on its own
//! - a transport failure aborts the run, unless `TransportPolicy::Skip` is set

use chrono::{DateTime, NaiveDate};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::data::client::{StatsFetch, join_url};
use crate::domain::{
    Category, GeneratorSeries, HISTORY_DAYS, SiteDescriptor, StationAggregate, StatsConfig, TransportPolicy,
};
use crate::error::{AppError, EXIT_USAGE, FetchError};
use crate::io::dump::DumpSink;

/// Statistics endpoint for a single station.
pub fn station_url(base_url: &str, code: &str) -> String {
    join_url(base_url, &format!("stats/energy/station/nem/{code}"))
}

/// Fetch and classify every site, returning one aggregate per site in catalog order.
///
/// Decoded bodies are passed to `sink` in the same order, after all fetches have
/// completed, so the dump log reads the same whether or not requests overlapped.
pub fn aggregate<F: StatsFetch>(
    fetcher: &F,
    config: &StatsConfig,
    sites: &[SiteDescriptor],
    sink: &mut dyn DumpSink,
) -> Result<Vec<StationAggregate>, AppError> {
    let outcomes = if config.jobs > 1 {
        fetch_parallel(fetcher, config, sites)?
    } else {
        fetch_sequential(fetcher, config, sites)
    };

    let mut out = Vec::with_capacity(sites.len());
    for (site, outcome) in sites.iter().zip(outcomes) {
        match outcome {
            Ok(station) => {
                if let Some(body) = &station.body {
                    sink.record(body)?;
                }
                out.push(station.aggregate);
            }
            Err(err) => match config.transport_policy {
                TransportPolicy::Abort => return Err(err.into()),
                TransportPolicy::Skip => {
                    warn!("{err}; reporting station '{}' without data", site.code);
                    out.push(StationAggregate::empty(site));
                }
            },
        }
    }

    Ok(out)
}

/// A fetched station: its aggregate plus the body to dump, if one decoded.
struct StationFetch {
    aggregate: StationAggregate,
    body: Option<Value>,
}

fn fetch_sequential<F: StatsFetch>(
    fetcher: &F,
    config: &StatsConfig,
    sites: &[SiteDescriptor],
) -> Vec<Result<StationFetch, FetchError>> {
    let mut out = Vec::with_capacity(sites.len());
    for site in sites {
        let outcome = fetch_station(fetcher, &config.base_url, site);
        let stop = outcome.is_err() && config.transport_policy == TransportPolicy::Abort;
        out.push(outcome);
        if stop {
            break;
        }
    }
    out
}

fn fetch_parallel<F: StatsFetch>(
    fetcher: &F,
    config: &StatsConfig,
    sites: &[SiteDescriptor],
) -> Result<Vec<Result<StationFetch, FetchError>>, AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count(config.jobs, sites.len()))
        .build()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to start worker pool: {e}")))?;

    // Indexed collect keeps catalog order regardless of completion order.
    Ok(pool.install(|| {
        sites
            .par_iter()
            .map(|site| fetch_station(fetcher, &config.base_url, site))
            .collect()
    }))
}

/// Never more workers than stations, and at least one.
fn worker_count(jobs: usize, stations: usize) -> usize {
    jobs.min(stations).max(1)
}

fn fetch_station<F: StatsFetch>(
    fetcher: &F,
    base_url: &str,
    site: &SiteDescriptor,
) -> Result<StationFetch, FetchError> {
    let url = station_url(base_url, site.code);
    let response = fetcher.fetch(&url, &[])?;

    let body = match response.json() {
        Ok(body) => Some(body),
        Err(err) => {
            warn!("{err}; station '{}' has no usable data", site.code);
            None
        }
    };

    if !response.is_success() {
        let err = FetchError::InvalidSiteCode {
            code: site.code.to_string(),
            status: response.status,
        };
        warn!("{err}");
        return Ok(StationFetch {
            aggregate: StationAggregate::empty(site),
            body,
        });
    }

    let aggregate = match &body {
        Some(body) => classify_station(site, body),
        None => StationAggregate::empty(site),
    };
    info!(
        "{}: {} energy, {} emissions, {} market value series",
        site.code,
        aggregate.energy_series.len(),
        aggregate.emissions_series.len(),
        aggregate.market_value_series.len()
    );

    Ok(StationFetch { aggregate, body })
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    code: String,
    history: RawHistory,
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    data: Vec<Option<f64>>,
    #[serde(default)]
    start: Option<String>,
}

/// Sort the records of one station payload into the three category buckets.
pub fn classify_station(site: &SiteDescriptor, body: &Value) -> StationAggregate {
    let mut aggregate = StationAggregate::empty(site);

    let records = match body.get("data").and_then(Value::as_array) {
        Some(records) if !records.is_empty() => records,
        Some(_) => {
            warn!("station '{}' returned an empty data array", site.code);
            return aggregate;
        }
        None => {
            warn!("station '{}' returned no data array", site.code);
            return aggregate;
        }
    };

    for (index, record) in records.iter().enumerate() {
        let data_type = match record.get("data_type").and_then(Value::as_str) {
            Some(data_type) => data_type,
            None => {
                warn!("{}", shape_error(site, index, "missing data_type"));
                continue;
            }
        };
        let Some(category) = Category::from_data_type(data_type) else {
            debug!("{}: ignoring record #{index} with data_type '{data_type}'", site.code);
            continue;
        };

        let raw = match RawRecord::deserialize(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}", shape_error(site, index, &e.to_string()));
                continue;
            }
        };

        let bucket = aggregate.series_mut(category);
        if bucket.iter().any(|s| s.generator_code == raw.code) {
            warn!(
                "{}: duplicate {} record for generator '{}' ignored",
                site.code,
                category.data_type(),
                raw.code
            );
            continue;
        }

        if raw.history.data.len() < HISTORY_DAYS {
            warn!(
                "{}: {} history for generator '{}' has {} of {HISTORY_DAYS} days",
                site.code,
                category.data_type(),
                raw.code,
                raw.history.data.len()
            );
        }

        bucket.push(GeneratorSeries {
            generator_code: raw.code,
            history: raw.history.data.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
            start: raw.history.start.as_deref().and_then(parse_start_date),
        });
    }

    aggregate
}

fn shape_error(site: &SiteDescriptor, index: usize, reason: &str) -> FetchError {
    FetchError::DataShape {
        station: site.code.to_string(),
        index,
        reason: reason.to_string(),
    }
}

/// Accepts RFC 3339 timestamps (`2023-04-28T00:00:00+10:00`) or bare dates.
fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}
