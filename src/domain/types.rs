//! Shared domain types.
//!
//! These are plain value types: the catalog entries, the per-station aggregates
//! built from API payloads, and the flattened rows handed to the report layer.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of daily samples reported per generator.
pub const HISTORY_DAYS: usize = 7;

/// Energy source of a station, as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationType {
    Wind,
    Solar,
    Gas,
    Coal,
}

impl StationType {
    pub fn display_name(self) -> &'static str {
        match self {
            StationType::Wind => "wind farm",
            StationType::Solar => "solar farm",
            StationType::Gas => "gas",
            StationType::Coal => "coal",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Measurement kind of a record (`data_type` in the API payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Energy,
    Emissions,
    MarketValue,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Energy, Category::Emissions, Category::MarketValue];

    /// Map an API `data_type` onto a category. Unknown kinds yield `None`.
    pub fn from_data_type(data_type: &str) -> Option<Self> {
        match data_type {
            "energy" => Some(Category::Energy),
            "emissions" => Some(Category::Emissions),
            "market_value" => Some(Category::MarketValue),
            _ => None,
        }
    }

    pub fn data_type(self) -> &'static str {
        match self {
            Category::Energy => "energy",
            Category::Emissions => "emissions",
            Category::MarketValue => "market_value",
        }
    }

    /// Table caption used by the show commands.
    pub fn title(self) -> &'static str {
        match self {
            Category::Energy => "Power (MWh) per generator at each power station",
            Category::Emissions => "Emissions (tCO2e) per generator at each power station",
            Category::MarketValue => "Market value (AUD) per generator at each power station",
        }
    }
}

/// A catalog entry. Defined once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDescriptor {
    pub code: &'static str,
    pub station_type: StationType,
    pub name: &'static str,
    pub location: &'static str,
}

/// Daily history of one generator for one category.
///
/// `history` is chronological, oldest first. JSON `null` samples are stored as
/// `NaN` so later samples keep their position.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSeries {
    pub generator_code: String,
    pub history: Vec<f64>,
    /// First day of the history, when the payload provides one.
    pub start: Option<NaiveDate>,
}

impl GeneratorSeries {
    pub fn new(generator_code: impl Into<String>, history: Vec<f64>) -> Self {
        Self {
            generator_code: generator_code.into(),
            history,
            start: None,
        }
    }
}

/// All series returned for one station in a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationAggregate {
    pub station_code: String,
    pub station_type: StationType,
    pub energy_series: Vec<GeneratorSeries>,
    pub emissions_series: Vec<GeneratorSeries>,
    pub market_value_series: Vec<GeneratorSeries>,
}

impl StationAggregate {
    /// An aggregate with no series, used when a station yields no usable data.
    pub fn empty(site: &SiteDescriptor) -> Self {
        Self {
            station_code: site.code.to_string(),
            station_type: site.station_type,
            energy_series: Vec::new(),
            emissions_series: Vec::new(),
            market_value_series: Vec::new(),
        }
    }

    pub fn series(&self, category: Category) -> &[GeneratorSeries] {
        match category {
            Category::Energy => &self.energy_series,
            Category::Emissions => &self.emissions_series,
            Category::MarketValue => &self.market_value_series,
        }
    }

    pub fn series_mut(&mut self, category: Category) -> &mut Vec<GeneratorSeries> {
        match category {
            Category::Energy => &mut self.energy_series,
            Category::Emissions => &mut self.emissions_series,
            Category::MarketValue => &mut self.market_value_series,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.series(*c).is_empty())
    }
}

/// One reportable row. `None` marks a day without data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub station_code: String,
    pub generator_code: String,
    pub station_type: StationType,
    pub days: [Option<i64>; HISTORY_DAYS],
}

/// What to do when a station request fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportPolicy {
    /// Stop the run on the first unreachable request.
    #[default]
    Abort,
    /// Record an empty aggregate for the station and continue.
    Skip,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, the environment, and defaults.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub dump_path: PathBuf,
    pub jobs: usize,
    pub transport_policy: TransportPolicy,
    pub export_rows: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_mapping_covers_known_kinds_only() {
        for category in Category::ALL {
            assert_eq!(Category::from_data_type(category.data_type()), Some(category));
        }
        assert_eq!(Category::from_data_type("power"), None);
        assert_eq!(Category::from_data_type("Energy"), None);
    }

    #[test]
    fn series_accessor_matches_bucket() {
        let site = SiteDescriptor {
            code: "TEST",
            station_type: StationType::Gas,
            name: "Test",
            location: "Nowhere",
        };
        let mut agg = StationAggregate::empty(&site);
        assert!(agg.is_empty());

        agg.series_mut(Category::Emissions).push(GeneratorSeries::new("G1", vec![1.0]));
        assert!(agg.energy_series.is_empty());
        assert_eq!(agg.emissions_series.len(), 1);
        assert!(agg.market_value_series.is_empty());
        assert!(!agg.is_empty());
    }
}
