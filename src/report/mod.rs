//! Reporting utilities: flattening station aggregates into per-generator rows.

pub mod format;

pub use format::*;

use chrono::{Days, NaiveDate};

use crate::domain::{Category, GeneratorSeries, HISTORY_DAYS, ReportRow, StationAggregate};

/// One row per series in the selected category, in aggregate order and then in
/// bucket order.
///
/// Days take the first `HISTORY_DAYS` samples, truncated toward zero. Missing
/// days (short history) and null samples become `None`; extra samples are
/// ignored.
pub fn build_rows(aggregates: &[StationAggregate], category: Category) -> Vec<ReportRow> {
    let mut out = Vec::new();
    for agg in aggregates {
        for series in agg.series(category) {
            out.push(ReportRow {
                station_code: agg.station_code.clone(),
                generator_code: series.generator_code.clone(),
                station_type: agg.station_type,
                days: day_values(series),
            });
        }
    }
    out
}

fn day_values(series: &GeneratorSeries) -> [Option<i64>; HISTORY_DAYS] {
    let mut days = [None; HISTORY_DAYS];
    for (slot, value) in days.iter_mut().zip(&series.history) {
        if value.is_finite() {
            *slot = Some(value.trunc() as i64);
        }
    }
    days
}

/// Date range covered by the reported window, taken from the first series that
/// carries a start date.
pub fn report_window(aggregates: &[StationAggregate], category: Category) -> Option<(NaiveDate, NaiveDate)> {
    let start = aggregates
        .iter()
        .flat_map(|agg| agg.series(category))
        .find_map(|series| series.start)?;
    let end = start.checked_add_days(Days::new(HISTORY_DAYS as u64 - 1))?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SiteDescriptor, StationType};

    fn station(code: &'static str, station_type: StationType) -> StationAggregate {
        StationAggregate::empty(&SiteDescriptor {
            code,
            station_type,
            name: "Test",
            location: "Test, VIC",
        })
    }

    #[test]
    fn single_series_becomes_single_row() {
        let mut agg = station("ST1", StationType::Wind);
        agg.energy_series
            .push(GeneratorSeries::new("G1", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));

        let rows = build_rows(&[agg], Category::Energy);

        assert_eq!(
            rows,
            vec![ReportRow {
                station_code: "ST1".to_string(),
                generator_code: "G1".to_string(),
                station_type: StationType::Wind,
                days: [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)],
            }]
        );
        assert!(build_rows(&[], Category::Energy).is_empty());
    }

    #[test]
    fn values_truncate_toward_zero() {
        let mut agg = station("ST1", StationType::Gas);
        agg.market_value_series
            .push(GeneratorSeries::new("G1", vec![1.9, -1.9, 0.4, 1234.999, -0.2, 7.0, 8.5]));

        let rows = build_rows(&[agg], Category::MarketValue);
        assert_eq!(rows[0].days, [Some(1), Some(-1), Some(0), Some(1234), Some(0), Some(7), Some(8)]);
    }

    #[test]
    fn short_history_is_padded_and_long_history_truncated() {
        let mut agg = station("ST1", StationType::Coal);
        agg.emissions_series.push(GeneratorSeries::new("SHORT", vec![5.0, f64::NAN, 3.0]));
        agg.emissions_series
            .push(GeneratorSeries::new("LONG", (1..=10).map(f64::from).collect()));
        agg.emissions_series.push(GeneratorSeries::new("NONE", Vec::new()));

        let rows = build_rows(&[agg], Category::Emissions);

        assert_eq!(rows[0].days, [Some(5), None, Some(3), None, None, None, None]);
        assert_eq!(rows[1].days, [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);
        assert_eq!(rows[2].days, [None; HISTORY_DAYS]);
    }

    #[test]
    fn rows_follow_station_then_bucket_order() {
        let mut a = station("A", StationType::Gas);
        a.energy_series.push(GeneratorSeries::new("A2", vec![1.0]));
        a.energy_series.push(GeneratorSeries::new("A1", vec![1.0]));
        a.emissions_series.push(GeneratorSeries::new("AX", vec![1.0]));
        let b = station("B", StationType::Solar);
        let mut c = station("C", StationType::Wind);
        c.energy_series.push(GeneratorSeries::new("C1", vec![1.0]));

        let rows = build_rows(&[a, b, c], Category::Energy);
        let ids: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.station_code.as_str(), r.generator_code.as_str()))
            .collect();
        assert_eq!(ids, vec![("A", "A2"), ("A", "A1"), ("C", "C1")]);
    }

    #[test]
    fn report_window_spans_seven_days() {
        let mut agg = station("ST1", StationType::Gas);
        let mut series = GeneratorSeries::new("G1", vec![1.0]);
        series.start = NaiveDate::from_ymd_opt(2023, 4, 28);
        agg.energy_series.push(series);

        let window = report_window(&[agg.clone()], Category::Energy);
        assert_eq!(
            window,
            Some((
                NaiveDate::from_ymd_opt(2023, 4, 28).unwrap(),
                NaiveDate::from_ymd_opt(2023, 5, 4).unwrap()
            ))
        );
        assert_eq!(report_window(&[agg], Category::Emissions), None);
    }
}
