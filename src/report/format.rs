//! Formatted terminal output.
//!
//! All table layout lives here so the fetch/classify code never deals with
//! presentation.

use chrono::NaiveDate;

use crate::domain::{Category, HISTORY_DAYS, ReportRow, SiteDescriptor};

/// Column headers of the per-generator table.
pub const ROW_HEADERS: [&str; 3 + HISTORY_DAYS] = [
    "Station Code",
    "Gen Code",
    "Gen Type",
    "Day1",
    "Day2",
    "Day3",
    "Day4",
    "Day5",
    "Day6",
    "Day7",
];

const NO_DATA: &str = "-";

/// Caption plus the per-generator table for one category.
pub fn format_report(category: Category, rows: &[ReportRow], window: Option<(NaiveDate, NaiveDate)>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(category.title());
    if let Some((start, end)) = window {
        out.push_str(&format!(" ({start} to {end})"));
    }
    out.push('\n');
    out.push_str(&format_rows(rows));
    out
}

/// The per-generator table.
pub fn format_rows(rows: &[ReportRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut line = vec![
                r.station_code.clone(),
                r.generator_code.clone(),
                r.station_type.display_name().to_string(),
            ];
            line.extend(r.days.iter().map(|d| match d {
                Some(v) => v.to_string(),
                None => NO_DATA.to_string(),
            }));
            line
        })
        .collect();

    // Text columns left-aligned, day columns right-aligned.
    render_table(&ROW_HEADERS, &cells, |col| col >= 3)
}

/// The site catalog, one line per site.
pub fn format_sites(sites: &[SiteDescriptor]) -> String {
    let cells: Vec<Vec<String>> = sites
        .iter()
        .map(|s| {
            vec![
                s.code.to_string(),
                s.station_type.display_name().to_string(),
                s.name.to_string(),
                s.location.to_string(),
            ]
        })
        .collect();

    render_table(&["Code", "Type", "Name", "Location"], &cells, |_| false)
}

fn render_table(headers: &[&str], rows: &[Vec<String>], right_align: impl Fn(usize) -> bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths, &right_align);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths, &|_| false);

    for row in rows {
        push_line(&mut out, row, &widths, &right_align);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], right_align: &dyn Fn(usize) -> bool) {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &w))| {
            if right_align(col) {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    out.push_str(parts.join("  ").trim_end());
    out.push('\n');
}
