//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the run configuration
//! - runs the report pipeline or a custom request
//! - prints tables and writes optional exports

use std::time::Duration;

use clap::Parser;
use log::info;

use crate::cli::{Command, CustomArgs, GlobalArgs, ShowArgs};
use crate::data::StatsClient;
use crate::data::client::{BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::domain::{Category, StatsConfig, TransportPolicy};
use crate::error::{AppError, EXIT_USAGE};
use crate::io::dump::{DumpLog, pretty_json};

pub mod pipeline;

/// Entry point for the `nemstats` binary.
pub fn run() -> Result<(), AppError> {
    // `nemstats` alone lists the catalog, and a leading legacy short flag
    // (`-l`, `-g`, `-e`, `-m`, `-c`) selects the matching subcommand.
    let argv = rewrite_args(std::env::args().collect())?;
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.global.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Command::Sites => handle_sites(),
        Command::Energy(args) => handle_show(&cli.global, args, Category::Energy),
        Command::Emissions(args) => handle_show(&cli.global, args, Category::Emissions),
        Command::MarketValue(args) => handle_show(&cli.global, args, Category::MarketValue),
        Command::Custom(args) => handle_custom(&cli.global, args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn handle_sites() -> Result<(), AppError> {
    println!("{}", crate::report::format_sites(crate::data::list_sites()));
    Ok(())
}

fn handle_show(global: &GlobalArgs, args: ShowArgs, category: Category) -> Result<(), AppError> {
    let config = stats_config_from_args(global, Some(&args), std::env::var(BASE_URL_ENV).ok());
    let mut dump = DumpLog::new(&config.dump_path);
    dump.clear()?;

    let client = StatsClient::new(config.timeout)?;
    let run = pipeline::run_report(&client, &config, category, crate::data::list_sites(), &mut dump)?;

    let window = crate::report::report_window(&run.aggregates, run.category);
    println!("{}", crate::report::format_report(run.category, &run.rows, window));

    if let Some(path) = &config.export_rows {
        crate::io::export::write_rows_csv(path, &run.rows)?;
        info!("wrote {} rows to {}", run.rows.len(), path.display());
    }
    Ok(())
}

fn handle_custom(global: &GlobalArgs, args: CustomArgs) -> Result<(), AppError> {
    let config = stats_config_from_args(global, None, std::env::var(BASE_URL_ENV).ok());
    DumpLog::new(&config.dump_path).clear()?;

    let url = pipeline::custom_url(&config, &args.path);
    println!("{url} to output file {}", args.output.display());

    let client = StatsClient::new(config.timeout)?;
    let mut output = DumpLog::new(&args.output);
    if let Some(body) = pipeline::run_custom(&client, &config, &args.path, &args.params, &mut output)? {
        println!("{}", pretty_json(&body)?);
    }
    Ok(())
}

/// Resolve flags, environment and defaults into a run configuration.
///
/// Base URL precedence: `--base-url`, then `env_base_url`, then the public API.
pub fn stats_config_from_args(
    global: &GlobalArgs,
    show: Option<&ShowArgs>,
    env_base_url: Option<String>,
) -> StatsConfig {
    let base_url = global
        .base_url
        .clone()
        .or(env_base_url)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    StatsConfig {
        base_url,
        timeout: Duration::from_secs(global.timeout.max(1)),
        dump_path: global.dump_file.clone(),
        jobs: global.jobs.max(1),
        transport_policy: if global.keep_going {
            TransportPolicy::Skip
        } else {
            TransportPolicy::Abort
        },
        export_rows: show.and_then(|s| s.export.clone()),
    }
}

/// Rewrite argv so a bare invocation and the legacy short flags keep working.
///
/// Rules:
/// - `nemstats`                 -> `nemstats sites`
/// - `nemstats -l|-g|-e|-m ...` -> `nemstats sites|energy|emissions|market-value ...`
/// - `nemstats -c PATH FILE`    -> `nemstats custom PATH FILE`
/// - `nemstats --keep-going`    -> `nemstats sites --keep-going` (any other leading flag)
/// - `nemstats --help/--version/-h/-V` -> unchanged
///
/// Only one mode is allowed per invocation: a legacy mode flag after the
/// subcommand (`nemstats -g -e`, `nemstats energy -e`) is rejected.
fn rewrite_args(mut argv: Vec<String>) -> Result<Vec<String>, AppError> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sites".to_string());
        return Ok(argv);
    };

    if let Some(subcommand) = legacy_subcommand(&arg1) {
        argv[1] = subcommand.to_string();
    } else {
        let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version");
        if arg1.starts_with('-') && !is_top_level_help_or_version {
            argv.insert(1, "sites".to_string());
        }
    }

    if let Some(extra) = argv.iter().skip(2).find(|arg| legacy_subcommand(arg).is_some()) {
        return Err(AppError::new(
            EXIT_USAGE,
            format!("'{extra}' selects another mode; run one of sites, energy, emissions, market-value or custom per invocation"),
        ));
    }
    Ok(argv)
}

fn legacy_subcommand(flag: &str) -> Option<&'static str> {
    match flag {
        "-l" | "--list" => Some("sites"),
        "-g" | "--genenergy" => Some("energy"),
        "-e" | "--emissions" => Some("emissions"),
        "-m" | "--marketvalue" => Some("market-value"),
        "-c" | "--customapi" => Some("custom"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::Cli;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_and_legacy_flags() {
        let rewrite = |args: &[&str]| rewrite_args(argv(args)).unwrap();

        assert_eq!(rewrite(&["nemstats"]), argv(&["nemstats", "sites"]));
        assert_eq!(rewrite(&["nemstats", "-g"]), argv(&["nemstats", "energy"]));
        assert_eq!(rewrite(&["nemstats", "-v"]), argv(&["nemstats", "sites", "-v"]));
        assert_eq!(
            rewrite(&["nemstats", "-c", "/stats", "out.txt"]),
            argv(&["nemstats", "custom", "/stats", "out.txt"])
        );
        assert_eq!(
            rewrite(&["nemstats", "emissions", "-v"]),
            argv(&["nemstats", "emissions", "-v"])
        );
        assert_eq!(rewrite(&["nemstats", "--help"]), argv(&["nemstats", "--help"]));
        assert_eq!(rewrite(&["nemstats", "-V"]), argv(&["nemstats", "-V"]));
    }

    #[test]
    fn leading_global_flags_default_to_sites() {
        let rewrite = |args: &[&str]| rewrite_args(argv(args)).unwrap();

        assert_eq!(
            rewrite(&["nemstats", "--keep-going"]),
            argv(&["nemstats", "sites", "--keep-going"])
        );

        let cli = Cli::try_parse_from(rewrite(&["nemstats", "--base-url", "http://mirror.test"])).unwrap();
        assert!(matches!(cli.command, Command::Sites));
        assert_eq!(cli.global.base_url.as_deref(), Some("http://mirror.test"));
    }

    #[test]
    fn second_mode_flag_is_rejected() {
        for args in [
            &["nemstats", "-g", "-e"][..],
            &["nemstats", "-l", "--marketvalue"][..],
            &["nemstats", "energy", "-e"][..],
        ] {
            let err = rewrite_args(argv(args)).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_USAGE);
            assert!(err.to_string().contains("selects another mode"), "{err}");
        }
    }

    #[test]
    fn config_resolution_precedence() {
        let cli = Cli::parse_from(["nemstats", "energy", "--export", "rows.csv", "-j", "0"]);
        let Command::Energy(show) = &cli.command else {
            panic!("expected energy command");
        };

        let config = stats_config_from_args(&cli.global, Some(show), Some("http://mirror.test".to_string()));
        assert_eq!(config.base_url, "http://mirror.test");
        assert_eq!(config.jobs, 1);
        assert_eq!(config.transport_policy, TransportPolicy::Abort);
        assert_eq!(config.export_rows, Some(PathBuf::from("rows.csv")));
        assert_eq!(config.timeout, Duration::from_secs(30));

        let config = stats_config_from_args(&cli.global, Some(show), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let cli = Cli::parse_from(["nemstats", "sites", "--base-url", "http://flag.test", "--keep-going"]);
        let config = stats_config_from_args(&cli.global, None, Some("http://mirror.test".to_string()));
        assert_eq!(config.base_url, "http://flag.test");
        assert_eq!(config.transport_policy, TransportPolicy::Skip);
        assert_eq!(config.export_rows, None);
    }
}
