//! Command-line parsing for the NEM station statistics reporter.
//!
//! Argument parsing and command dispatch stay separate from the fetch and
//! report code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nemstats",
    version,
    about = "Power generation statistics of Origin Energy power stations on the NEM (via OpenNEM)",
    after_help = "Examples:\n  nemstats sites\n  nemstats energy --export energy.csv\n  nemstats custom /stats/power/network/fueltech/nem/NSW1 nsw_stats.txt --param interval=1d --param period=7d"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// API base URL (defaults to $NEM_API_BASE, then https://api.opennem.org.au).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Append-only log receiving every raw JSON response.
    #[arg(long, global = true, default_value = "stationstats.txt")]
    pub dump_file: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Number of stations fetched concurrently.
    #[arg(short = 'j', long, global = true, default_value_t = 1)]
    pub jobs: usize,

    /// Report unreachable stations as empty instead of aborting the run.
    #[arg(long, global = true)]
    pub keep_going: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the power station catalog.
    Sites,
    /// Show energy generation (MWh) per generator over the previous week.
    Energy(ShowArgs),
    /// Show emissions (tCO2e) per generator over the previous week.
    Emissions(ShowArgs),
    /// Show market value (AUD) per generator over the previous week.
    MarketValue(ShowArgs),
    /// Send a custom API request and append the JSON result to a file.
    ///
    /// See https://api.opennem.org.au/docs for the available paths.
    Custom(CustomArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Also write the table rows to a CSV file.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CustomArgs {
    /// Path appended to the API base, e.g. /stats/power/network/fueltech/nem/NSW1.
    pub path: String,

    /// File the JSON response is appended to.
    pub output: PathBuf,

    /// Query parameter as key=value (repeatable).
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_params_parse() {
        let cli = Cli::parse_from([
            "nemstats",
            "custom",
            "/stats/power",
            "out.txt",
            "--param",
            "interval=1d",
            "-p",
            "period=7d",
        ]);
        match cli.command {
            Command::Custom(args) => {
                assert_eq!(args.path, "/stats/power");
                assert_eq!(args.output, PathBuf::from("out.txt"));
                assert_eq!(
                    args.params,
                    vec![
                        ("interval".to_string(), "1d".to_string()),
                        ("period".to_string(), "7d".to_string())
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["nemstats", "market-value", "-j", "4", "--keep-going", "-vv"]);
        assert!(matches!(cli.command, Command::MarketValue(_)));
        assert_eq!(cli.global.jobs, 4);
        assert!(cli.global.keep_going);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.dump_file, PathBuf::from("stationstats.txt"));
    }

    #[test]
    fn bad_param_is_rejected() {
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
        assert_eq!(parse_key_val("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }
}
