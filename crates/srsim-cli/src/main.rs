//! SRSim CLI
//!
//! Command-line front end for the SR / SRP reward simulator. Reads witness
//! and price payloads from disk, runs the engine and renders the result.

mod config;
mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{expand_path, CliConfig, ConfigSource, LogFormat, LoggingConfig};
use report::{RankingReport, SimulationReport};
use srsim_economics::{
    simulate_with, PriceQuote, RankedWitnessSet, SimulationInput, Witness, WitnessSnapshot,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "srsim")]
#[command(version)]
#[command(about = "Tron SR / SRP reward simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "~/.srsim/srsim.toml")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate tier and rewards for an address
    Simulate {
        /// Witness snapshot (explorer JSON)
        #[arg(short, long)]
        witnesses: PathBuf,

        /// Address to simulate
        #[arg(short, long)]
        address: String,

        /// TRX price in USD
        #[arg(short, long, required_unless_present = "price_file", conflicts_with = "price_file")]
        price: Option<f64>,

        /// Price feed payload (JSON)
        #[arg(long)]
        price_file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the ranked witness list
    Rank {
        /// Witness snapshot (explorer JSON)
        #[arg(short, long)]
        witnesses: PathBuf,

        /// Number of witnesses to show
        #[arg(short, long, default_value = "127")]
        top: usize,
    },

    /// Print the effective network parameters
    Params,

    /// Version information
    Version,
}

fn init_logging(verbose: bool, logging: &LoggingConfig) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn load_witnesses(path: &Path, config: &CliConfig) -> anyhow::Result<Vec<Witness>> {
    let path = expand_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("reading witness snapshot {}", path.display()))?;
    let snapshot = WitnessSnapshot::from_json(&content)
        .with_context(|| format!("parsing witness snapshot {}", path.display()))?;

    tracing::info!("Loaded {} witness records from {:?}", snapshot.len(), path);
    Ok(snapshot.into_witnesses(&config.network)?)
}

fn load_price(price: Option<f64>, price_file: Option<PathBuf>) -> anyhow::Result<f64> {
    match (price, price_file) {
        (Some(price), _) => Ok(price),
        (None, Some(file)) => {
            let file = expand_path(&file);
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading price feed {}", file.display()))?;
            let quote = PriceQuote::from_json(&content)
                .with_context(|| format!("parsing price feed {}", file.display()))?;
            tracing::info!("TRX price from feed: ${}", quote.usd);
            Ok(quote.usd)
        }
        (None, None) => anyhow::bail!("either --price or --price-file is required"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = expand_path(&cli.config);
    let (config, source) = CliConfig::load(&config_path)?;
    init_logging(cli.verbose, &config.logging);

    match source {
        ConfigSource::File(path) => tracing::info!("Config: {:?}", path),
        ConfigSource::Defaults(path) => {
            tracing::info!("Config {:?} not found, using Tron defaults", path)
        }
    }

    match cli.command {
        Commands::Simulate { witnesses, address, price, price_file, json } => {
            let witnesses = load_witnesses(&witnesses, &config)?;
            let price = load_price(price, price_file)?;

            let input = SimulationInput::new(address, witnesses, price);
            let result = simulate_with(&config.network, &input)?;
            tracing::debug!(
                tier = result.tier.tier.name(),
                rank = ?result.tier.rank,
                "Simulation complete"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let report = SimulationReport {
                    address: &input.target_address,
                    price,
                    result: &result,
                };
                print!("{report}");
            }
        }

        Commands::Rank { witnesses, top } => {
            let witnesses = load_witnesses(&witnesses, &config)?;
            let set = RankedWitnessSet::build(&witnesses);
            let report = RankingReport {
                set: &set,
                params: &config.network,
                top,
            };
            print!("{report}");
        }

        Commands::Params => {
            let params = &config.network;
            print!("{}", toml::to_string_pretty(params)?);
            println!();
            println!("# Derived");
            println!("# total_daily_blocks        = {}", params.total_daily_blocks());
            println!(
                "# total_daily_block_rewards = {}",
                report::format_amount(params.total_daily_block_rewards())
            );
            println!(
                "# total_daily_vote_rewards  = {}",
                report::format_amount(params.total_daily_vote_rewards())
            );
            println!(
                "# blocks_per_sr_per_day     = {}",
                report::format_amount(params.blocks_per_sr_per_day())
            );
        }

        Commands::Version => {
            println!("srsim v{}", env!("CARGO_PKG_VERSION"));
            println!("Rust: {}", rustc_version_runtime::version());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_witnesses_envelope() {
        let file = write_temp(
            r#"{"data": [
                {"address": "TA", "name": "Alpha", "realTimeVotes": 500, "brokerage": 20},
                {"address": "TB", "realTimeVotes": 300}
            ]}"#,
        );

        let witnesses = load_witnesses(file.path(), &CliConfig::default()).unwrap();
        assert_eq!(witnesses.len(), 2);
        assert_eq!(witnesses[0], Witness::new("TA", 500, 0.2, "Alpha"));
        assert_eq!(witnesses[1].brokerage, 0.2);
    }

    #[test]
    fn test_load_witnesses_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_witnesses(&path, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("reading witness snapshot"));
    }

    #[test]
    fn test_load_witnesses_negative_votes() {
        let file = write_temp(r#"[{"address": "TA", "votes": -5}]"#);

        let err = load_witnesses(file.path(), &CliConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<srsim_economics::SimulationError>(),
            Some(srsim_economics::SimulationError::NegativeVotes { votes: -5, .. })
        ));
    }

    #[test]
    fn test_load_price_explicit_wins() {
        let file = write_temp(r#"{"tron": {"usd": 0.12}}"#);

        let price = load_price(Some(0.5), Some(file.path().to_path_buf())).unwrap();
        assert_eq!(price, 0.5);
    }

    #[test]
    fn test_load_price_from_feed() {
        let file = write_temp(r#"{"tron": {"usd": 0.12}}"#);

        let price = load_price(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(price, 0.12);
    }

    #[test]
    fn test_load_price_bad_feed() {
        let file = write_temp(r#"{"tron": {"eur": 0.1}}"#);

        let err = load_price(None, Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("parsing price feed"));
    }

    #[test]
    fn test_load_price_requires_a_source() {
        let err = load_price(None, None).unwrap_err();
        assert!(err.to_string().contains("--price"));
    }
}
