use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};

use league_core::{ingest_json, simulate_league, LeagueConfig, SimulationConfig};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Preset {
    SerieA,
    SerieB,
}

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON array of provider match records
    #[clap(short = 'm', long)]
    matches: PathBuf,

    /// built-in league definition
    #[clap(short = 'l', long, value_enum)]
    league: Option<Preset>,

    /// league definition file
    #[clap(long = "league-config")]
    league_config: Option<PathBuf>,

    /// simulation configuration file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// number of trials, overrides the configuration file
    #[clap(short = 'n', long)]
    trials: Option<usize>,

    /// random seed, overrides the configuration file
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// write the summary here instead of stdout
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.league.is_none() && self.league_config.is_none()
            || self.league.is_some() && self.league_config.is_some()
        {
            bail!("either the -l or the --league-config flag must be specified");
        }
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let league = match (&args.league, &args.league_config) {
        (Some(Preset::SerieA), _) => LeagueConfig::serie_a(),
        (Some(Preset::SerieB), _) => LeagueConfig::serie_b(),
        (None, Some(path)) => read_json(path)?,
        (None, None) => unreachable!("validated"),
    };
    let mut config: SimulationConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    debug!("config: {config:?}");

    let raw = fs::read_to_string(&args.matches)
        .with_context(|| format!("reading {}", args.matches.display()))?;
    let ingested = ingest_json(&raw).context("parsing match records")?;
    info!(
        "loaded {} matches ({} excluded)",
        ingested.matches.len(),
        ingested.excluded.len()
    );

    let summary = simulate_league(&ingested.matches, &league, &config)?;
    let json = serde_json::to_string_pretty(&summary)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("summary written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
