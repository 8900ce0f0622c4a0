use anyhow::{Context, Result};
use aversa_core::scenario::{cs_vs_gs, generalization_sweep, learning_rate_comparison};
use aversa_core::{AversaConfig, Ensemble, EnsembleConfig, Report, Scenario};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

use output::{write_report, Format};

#[derive(Parser, Debug)]
#[command(name = "aversa", author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "AVERSA_CONFIG", default_value = "aversa.toml", global = true)]
    config: PathBuf,

    /// Runs averaged per scenario
    #[arg(long, global = true)]
    runs: Option<usize>,

    /// Master seed for the ensemble
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Threads used to execute runs
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Acquisition trials
    #[arg(long, global = true)]
    n_acq: Option<usize>,

    /// Extinction trials
    #[arg(long, global = true)]
    n_ext: Option<usize>,

    /// Learning rate for positive prediction errors
    #[arg(long, global = true)]
    alpha_pos: Option<f64>,

    /// Learning rate for non-positive prediction errors
    #[arg(long, global = true)]
    alpha_neg: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Csv, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normal vs impaired safety learning (single stimulus)
    Rates,
    /// GS curves across generalization strengths
    Sweep {
        /// Generalization coefficient; repeat for several curves
        #[arg(long = "g")]
        g: Vec<f64>,
    },
    /// CS vs GS for one generalization strength
    Compare {
        #[arg(long)]
        g: Option<f64>,
    },
    /// Deterministic expected trajectory (r replaced by its probability)
    Oracle {
        /// Also unroll a GS with this coefficient
        #[arg(long)]
        g: Option<f64>,
    },
}

impl Args {
    /// CLI flags win over file and env settings.
    fn apply_overrides(&self, config: &mut AversaConfig) {
        if let Some(n) = self.runs {
            config.ensemble.n_runs = n;
            config.sweep.rates_n_runs = n;
        }
        if let Some(seed) = self.seed {
            config.ensemble.seed = Some(seed);
        }
        if let Some(n) = self.workers {
            config.ensemble.workers = n;
        }
        if let Some(n) = self.n_acq {
            config.run.n_acq = n;
        }
        if let Some(n) = self.n_ext {
            config.run.n_ext = n;
        }
        if let Some(a) = self.alpha_pos {
            config.run.alpha_pos = a;
        }
        if let Some(a) = self.alpha_neg {
            config.run.alpha_neg = a;
        }
        match &self.command {
            Command::Sweep { g } if !g.is_empty() => config.sweep.generalization = g.clone(),
            Command::Compare { g: Some(g) } => config.sweep.compare_g = *g,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = AversaConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid simulation parameters")?;

    let base = config.run;
    let report = match &args.command {
        Command::Rates => {
            let mut ensemble = config.ensemble.clone();
            ensemble.n_runs = config.sweep.rates_n_runs;
            simulate(&ensemble, learning_rate_comparison(&base, &config.sweep))?
        }
        Command::Sweep { .. } => {
            simulate(&config.ensemble, generalization_sweep(&base, &config.sweep.generalization))?
        }
        Command::Compare { .. } => simulate(&config.ensemble, vec![cs_vs_gs(&base, config.sweep.compare_g)])?,
        Command::Oracle { g } => {
            let scenarios = match g {
                Some(g) => vec![cs_vs_gs(&base, *g)],
                None => vec![Scenario::single("E[V]", base)],
            };
            Report::expected(&scenarios).context("Invalid oracle parameters")?
        }
    };

    info!(
        series = report.series.len(),
        trials = report.trials(),
        extinction_onset = report.extinction_onset,
        "Simulation complete"
    );
    write_report(&report, args.format, std::io::stdout().lock())
}

fn simulate(config: &EnsembleConfig, scenarios: Vec<Scenario>) -> Result<Report> {
    let fallback_seed = rand::random::<u64>();
    let ensemble = Ensemble::from_config(config, fallback_seed)?;
    if config.seed.is_none() {
        info!("No seed configured, using {}", ensemble.master_seed());
    }
    info!(
        scenarios = scenarios.len(),
        n_runs = ensemble.n_runs(),
        workers = ensemble.workers(),
        "Running ensembles"
    );
    Ok(Report::simulate(&scenarios, &ensemble)?)
}
