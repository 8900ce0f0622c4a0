use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{check_probability, check_rate, ConfigError};
use crate::recurrence::LearningRates;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AversaConfig {
    pub run: RunConfig,
    pub ensemble: EnsembleConfig,
    pub sweep: SweepConfig,
}

impl AversaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AversaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from path, or return defaults with env overrides when the file is absent.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        tracing::info!("Config file {} not found, using defaults", path.display());
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Some(n) = env_override("AVERSA_RUNS") {
            self.ensemble.n_runs = n;
            self.sweep.rates_n_runs = n;
        }
        if let Some(n) = env_override("AVERSA_SEED") {
            self.ensemble.seed = Some(n);
        }
        if let Some(n) = env_override("AVERSA_WORKERS") {
            self.ensemble.workers = n;
        }
    }

    /// Validate every section the simulators will consume.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.ensemble.validate()?;
        self.sweep.validate()
    }
}

/// Parsed value of an env override. Unparsable values are logged and skipped.
fn env_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value: {:?}", name, raw);
            None
        }
    }
}

// ============================================================================
// Run parameters
// ============================================================================

/// Parameters for one acquisition + extinction run of a single stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Acquisition trials
    pub n_acq: usize,
    /// Extinction trials
    pub n_ext: usize,
    pub alpha_pos: f64,
    pub alpha_neg: f64,
    /// Reinforcement probability during acquisition
    pub p_us_acq: f64,
    /// Reinforcement probability during extinction
    pub p_us_ext: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_acq: 30,
            n_ext: 40,
            alpha_pos: 0.2,
            alpha_neg: 0.02, // impaired safety learning
            p_us_acq: 1.0,
            p_us_ext: 0.0,
        }
    }
}

impl RunConfig {
    pub fn rates(&self) -> LearningRates {
        LearningRates::new(self.alpha_pos, self.alpha_neg)
    }

    pub fn total_trials(&self) -> usize {
        self.n_acq + self.n_ext
    }

    pub fn with_rates(self, alpha_pos: f64, alpha_neg: f64) -> Self {
        Self {
            alpha_pos,
            alpha_neg,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("alpha_pos", self.alpha_pos)?;
        check_rate("alpha_neg", self.alpha_neg)?;
        check_probability("p_us_acq", self.p_us_acq)?;
        check_probability("p_us_ext", self.p_us_ext)
    }
}

/// Parameters for a coupled CS/GS run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualRunConfig {
    #[serde(flatten)]
    pub run: RunConfig,
    /// Generalization coefficient: share of CS plasticity transferred to GS
    pub g: f64,
}

impl Default for DualRunConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            g: 0.3,
        }
    }
}

impl DualRunConfig {
    pub fn new(run: RunConfig, g: f64) -> Self {
        Self { run, g }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        check_generalization(self.g)
    }
}

pub(crate) fn check_generalization(g: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&g) {
        Ok(())
    } else {
        Err(ConfigError::GeneralizationOutOfRange { value: g })
    }
}

// ============================================================================
// Ensemble + sweep
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub n_runs: usize,
    /// Master seed. `None` draws one from OS entropy at startup.
    pub seed: Option<u64>,
    /// Threads used to execute runs. Never changes the result.
    pub workers: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            n_runs: 300,
            seed: None,
            workers: 1,
        }
    }
}

impl EnsembleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Parameter sets for the preset comparisons.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Generalization strengths compared by the sweep
    pub generalization: Vec<f64>,
    /// g used for the CS vs GS comparison
    pub compare_g: f64,
    /// α₋ of the healthy group in the learning-rate comparison
    pub normal_alpha_neg: f64,
    /// α₋ of the impaired group
    pub impaired_alpha_neg: f64,
    /// Runs averaged by the learning-rate comparison
    pub rates_n_runs: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            generalization: vec![0.0, 0.2, 0.5, 0.8],
            compare_g: 0.5,
            normal_alpha_neg: 0.2,
            impaired_alpha_neg: 0.02,
            rates_n_runs: 200,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rates_n_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        for &g in &self.generalization {
            check_generalization(g)?;
        }
        check_generalization(self.compare_g)?;
        check_rate("normal_alpha_neg", self.normal_alpha_neg)?;
        check_rate("impaired_alpha_neg", self.impaired_alpha_neg)
    }
}

// ============================================================================
// Tests
// ============================================================================
