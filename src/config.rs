use serde::{Deserialize, Serialize};

use crate::models::CLASS_COUNT;

/// Application-level constants
pub const APP_NAME: &str = "Dermolens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default standard deviation of the probability perturbation.
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.015;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "dermolens=info"
}

// ═══════════════════════════════════════════════════════════
// Classification options
// ═══════════════════════════════════════════════════════════

/// How the engine turns features into a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Seven independent per-class rule sets, then normalization.
    #[default]
    FeatureRules,
    /// Templated distributions keyed by the ABCDE score tier.
    AbcdeTriage,
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeatureRules => write!(f, "feature_rules"),
            Self::AbcdeTriage => write!(f, "abcde_triage"),
        }
    }
}

/// Measurement-noise emulation applied after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub enabled: bool,
    /// Standard deviation of the zero-mean Gaussian added per class.
    pub std_dev: f64,
    /// Fixed seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            std_dev: DEFAULT_NOISE_STD_DEV,
            seed: None,
        }
    }
}

impl NoiseSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Per-call configuration for `classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    pub noise: NoiseSettings,
    pub mode: ScoringMode,
    /// Attach the ABCDE score, reasons, and feature summary to the result.
    pub include_abcde: bool,
    /// Run the medical knowledge adjuster over the engine's own distribution.
    pub apply_medical_adjustment: bool,
    /// Distribution from an external classifier, in `ClassId` order. When
    /// present it replaces the engine's own scoring and is always adjusted.
    pub base_distribution: Option<[f64; CLASS_COUNT]>,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            noise: NoiseSettings::default(),
            mode: ScoringMode::default(),
            include_abcde: true,
            apply_medical_adjustment: false,
            base_distribution: None,
        }
    }
}

impl ClassifyOptions {
    /// Options with perturbation disabled: repeated calls are bit-identical.
    pub fn deterministic() -> Self {
        Self {
            noise: NoiseSettings::disabled(),
            ..Self::default()
        }
    }

    pub fn with_base_distribution(mut self, base: [f64; CLASS_COUNT]) -> Self {
        self.base_distribution = Some(base);
        self
    }

    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
