//! Score → probability normalization with optional measurement noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::NoiseSettings;
use crate::models::{ClassProbabilities, ClassScores, CLASS_COUNT};

/// Minimum raw score before the first normalization.
pub const SCORE_FLOOR: f64 = 0.01;

/// Minimum probability after noise is added.
pub const NOISE_FLOOR: f64 = 0.005;

/// Source of zero-mean Gaussian perturbations.
///
/// The only non-deterministic seam of the engine. Tests inject a seeded
/// source; production draws from OS entropy.
pub trait NoiseSource {
    /// One sample from N(0, `std_dev`).
    fn gaussian(&mut self, std_dev: f64) -> f64;
}

/// [`NoiseSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngNoise<R = StdRng> {
    rng: R,
}

impl RngNoise<StdRng> {
    /// Reproducible source: equal seeds yield equal sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `settings.seed` is set, entropy otherwise.
    pub fn from_settings(settings: &NoiseSettings) -> Self {
        match settings.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RngNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    /// Zero for a non-positive or non-finite deviation. `Normal::new`
    /// accepts a negative deviation, so it is checked here.
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return 0.0;
        }
        match Normal::new(0.0, std_dev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

/// Turn raw class scores into a distribution.
///
/// Floors every score at [`SCORE_FLOOR`] (non-finite scores count as 0) and
/// normalizes. When noise is enabled, adds one N(0, σ) sample per class,
/// floors at [`NOISE_FLOOR`] and normalizes again. Noise with a zero or
/// invalid σ is skipped.
pub fn normalize_scores(
    scores: &ClassScores,
    settings: &NoiseSettings,
    noise: &mut dyn NoiseSource,
) -> ClassProbabilities {
    let base = ClassProbabilities::from_weights(*scores.as_array(), SCORE_FLOOR);

    if !settings.enabled || !(settings.std_dev.is_finite() && settings.std_dev > 0.0) {
        return base;
    }

    let mut perturbed = [0.0f64; CLASS_COUNT];
    for (slot, &p) in perturbed.iter_mut().zip(base.as_array()) {
        *slot = p + noise.gaussian(settings.std_dev);
    }
    debug!(std_dev = settings.std_dev, "Applied score perturbation");

    ClassProbabilities::from_weights(perturbed, NOISE_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassId;

    /// Fixed sequence of perturbations, cycled.
    struct ScriptedNoise(Vec<f64>, usize);

    impl NoiseSource for ScriptedNoise {
        fn gaussian(&mut self, _std_dev: f64) -> f64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    fn assert_valid(p: &ClassProbabilities) {
        assert!((p.sum() - 1.0).abs() < 1e-9, "Sum should be 1, got {}", p.sum());
        for (id, v) in p.iter() {
            assert!(v > 0.0, "{id} should be positive, got {v}");
        }
    }

    #[test]
    fn zero_scores_become_uniform() {
        let mut noise = RngNoise::seeded(1);
        let p = normalize_scores(&ClassScores::default(), &NoiseSettings::disabled(), &mut noise);
        assert_valid(&p);
        assert_eq!(p, ClassProbabilities::uniform());
    }

    #[test]
    fn floor_applies_before_normalization() {
        let scores = ClassScores::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.99, 0.0]);
        let mut noise = RngNoise::seeded(1);
        let p = normalize_scores(&scores, &NoiseSettings::disabled(), &mut noise);
        assert_valid(&p);
        // 0.01 / (0.99 + 6 * 0.01)
        assert!((p[ClassId::ActinicKeratosis] - 0.01 / 1.05).abs() < 1e-12);
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let scores = ClassScores::new([0.3, 0.2, 0.5, 0.1, 0.9, 0.4, 0.2]);
        let settings = NoiseSettings::seeded(7);
        let a = normalize_scores(&scores, &settings, &mut RngNoise::seeded(7));
        let b = normalize_scores(&scores, &settings, &mut RngNoise::seeded(7));
        assert_eq!(a, b);
        assert_valid(&a);

        let c = normalize_scores(&scores, &settings, &mut RngNoise::seeded(8));
        assert_ne!(a, c);
    }

    #[test]
    fn large_negative_noise_is_floored() {
        let scores = ClassScores::new([1.0; CLASS_COUNT]);
        let mut noise = ScriptedNoise(vec![-1.0, 0.0], 0);
        let p = normalize_scores(&scores, &NoiseSettings::default(), &mut noise);
        assert_valid(&p);
        let expected = NOISE_FLOOR / (NOISE_FLOOR * 4.0 + 3.0 / 7.0);
        assert!((p[ClassId::ActinicKeratosis] - expected).abs() < 1e-12);
    }

    #[test]
    fn non_finite_scores_are_sanitized() {
        let scores = ClassScores::new([f64::NAN, f64::INFINITY, -1.0, 0.5, 0.5, 0.5, 0.5]);
        let mut noise = RngNoise::seeded(3);
        let p = normalize_scores(&scores, &NoiseSettings::seeded(3), &mut noise);
        assert_valid(&p);
    }

    #[test]
    fn zero_std_dev_skips_noise() {
        let scores = ClassScores::new([0.3, 0.2, 0.5, 0.1, 0.9, 0.4, 0.2]);
        let settings = NoiseSettings {
            std_dev: 0.0,
            ..NoiseSettings::default()
        };
        let mut noise = ScriptedNoise(vec![0.5], 0);
        let p = normalize_scores(&scores, &settings, &mut noise);
        assert_eq!(p, normalize_scores(&scores, &NoiseSettings::disabled(), &mut noise));
    }

    #[test]
    fn gaussian_samples_are_small() {
        let mut noise = RngNoise::seeded(99);
        let samples: Vec<f64> = (0..1000).map(|_| noise.gaussian(0.015)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.003, "Mean should be near 0, got {mean}");
        assert!(samples.iter().all(|s| s.abs() < 0.1));
    }

    #[test]
    fn invalid_std_dev_yields_no_perturbation() {
        let mut noise = RngNoise::seeded(99);
        for std_dev in [-1.0, -0.015, 0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(noise.gaussian(std_dev), 0.0, "std_dev {std_dev} should give 0");
        }
    }
}
