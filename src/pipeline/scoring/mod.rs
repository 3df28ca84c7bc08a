pub mod abcde;
pub mod adjust;
pub mod normalize;
pub mod rules;
pub mod triage;

pub use abcde::score_abcde;
pub use adjust::adjust_distribution;
pub use normalize::{normalize_scores, NoiseSource, RngNoise};
pub use rules::score_classes;
pub use triage::triage_distribution;
