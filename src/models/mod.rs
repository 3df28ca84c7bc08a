pub mod distribution;
pub mod enums;
pub mod features;
pub mod prediction;
pub mod profile;

pub use distribution::*;
pub use enums::*;
pub use features::FeatureVector;
pub use prediction::*;
pub use profile::*;
