//! Records the sampling engine operates on.
//!
//! # Key Types
//!
//! - [`Knob`]: a variable symbol eligible to appear in an expression
//! - [`Instance`]: one candidate expression with its score and knobs
//! - [`Deme`]: a sub-population of instances sharing a generation
//! - [`Hyperparams`]: sampling configuration
//!
//! # External Collaborators
//!
//! - [`FitnessOracle`]: scores an instance against target outputs
//! - [`ReductionOracle`]: rewrites an expression into canonical form
//! - [`FeatureRanker`]: ranks feature subsets that become proposal knobs

mod config;
mod deme;
mod oracle;
mod types;

pub use config::Hyperparams;
pub use deme::Deme;
pub use oracle::{
    proposals_from_ranking, FeatureRanker, FeatureSet, FitnessOracle, IdentityReduction,
    Reduction, ReductionOracle,
};
pub use types::{Instance, Knob};
