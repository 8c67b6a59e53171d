//! Mutation engine and neighborhood sampling.
//!
//! # Key Functions
//!
//! - [`build_menu`]: candidate leaves and pair compounds for one trial
//! - [`mutate`]: one stochastic edit pass over a fresh copy of the exemplar
//! - [`sample_new_instances`]: many trials, deduplicated into a [`Neighborhood`]
//! - [`DemeExpander`]: sampling followed by reduction and scoring
//!
//! # Flow
//!
//! ```text
//! exemplar + proposals ─▶ mutate (×neighborhood_size) ─▶ dedup by text
//!     ─▶ reduce ─▶ dedup by reduced text ─▶ score ─▶ Deme
//! ```

mod menu;
mod mutation;
mod pipeline;
mod sampler;

pub use menu::{build_menu, random_uniform};
pub use mutation::{enumerate_sites, mutate, Site};
pub use pipeline::{normalize_reduction, DemeExpander, DEFAULT_MUTATION_PROBABILITY};
pub use sampler::{sample_new_instances, Neighborhood};
