//! Neighborhood sampling for evolutionary search over boolean expressions.
//!
//! Given an exemplar expression and a pool of candidate variables
//! ("knobs"), the crate stochastically edits the expression's parse tree to
//! produce a deduplicated population of neighbor expressions, and offers
//! the selection operators that winnow such a population by fitness.
//!
//! - **Expressions** ([`expr`]): s-expression trees over `AND`/`OR`/`NOT`
//!   with an exact parse/serialize round trip.
//! - **Data model** ([`model`]): knobs, instances, demes, hyperparameters,
//!   and the traits through which external oracles (fitness, reduction,
//!   feature ranking) plug in.
//! - **Sampling** ([`sampling`]): the mutation engine, the neighborhood
//!   sampler, and a one-round reduce-and-score pipeline.
//! - **Selection** ([`selection`]): top-k and tournament selection.
//!
//! All randomness flows through an explicit `&mut impl Rng`; see
//! [`random::create_rng`] for reproducible runs.
//!
//! # Example
//!
//! ```
//! use u_exprsearch::model::{Hyperparams, Instance, Knob};
//! use u_exprsearch::random::create_rng;
//! use u_exprsearch::sampling::sample_new_instances;
//!
//! let pool: Vec<Knob> = ["A", "B", "C", "D"].into_iter().map(Knob::new).collect();
//! let exemplar = Instance::new("(AND A B)", 0).with_knobs(pool[..2].to_vec());
//! let hyper = Hyperparams::default().with_neighborhood_size(10);
//!
//! let mut rng = create_rng(42);
//! let neighbors = sample_new_instances(0.5, &hyper, &exemplar, &pool[2..], &pool, &mut rng).unwrap();
//! assert!(neighbors.len() <= 10);
//! assert!(neighbors.iter().all(|n| n.value != exemplar.value));
//! ```
//!
//! # Features
//!
//! - `parallel`: run mutation trials and fitness evaluation on rayon.
//!   Output is identical to the sequential path for the same seed.
//! - `serde`: `Serialize`/`Deserialize` for the data model.

pub mod expr;
pub mod model;
pub mod random;
pub mod sampling;
pub mod selection;
