//! Repeated mutation trials collected into a deduplicated neighborhood.

use std::collections::HashMap;

use log::{debug, trace};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::mutation::mutate;
use crate::expr::ParseError;
use crate::model::{Hyperparams, Instance, Knob};
use crate::random::{create_rng, trial_seeds};

/// Neighbor instances keyed by expression text, in order of first
/// acceptance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighborhood {
    entries: Vec<Instance>,
    index: HashMap<String, usize>,
}

impl Neighborhood {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    pub fn get(&self, value: &str) -> Option<&Instance> {
        self.index.get(value).map(|&i| &self.entries[i])
    }

    /// Inserts `instance` unless its value is already present.
    ///
    /// Returns `false` (dropping the instance) on a duplicate.
    pub fn insert(&mut self, instance: Instance) -> bool {
        if self.index.contains_key(&instance.value) {
            return false;
        }
        self.index.insert(instance.value.clone(), self.entries.len());
        self.entries.push(instance);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.entries.iter()
    }

    /// Expression texts in acceptance order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|inst| inst.value.as_str())
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Samples the neighborhood of `exemplar`.
///
/// Runs exactly `hyperparams.neighborhood_size` mutation trials. Trials that
/// yield nothing are discarded; a trial whose text was already produced by
/// an earlier trial is dropped. Survivors get ids `exemplar.id + 1`,
/// `exemplar.id + 2`, ... in acceptance order.
///
/// Each trial runs on its own generator seeded from `rng`, so the result
/// for a given seed does not depend on the `parallel` feature.
///
/// # Errors
///
/// A malformed exemplar is unsampleable and yields its [`ParseError`].
pub fn sample_new_instances<R: Rng>(
    p: f64,
    hyperparams: &Hyperparams,
    exemplar: &Instance,
    proposals: &[Knob],
    pool: &[Knob],
    rng: &mut R,
) -> Result<Neighborhood, ParseError> {
    let seeds = trial_seeds(rng, hyperparams.neighborhood_size);
    let trial = |&seed: &u64| {
        let mut trial_rng = create_rng(seed);
        mutate(p, exemplar, proposals, pool, &mut trial_rng)
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Option<Instance>> = seeds.par_iter().map(trial).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Option<Instance>> = seeds.iter().map(trial).collect::<Result<_, _>>()?;

    let mut neighborhood = Neighborhood::default();
    for mut candidate in outcomes.into_iter().flatten() {
        if neighborhood.contains(&candidate.value) {
            trace!("sample: duplicate `{}` dropped", candidate.value);
            continue;
        }
        candidate.id = exemplar.id + neighborhood.len() as u64 + 1;
        neighborhood.insert(candidate);
    }

    debug!(
        "sample: {} distinct neighbors of `{}` from {} trials",
        neighborhood.len(),
        exemplar.value,
        hyperparams.neighborhood_size
    );
    Ok(neighborhood)
}
