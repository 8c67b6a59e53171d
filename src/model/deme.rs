//! Demes: independent sub-populations of instances.

use super::config::Hyperparams;
use super::types::Instance;

/// A named, ordered collection of instances sharing a generation and a
/// hyperparameter configuration.
///
/// After construction only scores may change; instances cannot be added,
/// removed or edited through a shared deme.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deme {
    pub name: String,
    pub generation: u64,
    pub q_hyper: Hyperparams,
    instances: Vec<Instance>,
}

impl Deme {
    pub fn new(
        name: impl Into<String>,
        generation: u64,
        q_hyper: Hyperparams,
        instances: Vec<Instance>,
    ) -> Self {
        Self {
            name: name.into(),
            generation,
            q_hyper,
            instances,
        }
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Looks an instance up by id.
    pub fn get(&self, id: u64) -> Option<&Instance> {
        self.instances.iter().find(|inst| inst.id == id)
    }

    /// Assigns the score of the instance with the given id.
    ///
    /// Returns `false` if no such instance exists.
    pub fn set_score(&mut self, id: u64, score: f64) -> bool {
        match self.instances.iter_mut().find(|inst| inst.id == id) {
            Some(inst) => {
                inst.score = score;
                true
            }
            None => false,
        }
    }

    /// Highest-scoring instance; the first one wins ties.
    pub fn best(&self) -> Option<&Instance> {
        self.instances.iter().fold(None, |best, inst| match best {
            Some(b) if b.score >= inst.score => Some(b),
            _ => Some(inst),
        })
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

impl<'a> IntoIterator for &'a Deme {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
