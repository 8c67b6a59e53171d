//! Selection strategies over a deme.
//!
//! Selection decides which instances survive into the next generation.
//! Scores are maximized: a higher score is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::cmp::Ordering;

use rand::seq::index;
use rand::Rng;

use crate::model::{Deme, Instance};

/// Selection strategy for choosing survivors.
///
/// # Examples
///
/// ```
/// use u_exprsearch::selection::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Deterministic truncation to the best k
/// let sel = Selection::TopK;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Keep the `k` highest-scoring instances.
    ///
    /// # Complexity
    /// O(n log n)
    TopK,

    /// Tournament selection: `k` tournaments, each over a random subset of
    /// the given size drawn without replacement; the best of each subset
    /// wins. An instance may win several tournaments.
    ///
    /// # Complexity
    /// O(size) per tournament
    Tournament(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects up to `k` instances from `deme`.
    pub fn select<'a, R: Rng>(&self, deme: &'a Deme, k: usize, rng: &mut R) -> Vec<&'a Instance> {
        match self {
            Selection::TopK => select_top_k(deme, k),
            Selection::Tournament(size) => tournament_selection(deme, k, *size, rng),
        }
    }
}

/// Score used for ranking; NaN ranks below every other score.
fn rank_key(inst: &Instance) -> f64 {
    if inst.score.is_nan() {
        f64::NEG_INFINITY
    } else {
        inst.score
    }
}

/// Descending score order. Total, so NaN scores cannot break the sort.
fn by_score_desc(a: &Instance, b: &Instance) -> Ordering {
    rank_key(b).total_cmp(&rank_key(a))
}

/// The `k` best instances, best first.
///
/// The sort is stable: equal scores keep their deme order. NaN scores rank
/// last, tied with `-inf`. Returns all instances when the deme has fewer
/// than `k`.
pub fn select_top_k(deme: &Deme, k: usize) -> Vec<&Instance> {
    let mut ranked: Vec<&Instance> = deme.iter().collect();
    ranked.sort_by(|a, b| by_score_desc(a, b));
    ranked.truncate(k);
    ranked
}

/// Runs `min(k, |deme|)` independent tournaments.
///
/// Each tournament draws `min(tournament_size, |deme|)` distinct instances
/// (at least one) and keeps the highest-scoring one; on a tie the first
/// drawn wins.
pub fn tournament_selection<'a, R: Rng>(
    deme: &'a Deme,
    k: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<&'a Instance> {
    let instances = deme.instances();
    let n = instances.len();
    if n == 0 {
        return Vec::new();
    }

    let size = tournament_size.clamp(1, n);
    (0..k.min(n))
        .map(|_| tournament(instances, size, rng))
        .collect()
}

/// One tournament over `size` distinct random members; `size` must be in
/// `1..=instances.len()`.
fn tournament<'a, R: Rng>(instances: &'a [Instance], size: usize, rng: &mut R) -> &'a Instance {
    let mut draws = index::sample(rng, instances.len(), size).into_iter();
    let first = draws.next().unwrap_or(0);
    draws.fold(&instances[first], |best, idx| {
        let contender = &instances[idx];
        if contender.score > best.score {
            contender
        } else {
            best
        }
    })
}
