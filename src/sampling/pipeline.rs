//! One expansion round: sample, reduce, deduplicate, score.
//!
//! [`DemeExpander`] turns an exemplar into a scored [`Deme`] by chaining
//! the neighborhood sampler with the external reduction and fitness
//! oracles. It does not loop over generations; the caller decides what
//! happens with the resulting deme.

use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::sampler::sample_new_instances;
use crate::expr::{parse_str, ParseError};
use crate::model::{Deme, FitnessOracle, Hyperparams, Instance, Knob, ReductionOracle};

/// Default per-site mutation probability.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.5;

/// Reduces `text` through `reducer`, falling back to `text` itself.
///
/// A list result contributes its first element. An oracle error, an empty
/// list, or a reduced form that does not parse (or whose re-serialized text
/// would read back differently) are logged and replaced by the unreduced
/// text. The result is re-serialized so it is canonical.
pub fn normalize_reduction<D: ReductionOracle>(reducer: &D, text: &str) -> String {
    let reduced = match reducer.reduce(text) {
        Ok(reduction) => match reduction.into_expr() {
            Some(expr) => expr,
            None => {
                warn!("reduction of `{text}` returned no expression; keeping it unreduced");
                return text.to_string();
            }
        },
        Err(err) => {
            warn!("reduction of `{text}` failed: {err}; keeping it unreduced");
            return text.to_string();
        }
    };

    match parse_str(&reduced) {
        Ok(tree) if tree.round_trips() => tree.to_string(),
        Ok(_) => {
            warn!("reduction of `{text}` gave `{reduced}`, which has no canonical text; keeping it unreduced");
            text.to_string()
        }
        Err(err) => {
            warn!("reduction of `{text}` gave unparseable `{reduced}` ({err}); keeping it unreduced");
            text.to_string()
        }
    }
}

/// Builds scored demes from exemplars.
///
/// # Usage
///
/// ```
/// use u_exprsearch::model::{Hyperparams, IdentityReduction, Instance, Knob};
/// use u_exprsearch::random::create_rng;
/// use u_exprsearch::sampling::DemeExpander;
///
/// let pool: Vec<Knob> = ["A", "B", "C"].into_iter().map(Knob::new).collect();
/// let fitness = |inst: &Instance| -(inst.value.len() as f64);
/// let expander = DemeExpander::new(&IdentityReduction, &fitness, Hyperparams::default());
///
/// let exemplar = Instance::new("(AND A B)", 0);
/// let mut rng = create_rng(1);
/// let deme = expander.expand(1, &exemplar, &pool[2..], &pool, &mut rng).unwrap();
/// assert!(deme.iter().all(|inst| inst.score < 0.0));
/// ```
pub struct DemeExpander<'a, D, F> {
    reducer: &'a D,
    fitness: &'a F,
    hyperparams: Hyperparams,
    mutation_probability: f64,
}

impl<'a, D, F> DemeExpander<'a, D, F>
where
    D: ReductionOracle,
    F: FitnessOracle,
{
    pub fn new(reducer: &'a D, fitness: &'a F, hyperparams: Hyperparams) -> Self {
        Self {
            reducer,
            fitness,
            hyperparams,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }

    /// Sets the per-site mutation probability `p` (clamped to `[0, 1]`).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn hyperparams(&self) -> &Hyperparams {
        &self.hyperparams
    }

    /// Samples, reduces and scores the neighborhood of `exemplar`.
    ///
    /// Candidates that reduce to the same text are merged (first wins), and
    /// each surviving candidate is scored exactly once. Knobs are re-derived
    /// from the reduced text, resolved against `pool` then `proposals`.
    ///
    /// The deme is named after the exemplar's value.
    ///
    /// # Errors
    ///
    /// Propagates the [`ParseError`] of a malformed exemplar.
    pub fn expand<R: Rng>(
        &self,
        generation: u64,
        exemplar: &Instance,
        proposals: &[Knob],
        pool: &[Knob],
        rng: &mut R,
    ) -> Result<Deme, ParseError> {
        let neighborhood = sample_new_instances(
            self.mutation_probability,
            &self.hyperparams,
            exemplar,
            proposals,
            pool,
            rng,
        )?;
        let sampled = neighborhood.len();

        let mut seen = HashSet::new();
        let mut candidates: Vec<Instance> = Vec::with_capacity(sampled);
        for mut candidate in neighborhood.into_instances() {
            let reduced = normalize_reduction(self.reducer, &candidate.value);
            if !seen.insert(reduced.clone()) {
                continue;
            }
            candidate.knobs.clear();
            candidate.register_knobs(&reduced, pool, proposals);
            candidate.value = reduced;
            candidate.prune_knobs();
            candidates.push(candidate);
        }

        self.evaluate(&mut candidates);

        debug!(
            "expand: generation {generation}, {} of {sampled} sampled neighbors survive reduction",
            candidates.len()
        );
        Ok(Deme::new(
            exemplar.value.clone(),
            generation,
            self.hyperparams.clone(),
            candidates,
        ))
    }

    fn evaluate(&self, candidates: &mut [Instance]) {
        #[cfg(feature = "parallel")]
        candidates.par_iter_mut().for_each(|inst| {
            inst.score = self.fitness.get_fitness(inst);
        });
        #[cfg(not(feature = "parallel"))]
        for inst in candidates.iter_mut() {
            inst.score = self.fitness.get_fitness(inst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdentityReduction, Reduction};
    use crate::random::create_rng;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_log::test;

    #[derive(Debug)]
    struct OracleDown;

    impl fmt::Display for OracleDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("oracle unavailable")
        }
    }

    impl std::error::Error for OracleDown {}

    /// Reducer driven by a closure.
    struct ScriptedReduction<G>(G);

    impl<G> ReductionOracle for ScriptedReduction<G>
    where
        G: Fn(&str) -> Result<Reduction, OracleDown> + Send + Sync,
    {
        type Error = OracleDown;

        fn reduce(&self, expression: &str) -> Result<Reduction, OracleDown> {
            (self.0)(expression)
        }
    }

    fn scripted<G>(script: G) -> ScriptedReduction<G>
    where
        G: Fn(&str) -> Result<Reduction, OracleDown> + Send + Sync,
    {
        ScriptedReduction(script)
    }

    fn knobs(symbols: &[&str]) -> Vec<Knob> {
        symbols.iter().copied().map(Knob::new).collect()
    }

    #[test]
    fn test_normalize_expr_result() {
        let reducer = scripted(|_: &str| Ok(Reduction::Expr("(AND  A   C)".into())));
        assert_eq!(normalize_reduction(&reducer, "(AND A C A)"), "(AND A C)");
    }

    #[test]
    fn test_normalize_uses_first_alternative() {
        let reducer = scripted(|_: &str| {
            Ok(Reduction::Alternatives(vec!["(OR B C)".into(), "(OR C B)".into()]))
        });
        assert_eq!(normalize_reduction(&reducer, "(OR C B B)"), "(OR B C)");
    }

    #[test]
    fn test_normalize_falls_back_on_empty_list() {
        let reducer = scripted(|_: &str| Ok(Reduction::Alternatives(Vec::new())));
        assert_eq!(normalize_reduction(&reducer, "(AND A B)"), "(AND A B)");
    }

    #[test]
    fn test_normalize_falls_back_on_error() {
        let reducer = scripted(|_: &str| Err(OracleDown));
        assert_eq!(normalize_reduction(&reducer, "(AND A B)"), "(AND A B)");
    }

    #[test]
    fn test_normalize_falls_back_on_unparseable() {
        let reducer = scripted(|_: &str| Ok(Reduction::Expr("(AND A".into())));
        assert_eq!(normalize_reduction(&reducer, "(AND A B)"), "(AND A B)");
    }

    #[test]
    fn test_normalize_falls_back_on_leaf_headed_group() {
        // `A C` would re-serialize as `(A C)`, an application of `A`.
        let reducer = scripted(|_: &str| Ok(Reduction::Expr("A C".into())));
        assert_eq!(normalize_reduction(&reducer, "(AND A C)"), "(AND A C)");

        let grouped = scripted(|_: &str| Ok(Reduction::Expr("(NOT A)   C".into())));
        assert_eq!(normalize_reduction(&grouped, "(AND (NOT A) C)"), "((NOT A) C)");
    }

    #[test]
    fn test_expand_scores_every_candidate_once() {
        let pool = knobs(&["A", "B", "C", "D"]);
        let calls = AtomicUsize::new(0);
        let fitness = |inst: &Instance| {
            calls.fetch_add(1, Ordering::SeqCst);
            inst.value.len() as f64
        };
        let hyper = Hyperparams::default().with_neighborhood_size(20);
        let expander = DemeExpander::new(&IdentityReduction, &fitness, hyper.clone());
        let exemplar = Instance::new("(AND A B)", 0);
        let mut rng = create_rng(9);

        let deme = expander
            .expand(3, &exemplar, &pool[2..], &pool, &mut rng)
            .unwrap();

        assert!(!deme.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), deme.len());
        assert_eq!(deme.generation, 3);
        assert_eq!(deme.name, "(AND A B)");
        assert_eq!(deme.q_hyper, hyper);
        for inst in &deme {
            assert_eq!(inst.score, inst.value.len() as f64);
            assert!(inst.knobs_consistent());
        }
    }

    #[test]
    fn test_expand_merges_candidates_with_same_reduction() {
        let pool = knobs(&["A", "B", "C", "D"]);
        let reducer = scripted(|_: &str| Ok(Reduction::Expr("(AND A C)".into())));
        let fitness = |_: &Instance| 1.0;
        let expander = DemeExpander::new(&reducer, &fitness, Hyperparams::default());
        let exemplar = Instance::new("(AND A B)", 0);
        let mut rng = create_rng(2);

        let deme = expander
            .expand(0, &exemplar, &pool[2..], &pool, &mut rng)
            .unwrap();

        assert_eq!(deme.len(), 1);
        let only = &deme.instances()[0];
        assert_eq!(only.value, "(AND A C)");
        assert_eq!(only.id, 1);
        assert_eq!(only.knobs, knobs(&["A", "C"]));
    }

    #[test]
    fn test_expand_rederives_knobs_from_reduced_text() {
        let pool = knobs(&["A", "B", "C"]);
        let reducer = scripted(|text: &str| {
            // Drop every B, as a simplifier might after absorbing it.
            let kept: Vec<&str> = text.split(' ').filter(|t| *t != "B").collect();
            Ok(Reduction::Expr(kept.join(" ")))
        });
        let fitness = |_: &Instance| 0.5;
        let expander = DemeExpander::new(&reducer, &fitness, Hyperparams::default())
            .with_mutation_probability(1.0);
        let exemplar = Instance::new("(AND A B)", 0).with_knobs(knobs(&["A", "B"]));
        let mut rng = create_rng(4);

        let deme = expander
            .expand(0, &exemplar, &knobs(&["C"]), &pool, &mut rng)
            .unwrap();

        assert_eq!(deme.len(), 1);
        let only = &deme.instances()[0];
        assert_eq!(only.value, "(AND A C)");
        assert_eq!(only.knobs, knobs(&["A", "C"]));
    }

    #[test]
    fn test_expand_propagates_parse_error() {
        let pool = knobs(&["A"]);
        let fitness = |_: &Instance| 0.0;
        let expander = DemeExpander::new(&IdentityReduction, &fitness, Hyperparams::default());
        let mut rng = create_rng(0);

        let result = expander.expand(0, &Instance::new("", 0), &pool, &pool, &mut rng);
        assert_eq!(result, Err(ParseError::Empty));
    }

    #[test]
    fn test_mutation_probability_is_clamped() {
        let fitness = |_: &Instance| 0.0;
        let expander = DemeExpander::new(&IdentityReduction, &fitness, Hyperparams::default())
            .with_mutation_probability(3.0);
        assert_eq!(expander.mutation_probability, 1.0);
        assert_eq!(expander.hyperparams().neighborhood_size, 20);
    }
}
