//! Interfaces to the external collaborators of a sampling round.
//!
//! The crate never implements fitness evaluation, formula simplification or
//! feature ranking itself. Callers plug those in through the traits below,
//! in the same way a problem definition plugs into a generic optimizer.

use std::convert::Infallible;

use super::types::{Instance, Knob};

/// Scores a candidate expression. Higher is better.
///
/// Implementations hold the target outputs they score against and must be
/// a pure function of `instance.value`. The pipeline may call
/// `get_fitness` from several threads when the `parallel` feature is on.
///
/// Any `Fn(&Instance) -> f64` closure is a fitness oracle:
///
/// ```
/// use u_exprsearch::model::{FitnessOracle, Instance};
///
/// let by_length = |inst: &Instance| -(inst.value.len() as f64);
/// assert_eq!(by_length.get_fitness(&Instance::new("A", 0)), -1.0);
/// ```
pub trait FitnessOracle: Send + Sync {
    fn get_fitness(&self, instance: &Instance) -> f64;
}

impl<F> FitnessOracle for F
where
    F: Fn(&Instance) -> f64 + Send + Sync,
{
    fn get_fitness(&self, instance: &Instance) -> f64 {
        self(instance)
    }
}

/// Result shape of a [`ReductionOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// A single canonical expression.
    Expr(String),
    /// Several equivalent forms; the first one is used.
    Alternatives(Vec<String>),
}

impl Reduction {
    /// The expression to use, if any.
    pub fn into_expr(self) -> Option<String> {
        match self {
            Reduction::Expr(text) => Some(text),
            Reduction::Alternatives(list) => list.into_iter().next(),
        }
    }
}

/// Rewrites an expression into canonical (simplified) form.
///
/// Treated as a possibly-failing black box: errors and unusable results are
/// logged and the unreduced text is kept.
pub trait ReductionOracle: Send + Sync {
    type Error: std::error::Error;

    fn reduce(&self, expression: &str) -> Result<Reduction, Self::Error>;
}

/// Reduction that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReduction;

impl ReductionOracle for IdentityReduction {
    type Error = Infallible;

    fn reduce(&self, expression: &str) -> Result<Reduction, Infallible> {
        Ok(Reduction::Expr(expression.to_string()))
    }
}

/// One entry of a feature ranking: a single symbol or an interacting tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureSet {
    Single(String),
    Tuple(Vec<String>),
}

impl FeatureSet {
    pub fn symbols(&self) -> Vec<&str> {
        match self {
            FeatureSet::Single(s) => vec![s.as_str()],
            FeatureSet::Tuple(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// Resolves the symbols against `pool`, creating knobs for symbols the
    /// pool does not know.
    pub fn knobs(&self, pool: &[Knob]) -> Vec<Knob> {
        self.symbols()
            .into_iter()
            .map(|s| {
                pool.iter()
                    .find(|k| k.symbol() == s)
                    .cloned()
                    .unwrap_or_else(|| Knob::new(s))
            })
            .collect()
    }
}

/// Flattens ranked feature sets into a deduplicated proposal list, keeping
/// rank order.
pub fn proposals_from_ranking(ranking: &[FeatureSet], pool: &[Knob]) -> Vec<Knob> {
    let mut proposals: Vec<Knob> = Vec::new();
    for knob in ranking.iter().flat_map(|set| set.knobs(pool)) {
        if !proposals.contains(&knob) {
            proposals.push(knob);
        }
    }
    proposals
}

/// Interaction-aware feature ranking over a truth table.
///
/// Supplies the proposal subsets fed to the mutation engine, one subset per
/// search iteration.
pub trait FeatureRanker {
    /// Tabular truth-table representation consumed by the ranker.
    type Table;

    /// Interaction depth to rank at.
    fn order_features(&self, table: &Self::Table, output_column: &str) -> usize;

    /// Top `k` feature sets of order at most `max_order`, best first.
    fn rank_features(
        &self,
        table: &Self::Table,
        output_column: &str,
        k: usize,
        max_order: usize,
    ) -> Vec<FeatureSet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_fitness_oracle() {
        let oracle = |inst: &Instance| inst.id as f64;
        assert_eq!(oracle.get_fitness(&Instance::new("A", 4)), 4.0);
    }

    #[test]
    fn test_reduction_into_expr() {
        assert_eq!(Reduction::Expr("A".into()).into_expr(), Some("A".into()));
        assert_eq!(
            Reduction::Alternatives(vec!["B".into(), "C".into()]).into_expr(),
            Some("B".into())
        );
        assert_eq!(Reduction::Alternatives(Vec::new()).into_expr(), None);
    }

    #[test]
    fn test_identity_reduction() {
        assert_eq!(
            IdentityReduction.reduce("(OR A B)"),
            Ok(Reduction::Expr("(OR A B)".into()))
        );
    }

    #[test]
    fn test_feature_set_knobs() {
        let pool = vec![Knob::new("a"), Knob::new("b")];
        let set = FeatureSet::Tuple(vec!["b".into(), "z".into()]);
        assert_eq!(set.symbols(), ["b", "z"]);
        assert_eq!(set.knobs(&pool), [Knob::new("b"), Knob::new("z")]);
    }

    struct FixedRanker;

    impl FeatureRanker for FixedRanker {
        type Table = Vec<Vec<bool>>;

        fn order_features(&self, _table: &Self::Table, _output_column: &str) -> usize {
            2
        }

        fn rank_features(
            &self,
            _table: &Self::Table,
            _output_column: &str,
            k: usize,
            _max_order: usize,
        ) -> Vec<FeatureSet> {
            let ranking = vec![
                FeatureSet::Single("a".into()),
                FeatureSet::Tuple(vec!["a".into(), "c".into()]),
                FeatureSet::Single("b".into()),
            ];
            ranking.into_iter().take(k).collect()
        }
    }

    #[test]
    fn test_proposals_from_ranking() {
        let ranker = FixedRanker;
        let table = vec![vec![true, false]];
        let order = ranker.order_features(&table, "y");
        let ranking = ranker.rank_features(&table, "y", 2, order);
        let pool = vec![Knob::new("a"), Knob::new("b"), Knob::new("c")];

        let proposals = proposals_from_ranking(&ranking, &pool);
        assert_eq!(proposals, [Knob::new("a"), Knob::new("c")]);
    }
}
