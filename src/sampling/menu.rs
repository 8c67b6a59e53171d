//! Candidate symbols for one mutation trial.

use rand::Rng;

use crate::expr::{Label, TreeNode};
use crate::model::Knob;

/// Builds the menu of insertable sub-expressions.
///
/// Every distinct proposal symbol appears as a leaf. Every unordered pair
/// `(s1, s2)` additionally contributes four compounds under the junction
/// opposite to `root_op`, one per sign combination:
///
/// ```text
/// (OP s1 s2) (OP (NOT s1) s2) (OP s1 (NOT s2)) (OP (NOT s1) (NOT s2))
/// ```
///
/// Returns an empty menu when `root_op` is not `AND`/`OR`.
///
/// ```
/// use u_exprsearch::expr::Label;
/// use u_exprsearch::model::Knob;
/// use u_exprsearch::sampling::build_menu;
///
/// let menu = build_menu(&Label::Or, &[Knob::new("X"), Knob::new("Y")]);
/// assert_eq!(menu.len(), 6);
/// assert_eq!(menu[2].to_string(), "(AND X Y)");
/// ```
pub fn build_menu(root_op: &Label, proposals: &[Knob]) -> Vec<TreeNode> {
    let Some(inner) = root_op.opposite() else {
        return Vec::new();
    };

    let mut symbols: Vec<&str> = Vec::with_capacity(proposals.len());
    for knob in proposals {
        if !symbols.contains(&knob.symbol()) {
            symbols.push(knob.symbol());
        }
    }

    let mut menu: Vec<TreeNode> = symbols.iter().map(|s| TreeNode::leaf(s)).collect();
    for (i, first) in symbols.iter().enumerate() {
        for second in &symbols[i + 1..] {
            for (negate_first, negate_second) in
                [(false, false), (true, false), (false, true), (true, true)]
            {
                menu.push(TreeNode::with_children(
                    inner.clone(),
                    vec![literal(first, negate_first), literal(second, negate_second)],
                ));
            }
        }
    }
    menu
}

fn literal(symbol: &str, negated: bool) -> TreeNode {
    let leaf = TreeNode::leaf(symbol);
    if negated {
        TreeNode::with_children(Label::Not, vec![leaf])
    } else {
        leaf
    }
}

/// Keeps each item independently with probability one half, preserving
/// order.
pub fn random_uniform<T, R: Rng>(items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.into_iter().filter(|_| rng.random_bool(0.5)).collect()
}
