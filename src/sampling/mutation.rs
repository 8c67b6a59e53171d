//! Single-trial structural mutation of an expression tree.
//!
//! One call to [`mutate`] parses the exemplar into a fresh tree, draws a
//! random subset of the proposal menu, and walks the tree's edit sites in
//! breadth-first order, spending one selected symbol per successful edit.
//!
//! # Edits
//!
//! At each site a uniform draw above `p` attempts a **replace** of the
//! site's child; otherwise it attempts an **append** to the site's parent
//! (or to the grandparent when the parent is a `NOT`). Edits that would
//! duplicate a sibling, change nothing, or land under a non-junction are
//! skipped and the symbol stays at the head of the queue.
//!
//! A compound whose junction equals the junction it is inserted under is
//! flipped (`AND` ↔ `OR`) first, so nesting keeps alternating.

use std::collections::VecDeque;

use log::{debug, trace};
use rand::Rng;

use super::menu::{build_menu, random_uniform};
use crate::expr::{parse, tokenize, Label, ParseError, TreeNode};
use crate::model::{Instance, Knob};

/// Location of a potential edit: child `index` of the node at `parent`.
///
/// Paths are child-index sequences from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub parent: Vec<usize>,
    pub index: usize,
}

impl Site {
    /// Path of the parent's parent, `None` when the parent is the root.
    pub fn grandparent(&self) -> Option<&[usize]> {
        self.parent.split_last().map(|(_, rest)| rest)
    }
}

/// Enumerates edit sites breadth-first.
///
/// Every child of every visited node is a site; traversal continues into
/// children that are not leaves. Shallow sites therefore come first.
pub fn enumerate_sites(root: &TreeNode) -> Vec<Site> {
    let mut sites = Vec::new();
    let mut queue: VecDeque<(&TreeNode, Vec<usize>)> = VecDeque::from([(root, Vec::new())]);

    while let Some((node, path)) = queue.pop_front() {
        for (index, child) in node.children.iter().enumerate() {
            sites.push(Site {
                parent: path.clone(),
                index,
            });
            if !child.is_leaf() {
                let mut child_path = path.clone();
                child_path.push(index);
                queue.push_back((child, child_path));
            }
        }
    }

    sites
}

/// Runs one mutation trial on `exemplar`.
///
/// `proposals` are the knobs eligible for injection; `pool` is the full
/// knob pool consulted first when resolving the symbols of inserted
/// sub-expressions.
///
/// Returns `Ok(None)` when the root is not `AND`/`OR`, when there are no
/// proposals, when the menu draw comes up empty, or when no edit changed
/// the text. A returned instance has id `exemplar.id + 1`, score `0.0`, a
/// value different from the exemplar's, and only knobs that occur in that
/// value.
///
/// # Errors
///
/// Propagates the [`ParseError`] of a malformed exemplar.
pub fn mutate<R: Rng>(
    p: f64,
    exemplar: &Instance,
    proposals: &[Knob],
    pool: &[Knob],
    rng: &mut R,
) -> Result<Option<Instance>, ParseError> {
    let original = exemplar.value.as_str();
    let tokens = tokenize(original);
    let mut root = parse(&tokens)?;

    let root_op = match tokens.get(1).map(|t| Label::from_token(t)) {
        Some(op) if op.is_junction() => op,
        _ => {
            trace!("mutate: `{original}` has no AND/OR root");
            return Ok(None);
        }
    };
    if proposals.is_empty() {
        return Ok(None);
    }

    let mut selected: VecDeque<TreeNode> =
        random_uniform(build_menu(&root_op, proposals), rng).into();
    if selected.is_empty() {
        trace!("mutate: empty menu draw");
        return Ok(None);
    }

    let p = p.clamp(0.0, 1.0);
    let sites = enumerate_sites(&root);
    let mut mutant = Instance {
        value: original.to_string(),
        id: exemplar.id + 1,
        score: 0.0,
        knobs: exemplar.knobs.clone(),
    };

    for site in &sites {
        let Some(symbol) = selected.front() else {
            break;
        };

        let replace = rng.random::<f64>() > p;
        let applied = if replace {
            try_replace(&mut root, site, symbol)
        } else {
            try_append(&mut root, site, symbol)
        };
        if !applied {
            continue;
        }

        let Some(consumed) = selected.pop_front() else {
            break;
        };
        let consumed = consumed.to_string();
        trace!(
            "mutate: {} `{consumed}` at {:?}/{}",
            if replace { "replaced" } else { "appended" },
            site.parent,
            site.index
        );

        // A net-zero edit keeps the last distinct text as the value.
        let rendered = root.to_string();
        if rendered != original {
            mutant.value = rendered;
        }
        mutant.register_knobs(&consumed, pool, proposals);
    }

    mutant.prune_knobs();

    if mutant.value == original {
        return Ok(None);
    }
    debug!("mutate: `{original}` -> `{}`", mutant.value);
    Ok(Some(mutant))
}

/// Copy of `symbol` ready to sit under `parent`: a compound headed by the
/// parent's own junction is flipped to the opposite one.
fn aligned(symbol: &TreeNode, parent: &Label) -> TreeNode {
    let mut candidate = symbol.clone();
    if !candidate.is_leaf() && candidate.label == *parent {
        if let Some(flipped) = parent.opposite() {
            candidate.label = flipped;
        }
    }
    candidate
}

/// Overwrites the site's child with `symbol`.
///
/// Skipped when the site no longer exists, when the child already reads as
/// the symbol, or when another sibling does. A leaf never becomes the first
/// child of a group, since the group's text would then read back as an
/// application of that leaf.
fn try_replace(root: &mut TreeNode, site: &Site, symbol: &TreeNode) -> bool {
    let Some(parent) = root.node_at_mut(&site.parent) else {
        return false;
    };
    if site.index >= parent.children.len() {
        return false;
    }

    let candidate = aligned(symbol, &parent.label);
    if parent.label == Label::Group && site.index == 0 && candidate.is_leaf() {
        return false;
    }
    let text = candidate.to_string();
    if parent.children[site.index].to_string() == text {
        return false;
    }
    let duplicate = parent
        .children
        .iter()
        .enumerate()
        .any(|(i, sibling)| i != site.index && sibling.to_string() == text);
    if duplicate {
        return false;
    }

    parent.children[site.index] = candidate;
    true
}

/// Appends `symbol` as a new child next to the site.
///
/// The target is the site's parent, or its grandparent when the parent is
/// a `NOT`. Skipped when the site no longer exists, when a `NOT` parent is
/// the root, when the target is not `AND`/`OR`, or when the target already
/// has a child reading as the symbol.
fn try_append(root: &mut TreeNode, site: &Site, symbol: &TreeNode) -> bool {
    let under_not = match root.node_at(&site.parent) {
        Some(parent) if site.index < parent.children.len() => parent.label == Label::Not,
        _ => return false,
    };
    let target_path = if under_not {
        match site.grandparent() {
            Some(path) => path,
            None => return false,
        }
    } else {
        site.parent.as_slice()
    };

    let Some(target) = root.node_at_mut(target_path) else {
        return false;
    };
    if !target.label.is_junction() {
        return false;
    }

    let candidate = aligned(symbol, &target.label);
    let text = candidate.to_string();
    if target.children.iter().any(|child| child.to_string() == text) {
        return false;
    }

    target.add_child(candidate);
    true
}
