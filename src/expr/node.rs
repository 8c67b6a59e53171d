//! Labeled ordered trees for parenthesized boolean expressions.

use std::fmt;
use std::str::FromStr;

use super::parse::{parse_str, ParseError};

/// Label of a [`TreeNode`].
///
/// The admissible operator set is closed: conjunction, disjunction,
/// negation, and the implicit [`Group`](Label::Group) wrapper. Everything
/// else is a [`Symbol`](Label::Symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT` (unary).
    Not,
    /// Implicit juxtaposition of sub-expressions with no governing operator.
    ///
    /// Only produced by the parser; the token `GROUP` itself is a symbol.
    Group,
    /// A variable or any other non-operator token.
    Symbol(String),
}

impl Label {
    /// Classifies a token. Operator names are case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "AND" => Label::And,
            "OR" => Label::Or,
            "NOT" => Label::Not,
            other => Label::Symbol(other.to_string()),
        }
    }

    /// `true` for `AND`, `OR` and `NOT`.
    pub fn is_operator(&self) -> bool {
        matches!(self, Label::And | Label::Or | Label::Not)
    }

    /// `true` for the n-ary operators `AND` and `OR`.
    pub fn is_junction(&self) -> bool {
        matches!(self, Label::And | Label::Or)
    }

    /// The dual junction: `AND` ↔ `OR`. `None` for every other label.
    pub fn opposite(&self) -> Option<Label> {
        match self {
            Label::And => Some(Label::Or),
            Label::Or => Some(Label::And),
            _ => None,
        }
    }

    /// Textual form of the label.
    pub fn as_str(&self) -> &str {
        match self {
            Label::And => "AND",
            Label::Or => "OR",
            Label::Not => "NOT",
            Label::Group => "GROUP",
            Label::Symbol(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of an expression tree.
///
/// Children are exclusively owned; cloning a tree is a deep copy.
///
/// # Serialization
///
/// A leaf renders as its label, an internal node as
/// `(label child1 child2 ...)`. A [`Label::Group`] node renders its
/// children inside parentheses without a label. That text reads back as a
/// group only while the first child is itself parenthesized; otherwise the
/// first child would be taken as a label. See [`round_trips`](Self::round_trips).
///
/// ```
/// use u_exprsearch::expr::{Label, TreeNode};
///
/// let mut node = TreeNode::new(Label::And);
/// node.add_child(TreeNode::leaf("A"));
/// node.add_child(TreeNode::with_children(Label::Not, vec![TreeNode::leaf("B")]));
/// assert_eq!(node.to_string(), "(AND A (NOT B))");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeNode {
    pub label: Label,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a childless node.
    pub fn new(label: Label) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    /// Creates a childless node from a token, classifying it with
    /// [`Label::from_token`].
    pub fn leaf(token: &str) -> Self {
        Self::new(Label::from_token(token))
    }

    pub fn with_children(label: Label, children: Vec<TreeNode>) -> Self {
        Self { label, children }
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows a path of child indices from this node.
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Mutable counterpart of [`node_at`](Self::node_at).
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// `true` when parsing this tree's text gives the tree back.
    ///
    /// Fails exactly when some [`Label::Group`] node is empty or starts with
    /// a leaf.
    pub fn round_trips(&self) -> bool {
        let head_ok = self.label != Label::Group
            || self.children.first().is_some_and(|head| !head.is_leaf());
        head_ok && self.children.iter().all(TreeNode::round_trips)
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grouped = self.label == Label::Group;
        if self.children.is_empty() && !grouped {
            return f.write_str(self.label.as_str());
        }

        f.write_str("(")?;
        let mut sep = "";
        if !grouped {
            f.write_str(self.label.as_str())?;
            sep = " ";
        }
        for child in &self.children {
            write!(f, "{sep}{child}")?;
            sep = " ";
        }
        f.write_str(")")
    }
}

impl FromStr for TreeNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
