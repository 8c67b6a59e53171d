//! Expression trees for parenthesized boolean formulas.
//!
//! Expressions are written as s-expressions over the operators `AND`, `OR`
//! and `NOT`:
//!
//! ```text
//! (AND (NOT x1) (OR x2 x3))
//! ```
//!
//! [`parse_str`] and [`TreeNode`]'s `Display` form an exact round trip for
//! every well-formed expression, i.e. a single top-level form whose
//! parenthesized nodes each carry at least one argument.
//!
//! # Submodules
//!
//! - `node`: [`Label`] and [`TreeNode`]
//! - `parse`: [`tokenize`], [`parse`], [`is_operator`], [`ParseError`]
//! - `edit`: token-level text edits ([`add_arg`], [`replace_one_symbol`],
//!   [`exclude_one_symbol`])

mod edit;
mod node;
mod parse;

pub use edit::{add_arg, exclude_one_symbol, render_tokens, replace_one_symbol, PLACEHOLDER};
pub use node::{Label, TreeNode};
pub use parse::{is_operator, parse, parse_str, tokenize, ParseError};

pub(crate) use parse::is_paren;
