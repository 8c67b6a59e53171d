//! Token-level edits on expression text.
//!
//! These operate on the token stream rather than the tree, so they can
//! produce intermediate forms such as `(NOT)` that a tree edit never would.
//! Output is re-rendered with single spaces and no padding inside
//! parentheses.

use super::parse::{tokenize, ParseError, CLOSE, OPEN};

/// Token marking an open argument slot, filled by [`add_arg`].
pub const PLACEHOLDER: &str = "$";

/// Joins tokens with single spaces, omitting the space after `(` and
/// before `)`.
pub fn render_tokens(tokens: &[&str]) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for &token in tokens {
        if let Some(p) = prev {
            if p != OPEN && token != CLOSE {
                out.push(' ');
            }
        }
        out.push_str(token);
        prev = Some(token);
    }
    out
}

/// Checks that parentheses in `tokens` are balanced.
fn check_balance(tokens: &[&str]) -> Result<(), ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut depth = 0usize;
    for (position, &token) in tokens.iter().enumerate() {
        if token == OPEN {
            depth += 1;
        } else if token == CLOSE {
            depth = depth
                .checked_sub(1)
                .ok_or(ParseError::UnexpectedClose { position })?;
        }
    }
    if depth > 0 {
        return Err(ParseError::Unterminated);
    }
    Ok(())
}

/// Adds `arg` to an expression.
///
/// Fills the first [`PLACEHOLDER`] if there is one, otherwise appends `arg`
/// as the last argument of the final parenthesized form.
///
/// ```
/// use u_exprsearch::expr::add_arg;
///
/// assert_eq!(add_arg("(AND $ B)", "A").unwrap(), "(AND A B)");
/// assert_eq!(add_arg("  (AND A B)  ", "C").unwrap(), "(AND A B C)");
/// assert!(add_arg("(AND A B", "C").is_err());
/// ```
///
/// # Errors
///
/// Unbalanced input yields the matching [`ParseError`]; an atom without a
/// placeholder yields [`ParseError::NotCompound`].
pub fn add_arg(expr: &str, arg: &str) -> Result<String, ParseError> {
    let mut tokens = tokenize(expr);
    check_balance(&tokens)?;

    if let Some(slot) = tokens.iter().position(|&t| t == PLACEHOLDER) {
        tokens[slot] = arg;
        return Ok(render_tokens(&tokens));
    }

    match tokens.last() {
        Some(&CLOSE) => {
            let end = tokens.len() - 1;
            tokens.insert(end, arg);
            Ok(render_tokens(&tokens))
        }
        _ => Err(ParseError::NotCompound(expr.trim().to_string())),
    }
}

/// Replaces the first token equal to `old` (operators included) with `new`.
///
/// Returns the re-rendered expression unchanged when `old` is absent.
pub fn replace_one_symbol(expr: &str, old: &str, new: &str) -> String {
    let mut tokens = tokenize(expr);
    if let Some(slot) = tokens.iter().position(|&t| t == old) {
        tokens[slot] = new;
    }
    render_tokens(&tokens)
}

/// Removes the first token equal to `symbol`.
///
/// Returns the re-rendered expression unchanged when `symbol` is absent.
pub fn exclude_one_symbol(expr: &str, symbol: &str) -> String {
    let mut tokens = tokenize(expr);
    if let Some(slot) = tokens.iter().position(|&t| t == symbol) {
        tokens.remove(slot);
    }
    render_tokens(&tokens)
}
