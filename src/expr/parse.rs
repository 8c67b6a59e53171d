//! Tokenizer and recursive-descent parser for expression text.

use super::node::{Label, TreeNode};

pub(crate) const OPEN: &str = "(";
pub(crate) const CLOSE: &str = ")";

/// Errors raised while reading expression text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No tokens at all.
    #[error("empty expression")]
    Empty,

    /// A `)` with no open context.
    #[error("unexpected ')' at token {position}")]
    UnexpectedClose { position: usize },

    /// Input ended inside an open `(`.
    #[error("missing ')' before end of expression")]
    Unterminated,

    /// `()` with nothing inside.
    #[error("empty parentheses at token {position}")]
    EmptyList { position: usize },

    /// A textual edit needed a parenthesized expression.
    #[error("expression `{0}` has no argument list")]
    NotCompound(String),
}

/// `true` exactly for `AND`, `OR` and `NOT` (case-sensitive).
pub fn is_operator(token: &str) -> bool {
    matches!(token, "AND" | "OR" | "NOT")
}

pub(crate) fn is_paren(token: &str) -> bool {
    token == OPEN || token == CLOSE
}

/// Splits text on whitespace and parentheses, keeping `(` and `)` as
/// standalone tokens.
///
/// ```
/// use u_exprsearch::expr::tokenize;
///
/// assert_eq!(tokenize("(AND (NOT A) B)"), ["(", "AND", "(", "NOT", "A", ")", "B", ")"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        let paren = c == '(' || c == ')';
        if paren || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            if paren {
                tokens.push(&text[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }

    tokens
}

/// Parses a token stream into a tree.
///
/// The token after `(` is the node label; a `(` in that position opens an
/// implicit [`Label::Group`]. Two or more top-level expressions are also
/// wrapped in a group.
///
/// # Errors
///
/// [`ParseError::Empty`] for an empty stream, [`ParseError::UnexpectedClose`]
/// for an unmatched `)`, [`ParseError::Unterminated`] for a missing `)`,
/// [`ParseError::EmptyList`] for `()`.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<TreeNode, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let mut items = Vec::new();
    while parser.peek().is_some() {
        items.push(parser.expr()?);
    }

    if items.len() == 1 {
        Ok(items.remove(0))
    } else {
        Ok(TreeNode::with_children(Label::Group, items))
    }
}

/// Tokenizes and parses `text`.
pub fn parse_str(text: &str) -> Result<TreeNode, ParseError> {
    parse(&tokenize(text))
}

struct Parser<'a, S> {
    tokens: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(AsRef::as_ref)
    }

    fn bump(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expr(&mut self) -> Result<TreeNode, ParseError> {
        let position = self.pos;
        match self.bump() {
            None => Err(ParseError::Unterminated),
            Some(CLOSE) => Err(ParseError::UnexpectedClose { position }),
            Some(OPEN) => self.list(position),
            Some(atom) => Ok(TreeNode::leaf(atom)),
        }
    }

    /// Body of a parenthesized form; the `(` at `open` is already consumed.
    fn list(&mut self, open: usize) -> Result<TreeNode, ParseError> {
        let mut node = match self.peek() {
            None => return Err(ParseError::Unterminated),
            Some(CLOSE) => return Err(ParseError::EmptyList { position: open }),
            Some(OPEN) => TreeNode::new(Label::Group),
            Some(label) => {
                self.pos += 1;
                TreeNode::leaf(label)
            }
        };

        loop {
            match self.peek() {
                None => return Err(ParseError::Unterminated),
                Some(CLOSE) => {
                    self.pos += 1;
                    return Ok(node);
                }
                Some(_) => node.add_child(self.expr()?),
            }
        }
    }
}
