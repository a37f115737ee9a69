//! Parsing and formatting of move sequences.
//!
//! A sequence is a list of move keys separated by whitespace or commas, such as
//! `R1 U1 R2 U2`. The keys `X` and `X'` are accepted as aliases for `X1` and
//! `X2`.

use chumsky::prelude::*;
use itertools::Itertools;

use crate::Move;

/// Error parsing a move sequence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A token does not name any move.
    #[error("unknown move {token:?} at byte {offset}")]
    UnknownMove {
        /// The offending token.
        token: String,
        /// Byte offset of the token in the input string.
        offset: usize,
    },
}

/// Returns the move named by a single token, or `None` if there is none.
pub fn parse_move(token: &str) -> Option<Move> {
    if let Some(mv) = Move::from_name(token) {
        return Some(mv);
    }
    let mut chars = token.chars();
    let face = chars.next()?;
    let key = match chars.as_str() {
        "" => format!("{face}1"),
        "'" => format!("{face}2"),
        _ => return None,
    };
    Move::from_name(&key)
}

/// Parses a sequence of moves.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, NotationError> {
    let tokens = tokens().parse(s).into_result().map_err(|errs| {
        let (start, end) = errs
            .first()
            .map_or((0, 0), |e| (e.span().start, e.span().end));
        NotationError::UnknownMove {
            token: s.get(start..end).unwrap_or_default().to_owned(),
            offset: start,
        }
    })?;
    tokens
        .into_iter()
        .map(|(token, span)| {
            parse_move(token).ok_or_else(|| NotationError::UnknownMove {
                token: token.to_owned(),
                offset: span.start,
            })
        })
        .collect()
}

/// Formats a sequence of moves as a string that [`parse_moves()`] accepts.
pub fn format_moves(moves: impl IntoIterator<Item = Move>) -> String {
    moves.into_iter().join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Splits a sequence into tokens, each with its span in the input.
fn tokens<'src>()
-> impl Parser<'src, &'src str, Vec<(&'src str, SimpleSpan)>, extra::Err<Rich<'src, char>>> {
    let separators = any().filter(|c: &char| is_separator(*c)).repeated();
    let token = any()
        .filter(|c: &char| !is_separator(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|token: &str, e| (token, e.span()));
    separators
        .clone()
        .ignore_then(token.then_ignore(separators).repeated().collect())
        .then_ignore(end())
}
