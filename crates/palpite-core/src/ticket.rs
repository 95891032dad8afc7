//! Ticket generation and canonical display formatting.
//!
//! A ticket is a duplicate-free set of integers drawn uniformly from
//! `[1, max_number]`, rendered as zero-padded two-digit tokens and joined
//! with the clover separator. Generation uses rejection sampling: draw,
//! discard duplicates, repeat until the requested count of distinct values
//! is reached. The draw count is validated up front so a degenerate request
//! fails fast instead of sampling forever.
//!
//! # Display rules
//!
//! - Every value renders as two zero-padded decimal digits (`3` -> `"03"`).
//! - In the 100-number game the value 100 renders as the literal `"00"`.
//! - Tokens are ordered ascending by value, except `"00"` which always
//!   moves to the end of the sequence.

use std::collections::BTreeSet;

use rand::Rng;
use thiserror::Error;

/// Separator between display tokens in a formatted ticket.
pub const SEPARATOR: &str = " 🍀 ";

/// Errors from ticket generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// The request asked for zero numbers.
    #[error("draw count must be at least 1")]
    EmptyDraw,

    /// More distinct numbers were requested than the range contains.
    /// Left unchecked this request would sample forever.
    #[error("cannot draw {count} distinct numbers from 1..={max_number}")]
    CountExceedsRange {
        /// The requested draw count.
        count: u32,
        /// Inclusive upper bound of the draw range.
        max_number: u32,
    },
}

/// One generated lottery combination.
///
/// Values and display tokens share the same final ordering: ascending,
/// with the `"00"` token (value 100 in the 100-number game) last.
/// Tickets are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    values: Vec<u32>,
    tokens: Vec<String>,
}

impl Ticket {
    /// The drawn values in display order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// The display tokens in display order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of drawn values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the ticket holds no values. Cannot occur for tickets
    /// produced by [`generate`], which rejects empty draws.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical display string: tokens joined with [`SEPARATOR`].
    #[must_use]
    pub fn formatted(&self) -> String {
        self.tokens.join(SEPARATOR)
    }
}

/// Draws `count` distinct numbers from `[1, max_number]` using the
/// process-wide RNG.
///
/// # Errors
///
/// Returns [`TicketError::EmptyDraw`] for a zero count and
/// [`TicketError::CountExceedsRange`] when `count > max_number`.
pub fn generate(count: u32, max_number: u32) -> Result<Ticket, TicketError> {
    generate_with(&mut rand::rng(), count, max_number)
}

/// Draws `count` distinct numbers from `[1, max_number]` using the provided
/// RNG. Seam for deterministic tests; semantics match [`generate`].
///
/// # Errors
///
/// Same contract as [`generate`].
pub fn generate_with<R: Rng>(
    rng: &mut R,
    count: u32,
    max_number: u32,
) -> Result<Ticket, TicketError> {
    if count == 0 {
        return Err(TicketError::EmptyDraw);
    }
    if count > max_number {
        return Err(TicketError::CountExceedsRange { count, max_number });
    }

    let mut chosen: BTreeSet<u32> = BTreeSet::new();
    while chosen.len() < count as usize {
        chosen.insert(rng.random_range(1..=max_number));
    }

    // BTreeSet iteration is already ascending by value.
    let mut values: Vec<u32> = chosen.into_iter().collect();
    let mut tokens: Vec<String> = values
        .iter()
        .map(|&value| display_token(value, max_number))
        .collect();

    // The "00" token sorts first numerically (value 100 sorts last) but the
    // convention for the 100-number game puts it at the end of the sequence.
    // Relocation after the ascending sort keeps both orders consistent.
    if let Some(position) = tokens.iter().position(|token| token == "00") {
        let token = tokens.remove(position);
        tokens.push(token);
        let value = values.remove(position);
        values.push(value);
    }

    Ok(Ticket { values, tokens })
}

/// Renders one drawn value as its display token.
///
/// Zero-padded two-digit decimal, except the value 100 in the 100-number
/// game which renders as `"00"`. The rule is deliberately not generalized
/// beyond `max_number == 100`.
#[must_use]
pub fn display_token(value: u32, max_number: u32) -> String {
    if max_number == 100 && value == 100 {
        "00".to_string()
    } else {
        format!("{value:02}")
    }
}

/// Splits a formatted ticket string back into its display tokens.
///
/// Inverse of [`Ticket::formatted`]: splitting on [`SEPARATOR`] and
/// trimming whitespace recovers the original ordered tokens.
#[must_use]
pub fn split_formatted(formatted: &str) -> Vec<String> {
    if formatted.is_empty() {
        return Vec::new();
    }
    formatted
        .split(SEPARATOR)
        .map(|part| part.trim().to_string())
        .collect()
}
