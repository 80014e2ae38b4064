//! Rupiah amount parsing and formatting.
//!
//! # Responsibility
//! - Extract an integer budget from free-form input text.
//! - Render amounts with `id-ID` thousands grouping.
//!
//! # Invariants
//! - Only ASCII digits are significant when parsing.
//! - `parse_budget(&format_budget_input(x)) == Ok(x)` for every `x`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]+").expect("valid non-digit regex"));

/// Currency prefix used by the budget input field.
pub const BUDGET_INPUT_PREFIX: &str = "Rp ";
/// Currency prefix used by `Intl` rupiah formatting (non-breaking space).
pub const CURRENCY_PREFIX: &str = "Rp\u{a0}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetParseError {
    /// Digit run does not fit in `u64`.
    Overflow(String),
}

impl Display for BudgetParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overflow(digits) => write!(f, "budget `{digits}` exceeds supported range"),
        }
    }
}

impl Error for BudgetParseError {}

/// Parses budget text by dropping every non-digit character.
///
/// Input without any digit yields `0`; this is a permissive policy, not an
/// error.
pub fn parse_budget(raw: &str) -> Result<u64, BudgetParseError> {
    let digits = NON_DIGIT_RE.replace_all(raw, "");
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<u64>()
        .map_err(|_| BudgetParseError::Overflow(digits.into_owned()))
}

/// Formats an amount the way the budget input shows it: `Rp 1.500.000`.
pub fn format_budget_input(amount: u64) -> String {
    format!("{BUDGET_INPUT_PREFIX}{}", group_thousands(amount))
}

/// Formats an amount as rupiah currency without fraction digits.
pub fn format_currency(amount: u64) -> String {
    format!("{CURRENCY_PREFIX}{}", group_thousands(amount))
}

/// Groups digits by three with `.` separators.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
