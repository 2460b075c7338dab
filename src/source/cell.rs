//! Cell-level parsing for delimited input

/// Tokens treated as a missing value (compared case-insensitively).
///
/// The default NA set of pandas `read_csv`.
const MISSING_TOKENS: &[&str] = &[
    "#n/a", "#n/a n/a", "#na", "-1.#ind", "-1.#qnan", "-nan", "1.#ind", "1.#qnan", "<na>",
    "n/a", "na", "nan", "null", "none",
];

/// Interpretation of one raw cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Missing,
    Number(f64),
    Text,
}

impl Cell {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_missing_token(trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text,
        }
    }

    /// `Some(value)` for numbers, `Some(None)` for missing, `None` for text
    pub fn as_value(self) -> Option<Option<f64>> {
        match self {
            Cell::Missing => Some(None),
            Cell::Number(n) => Some(Some(n)),
            Cell::Text => None,
        }
    }
}

fn is_missing_token(s: &str) -> bool {
    MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(s))
}
