//! Position expressions: period names, decimal literals and `+ - * / ( )`.
//!
//! Evaluation is total. Anything that fails to reduce to a finite number
//! evaluates to `0.0`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use crate::ir::TimePeriod;

// Parenthesis nesting accepted before evaluation gives up.
const MAX_DEPTH: usize = 256;

static PLAIN_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("trailing input at position {0}")]
    TrailingInput(usize),
    #[error("expression evaluated to a non-finite value")]
    NonFinite,
    #[error("parentheses nested too deeply")]
    TooDeep,
}

/// Case-insensitive lookup from period names to timeline indices.
#[derive(Debug, Clone)]
pub struct PeriodIndex {
    indices: HashMap<String, f64>,
    names: Option<Regex>,
}

impl PeriodIndex {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut indices = HashMap::new();
        for (name, index) in entries {
            let key = normalize_name(name.as_ref());
            if key.is_empty() {
                continue;
            }
            indices.entry(key).or_insert(index as f64);
        }

        let names = name_pattern(indices.keys()).and_then(|pattern| Regex::new(&pattern).ok());
        Self { indices, names }
    }

    /// Every period is reachable by both its id and its label.
    pub fn from_periods(periods: &[TimePeriod]) -> Self {
        Self::new(periods.iter().flat_map(|period| {
            [
                (period.id.as_str(), period.index),
                (period.label.as_str(), period.index),
            ]
        }))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.indices.get(&normalize_name(name)).copied()
    }

    fn substitute(&self, expr: &str) -> String {
        let Some(names) = &self.names else {
            return expr.to_string();
        };
        names
            .replace_all(expr, |caps: &regex::Captures| {
                self.get(&caps[0])
                    .map(format_index)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Longest names first so the leftmost-first alternation never lets a short
/// name eat the prefix of a longer one.
fn name_pattern<'a>(names: impl Iterator<Item = &'a String>) -> Option<String> {
    let mut names: Vec<&String> = names.collect();
    if names.is_empty() {
        return None;
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!("(?i){alternation}"))
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn format_index(value: f64) -> String {
    // Parenthesised so a substituted index never merges with an adjacent
    // digit or decimal point.
    format!("({value})")
}

/// Resolves an expression to a timeline index. Never fails.
pub fn evaluate(expr: &str, periods: &PeriodIndex) -> f64 {
    let expr = expr.trim();
    if expr.is_empty() {
        return 0.0;
    }
    if PLAIN_NUMBER_RE.is_match(expr) {
        return match expr.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::debug!(expr, "number literal out of range, using 0");
                0.0
            }
        };
    }

    let substituted = periods.substitute(expr);
    let sanitized: String = substituted
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect();
    if sanitized.is_empty() {
        tracing::debug!(expr, "expression reduced to nothing, using 0");
        return 0.0;
    }

    match try_evaluate_arithmetic(&sanitized) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(expr, sanitized = %sanitized, error = %err, "expression fallback to 0");
            0.0
        }
    }
}

/// Evaluates a pure arithmetic string with standard precedence.
pub fn try_evaluate_arithmetic(input: &str) -> Result<f64, ExprError> {
    let mut parser = Arithmetic {
        chars: input.chars().filter(|ch| !ch.is_whitespace()).collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if parser.pos < parser.chars.len() {
        return Err(ExprError::TrailingInput(parser.pos));
    }
    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

struct Arithmetic {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Arithmetic {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == '+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == '*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    // factor := ('+' | '-')* ('(' expression ')' | number)
    fn factor(&mut self) -> Result<f64, ExprError> {
        let mut negate = false;
        while let Some(sign @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            if sign == '-' {
                negate = !negate;
            }
        }

        let value = match self.peek() {
            None => return Err(ExprError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                self.group()?
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number()?,
            Some(ch) => return Err(ExprError::UnexpectedChar { ch, pos: self.pos }),
        };
        Ok(if negate { -value } else { value })
    }

    fn group(&mut self) -> Result<f64, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let value = self.expression()?;
        self.depth -= 1;
        match self.peek() {
            Some(')') => {
                self.pos += 1;
                Ok(value)
            }
            Some(ch) => Err(ExprError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, ExprError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| ExprError::InvalidNumber(literal))
    }
}
