use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Dice;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("invalid roll formula: {0}")]
    Invalid(String),
    #[error("roll formula has more than one die term: {0}")]
    MultipleDieTerms(String),
    #[error("invalid die size in formula: {0}")]
    InvalidFaces(String),
}

/// Parsed `NdF(+/-M)` regeneration formula. The dialog fields carry at
/// most one die term plus flat modifiers, e.g. "1d6", "1d6+2", or — after
/// the formula-layer override ran — "4+2".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollFormula {
    pub count: i32,
    pub faces: i32,
    pub modifier: i32,
    pub original: String,
}

impl RollFormula {
    pub fn parse(notation: &str) -> Result<Self, FormulaError> {
        let trimmed = notation.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(FormulaError::Invalid(notation.to_string()));
        }

        let mut count = 0;
        let mut faces = 0;
        let mut modifier = 0;
        for (token, sign) in tokens(&trimmed) {
            if let Some(d_pos) = token.find('d') {
                if faces != 0 {
                    return Err(FormulaError::MultipleDieTerms(notation.to_string()));
                }
                if sign < 0 {
                    return Err(FormulaError::Invalid(notation.to_string()));
                }
                let count_str = &token[..d_pos];
                count = if count_str.is_empty() {
                    1
                } else {
                    count_str
                        .parse()
                        .map_err(|_| FormulaError::Invalid(notation.to_string()))?
                };
                faces = token[d_pos + 1..]
                    .parse()
                    .map_err(|_| FormulaError::Invalid(notation.to_string()))?;
                if faces < 2 {
                    return Err(FormulaError::InvalidFaces(notation.to_string()));
                }
            } else {
                let value: i32 = token
                    .parse()
                    .map_err(|_| FormulaError::Invalid(notation.to_string()))?;
                modifier += sign * value;
            }
        }

        Ok(Self {
            count,
            faces,
            modifier,
            original: trimmed,
        })
    }

    pub fn has_dice(&self) -> bool {
        self.count > 0 && self.faces > 0
    }

    pub fn to_term(&self) -> DieTerm {
        DieTerm {
            count: self.count,
            faces: self.faces,
            results: Vec::new(),
            evaluated: false,
        }
    }
}

/// Split a formula into `+`/`-` separated tokens with their signs.
fn tokens(formula: &str) -> Vec<(String, i32)> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut sign = 1;
    for ch in formula.chars() {
        match ch {
            '+' | '-' => {
                if !current.is_empty() {
                    out.push((current.clone(), sign));
                    current.clear();
                }
                sign = if ch == '+' { 1 } else { -1 };
            }
            c if c.is_whitespace() => {}
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push((current, sign));
    }
    out
}

/// Textual check for a single-d6 term, the shape the regeneration fields
/// use across host versions.
pub fn formula_mentions_d6(formula: &str) -> bool {
    tokens(&formula.to_lowercase())
        .iter()
        .any(|(token, _)| token == "1d6")
}

/// Replace each `1d6` token with a fixed value, leaving the rest of the
/// formula untouched ("1d6+2" -> "4+2").
pub fn rewrite_d6(formula: &str, fixed: i32) -> String {
    let lowered = formula.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut current = String::new();
    for ch in lowered.chars() {
        match ch {
            '+' | '-' => {
                push_token(&mut out, &current, fixed);
                current.clear();
                out.push(ch);
            }
            c if c.is_whitespace() => {}
            c => current.push(c),
        }
    }
    push_token(&mut out, &current, fixed);
    out
}

fn push_token(out: &mut String, token: &str, fixed: i32) {
    if token == "1d6" {
        out.push_str(&fixed.to_string());
    } else {
        out.push_str(token);
    }
}

/// One die term mid-evaluation. This is the structural shape downstream
/// host logic consumes: a results list of the correct length and the
/// `evaluated` flag, regardless of whether the values came from randomness
/// or from an override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieTerm {
    pub count: i32,
    pub faces: i32,
    pub results: Vec<i32>,
    pub evaluated: bool,
}

impl DieTerm {
    /// The host's normal random path. Evaluating an already-evaluated term
    /// keeps the cached results, as the host does.
    pub fn roll_random(&mut self, dice: &mut Dice) {
        if self.evaluated {
            return;
        }
        self.results = (0..self.count.max(0)).map(|_| dice.roll(self.faces)).collect();
        self.evaluated = true;
    }

    pub fn total(&self) -> i32 {
        self.results.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_d6() {
        let f = RollFormula::parse("1d6").unwrap();
        assert_eq!((f.count, f.faces, f.modifier), (1, 6, 0));
    }

    #[test]
    fn parses_modifiers_and_bare_constants() {
        let f = RollFormula::parse("1d6+2").unwrap();
        assert_eq!((f.count, f.faces, f.modifier), (1, 6, 2));

        let f = RollFormula::parse("4+2").unwrap();
        assert!(!f.has_dice());
        assert_eq!(f.modifier, 6);

        let f = RollFormula::parse("2 - 1").unwrap();
        assert_eq!(f.modifier, 1);
    }

    #[test]
    fn rejects_garbage_and_double_dice() {
        assert!(RollFormula::parse("").is_err());
        assert!(RollFormula::parse("xd6").is_err());
        assert!(matches!(
            RollFormula::parse("1d6+1d6"),
            Err(FormulaError::MultipleDieTerms(_))
        ));
        assert!(matches!(
            RollFormula::parse("1d1"),
            Err(FormulaError::InvalidFaces(_))
        ));
    }

    #[test]
    fn rewrite_replaces_only_single_d6_tokens() {
        assert_eq!(rewrite_d6("1d6", 4), "4");
        assert_eq!(rewrite_d6("1d6+2", 4), "4+2");
        assert_eq!(rewrite_d6("2+1d6", 4), "2+4");
        assert_eq!(rewrite_d6("2d6", 4), "2d6");
        assert_eq!(rewrite_d6("1d20", 4), "1d20");
    }

    #[test]
    fn d6_mention_matches_rewrite_eligibility() {
        assert!(formula_mentions_d6("1d6+3"));
        assert!(!formula_mentions_d6("2d6"));
        assert!(!formula_mentions_d6("4+2"));
    }
}
