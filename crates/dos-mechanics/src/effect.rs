//! Secondary effect rolls (damage and similar dice expressions).
//!
//! A formula is a signed sum of dice terms and flat numbers, such as
//! `2d6+3` or `1d8+1d4-1`. A critical success doubles the number of dice
//! in every dice term before rolling; flat numbers are unchanged.

use logos::Logos;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Die, RollResult};
use crate::error::{EngineError, EngineResult};

/// Most dice a single term may roll.
pub const MAX_TERM_DICE: u32 = 1000;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum FormulaToken {
    #[regex("[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Number(u32),

    #[regex("[dD]")]
    D,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,
}

/// One signed term of a dice formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// `count` dice of one type, added or subtracted.
    Dice {
        /// Number of dice rolled.
        count: u32,
        /// Die type.
        die: Die,
        /// Subtract the dice total instead of adding it.
        negative: bool,
    },
    /// A flat number.
    Flat(i32),
}

/// A parsed dice formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    terms: Vec<Term>,
}

impl DiceFormula {
    /// Parse a formula such as `2d6+3`. Whitespace is ignored.
    pub fn parse(source: &str) -> EngineResult<Self> {
        let mut lexer = FormulaToken::lexer(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            let token = token.map_err(|()| {
                EngineError::InvalidFormula(format!(
                    "unexpected '{}' in '{source}'",
                    lexer.slice()
                ))
            })?;
            tokens.push(token);
        }
        if tokens.is_empty() {
            return Err(EngineError::InvalidFormula("empty formula".to_string()));
        }

        let mut terms = Vec::new();
        let mut iter = tokens.into_iter().peekable();
        let mut negative = false;
        if let Some(sign @ (FormulaToken::Plus | FormulaToken::Minus)) = iter.peek().copied() {
            negative = sign == FormulaToken::Minus;
            iter.next();
        }

        loop {
            let term = match iter.next() {
                Some(FormulaToken::Number(n)) => {
                    if iter.peek() == Some(&FormulaToken::D) {
                        iter.next();
                        dice_term(n, iter.next(), negative, source)?
                    } else {
                        let value = i32::try_from(n).map_err(|_| {
                            EngineError::InvalidFormula(format!("{n} is too large"))
                        })?;
                        Term::Flat(if negative { -value } else { value })
                    }
                }
                Some(FormulaToken::D) => dice_term(1, iter.next(), negative, source)?,
                other => return Err(unexpected(other, source)),
            };
            terms.push(term);

            match iter.next() {
                None => break,
                Some(FormulaToken::Plus) => negative = false,
                Some(FormulaToken::Minus) => negative = true,
                other => return Err(unexpected(other, source)),
            }
        }

        Ok(Self { terms })
    }

    /// The parsed terms, in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The same formula with every dice count doubled.
    pub fn doubled(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|term| match *term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => Term::Dice {
                    count: count.saturating_mul(2),
                    die,
                    negative,
                },
                flat @ Term::Flat(_) => flat,
            })
            .collect();
        Self { terms }
    }

    /// Roll every term and sum the signed results.
    pub fn roll(&self, rng: &mut StdRng) -> (RollResult, i64) {
        let mut roll = RollResult::default();
        let mut total: i64 = 0;
        for term in &self.terms {
            match *term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => {
                    let part = DicePool::new().add(die, count).roll(rng);
                    let sum: i64 = part.kept().map(|d| i64::from(d.value)).sum();
                    total = total.saturating_add(if negative { -sum } else { sum });
                    roll.extend(part);
                }
                Term::Flat(value) => total = total.saturating_add(i64::from(value)),
            }
        }
        (roll, total)
    }
}

impl std::str::FromStr for DiceFormula {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            let (negative, body) = match *term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => (negative, format!("{count}{die}")),
                Term::Flat(value) => (value < 0, value.unsigned_abs().to_string()),
            };
            match (i, negative) {
                (_, true) => write!(f, "-")?,
                (0, false) => {}
                (_, false) => write!(f, "+")?,
            }
            write!(f, "{body}")?;
        }
        Ok(())
    }
}

fn dice_term(
    count: u32,
    sides: Option<FormulaToken>,
    negative: bool,
    source: &str,
) -> EngineResult<Term> {
    let Some(FormulaToken::Number(sides)) = sides else {
        return Err(unexpected(sides, source));
    };
    let die = Die::from_sides(sides).ok_or_else(|| {
        EngineError::InvalidFormula(format!("d{sides} needs at least two sides"))
    })?;
    if count == 0 {
        return Err(EngineError::InvalidFormula(format!("0{die} rolls no dice")));
    }
    if count > MAX_TERM_DICE {
        return Err(EngineError::InvalidFormula(format!(
            "{count}{die} exceeds {MAX_TERM_DICE} dice"
        )));
    }
    Ok(Term::Dice {
        count,
        die,
        negative,
    })
}

fn unexpected(token: Option<FormulaToken>, source: &str) -> EngineError {
    match token {
        Some(token) => EngineError::InvalidFormula(format!("unexpected {token:?} in '{source}'")),
        None => EngineError::InvalidFormula(format!("'{source}' ends unexpectedly")),
    }
}

/// The result of rolling an effect formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRoll {
    /// The formula actually rolled (already doubled on a critical).
    pub formula: String,
    /// Whether the dice were doubled for a critical success.
    pub critical: bool,
    /// Every die rolled.
    pub roll: RollResult,
    /// Signed total of all terms.
    pub total: i64,
}

/// Roll an effect formula, doubling its dice when `critical` is set.
pub fn roll_effect(formula: &DiceFormula, critical: bool, rng: &mut StdRng) -> EffectRoll {
    let rolled = if critical {
        formula.doubled()
    } else {
        formula.clone()
    };
    let (roll, total) = rolled.roll(rng);
    tracing::debug!(formula = %rolled, critical, total, "rolled effect");
    EffectRoll {
        formula: rolled.to_string(),
        critical,
        roll,
        total,
    }
}
