//! Tax models.
//!
//! This module defines filing statuses, marginal tax brackets and the
//! [`TaxEstimate`] produced from a gross pay figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Federal filing status, selecting which bracket schedule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married couple filing a joint return.
    MarriedFilingJointly,
    /// Head of household.
    HeadOfHousehold,
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::Single => write!(f, "single"),
            FilingStatus::MarriedFilingJointly => write!(f, "married_filing_jointly"),
            FilingStatus::HeadOfHousehold => write!(f, "head_of_household"),
        }
    }
}

/// One marginal bracket: income in `(lower, upper]` is taxed at `rate`.
///
/// `upper` of `None` means the bracket is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income at which the bracket starts.
    pub lower: Decimal,
    /// Income at which the bracket ends, `None` for the top bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Marginal rate as a fraction (0.22 for 22%).
    pub rate: Decimal,
}

/// An ordered, gap-free sequence of marginal brackets.
///
/// Construction checks that brackets are contiguous, that each bracket is
/// non-empty, that rates lie in `0..=1` and that only the last bracket is
/// unbounded.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::models::{TaxBracket, TaxBracketSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = TaxBracketSchedule::new(vec![
///     TaxBracket { lower: Decimal::ZERO, upper: Some(Decimal::from(10_000)), rate: Decimal::new(10, 2) },
///     TaxBracket { lower: Decimal::from(10_000), upper: None, rate: Decimal::new(20, 2) },
/// ]);
/// assert!(schedule.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxBracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketSchedule {
    /// Builds a schedule, rejecting gaps, overlaps and a bounded top bracket.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidBracketSchedule {
                message: "schedule has no brackets".to_string(),
            });
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.lower < Decimal::ZERO {
                return Err(EngineError::InvalidBracketSchedule {
                    message: format!("bracket {} has a negative lower bound", index),
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidBracketSchedule {
                    message: format!("bracket {} rate {} is outside 0..=1", index, bracket.rate),
                });
            }
            if let Some(upper) = bracket.upper {
                if upper <= bracket.lower {
                    return Err(EngineError::InvalidBracketSchedule {
                        message: format!(
                            "bracket {} upper bound {} is not above lower bound {}",
                            index, upper, bracket.lower
                        ),
                    });
                }
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            match pair[0].upper {
                Some(upper) if upper == pair[1].lower => {}
                Some(upper) => {
                    return Err(EngineError::InvalidBracketSchedule {
                        message: format!(
                            "bracket {} ends at {} but bracket {} starts at {}",
                            index,
                            upper,
                            index + 1,
                            pair[1].lower
                        ),
                    });
                }
                None => {
                    return Err(EngineError::InvalidBracketSchedule {
                        message: format!("bracket {} is unbounded but is not the last", index),
                    });
                }
            }
        }

        if brackets.last().is_some_and(|b| b.upper.is_some()) {
            return Err(EngineError::InvalidBracketSchedule {
                message: "top bracket must be unbounded".to_string(),
            });
        }

        Ok(Self { brackets })
    }

    /// The brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxBracketSchedule {
    type Error = EngineError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxBracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: TaxBracketSchedule) -> Self {
        schedule.brackets
    }
}

/// Estimated tax liability and net pay for a gross amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEstimate {
    /// Pre-tax earnings the estimate was computed on.
    pub gross_income: Decimal,
    /// Federal tax (bracketed or flat).
    pub federal_tax: Decimal,
    /// State tax.
    pub state_tax: Decimal,
    /// `federal_tax + state_tax`.
    pub total_tax: Decimal,
    /// `gross_income - total_tax`.
    pub net_pay: Decimal,
}
