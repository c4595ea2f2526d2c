//! Characteristic point budget: the fairness check on animal species.
//!
//! Validation runs in two passes:
//!
//! 1. [`tally`] -- fatal. Every category must be declared and the summed
//!    point cost must not exceed the global budget.
//! 2. [`collect_warnings`] -- advisory. Flags points that buy nothing
//!    (unspent budget, points past a category cap, empty categories). It
//!    never changes whether the species is valid.
//!
//! The carnivore multiplier is applied to attack/defend values after the
//! tally, so it changes gameplay power but not the fairness accounting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::characteristics::{Characteristic, CharacteristicRules};
use crate::error::SpeciesError;

/// Result of a successful budget tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetTally {
    raw: BTreeMap<Characteristic, u32>,
    spent: u32,
    budget: u32,
}

impl BudgetTally {
    /// Raw points declared for `characteristic`.
    pub fn raw(&self, characteristic: Characteristic) -> u32 {
        self.raw.get(&characteristic).copied().unwrap_or(0)
    }

    /// Total point cost of the declaration.
    pub const fn spent(&self) -> u32 {
        self.spent
    }

    /// The budget the declaration was checked against.
    pub const fn budget(&self) -> u32 {
        self.budget
    }

    /// Points left unallocated.
    pub const fn remaining(&self) -> u32 {
        self.budget.saturating_sub(self.spent)
    }
}

/// A non-fatal observation about a species' point allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetWarning {
    /// The category concerned, or `None` for the budget as a whole.
    pub characteristic: Option<Characteristic>,
    /// Human-readable description.
    pub message: String,
}

impl core::fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.characteristic {
            Some(characteristic) => write!(f, "{characteristic}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Sum the point cost of `declared` and check it against `budget`.
///
/// # Errors
///
/// - [`SpeciesError::MissingCharacteristic`] if any category is absent.
/// - [`SpeciesError::PointOverflow`] if a cost does not fit in `u32`.
/// - [`SpeciesError::BudgetExceeded`] if the total exceeds `budget`.
pub fn tally(
    species: &str,
    declared: &BTreeMap<Characteristic, u32>,
    rules: &CharacteristicRules,
    budget: u32,
) -> Result<BudgetTally, SpeciesError> {
    let mut raw = BTreeMap::new();
    let mut spent: u32 = 0;

    for characteristic in Characteristic::ALL {
        let points = *declared
            .get(&characteristic)
            .ok_or_else(|| SpeciesError::MissingCharacteristic {
                species: species.to_owned(),
                characteristic,
            })?;

        let overflow = || SpeciesError::PointOverflow {
            species: species.to_owned(),
            characteristic,
        };
        let cost = points
            .checked_mul(rules.rule(characteristic).cost_per_point)
            .ok_or_else(overflow)?;
        spent = spent.checked_add(cost).ok_or_else(overflow)?;
        raw.insert(characteristic, points);
    }

    if spent > budget {
        return Err(SpeciesError::BudgetExceeded {
            species: species.to_owned(),
            spent,
            budget,
        });
    }

    Ok(BudgetTally { raw, spent, budget })
}

/// Collect advisory warnings for an accepted tally.
pub fn collect_warnings(tally: &BudgetTally, rules: &CharacteristicRules) -> Vec<BudgetWarning> {
    let mut warnings = Vec::new();

    for characteristic in Characteristic::ALL {
        let rule = rules.rule(characteristic);
        let raw = tally.raw(characteristic);

        if raw == 0 {
            warnings.push(BudgetWarning {
                characteristic: Some(characteristic),
                message: format!("no points allocated; base value {} applies", rule.base),
            });
            continue;
        }

        if let Some(useful) = rule.useful_points()
            && raw > useful
        {
            let wasted = raw.saturating_sub(useful);
            warnings.push(BudgetWarning {
                characteristic: Some(characteristic),
                message: format!(
                    "{wasted} points wasted: value is capped at {}",
                    rule.cap.unwrap_or(rule.base)
                ),
            });
        }
    }

    let remaining = tally.remaining();
    if remaining > 0 {
        warnings.push(BudgetWarning {
            characteristic: None,
            message: format!("{remaining} points wasted: budget not fully allocated"),
        });
    }

    warnings
}
