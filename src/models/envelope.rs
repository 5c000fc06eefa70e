//! Envelope model
//!
//! An envelope is a named slice of the total budget with its own allocation
//! ceiling (`budget`) and the funds still available inside it (`balance`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Positive integer identifier, assigned by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvelopeId(u64);

impl EnvelopeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EnvelopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EnvelopeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A budget envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: EnvelopeId,

    /// Trimmed display name, unique case-insensitively
    pub category: String,

    /// Allocation ceiling
    pub budget: Money,

    /// Funds still available; never negative, and only above `budget` after
    /// transfers in
    pub balance: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Envelope {
    /// Create a fresh envelope whose balance starts at the full budget
    pub fn new(id: EnvelopeId, category: impl Into<String>, budget: Money) -> Self {
        let now = Utc::now();
        Self {
            id,
            category: category.into(),
            budget,
            balance: budget,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount of the budget already spent; zero once transfers lift the
    /// balance to or above the budget
    pub fn spent(&self) -> Money {
        if self.balance >= self.budget {
            Money::zero()
        } else {
            self.budget - self.balance
        }
    }

    /// Whether `category` names this envelope (trimmed, case-insensitive)
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }

    /// Check the per-envelope invariants
    ///
    /// The balance may sit above the budget: transfers credit the receiving
    /// envelope in full. Only explicit balance edits are capped at the budget.
    pub fn validate(&self) -> Result<(), EnvelopeValidationError> {
        if self.category.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptyCategory);
        }
        if !self.budget.is_positive() {
            return Err(EnvelopeValidationError::NonPositiveBudget(self.budget));
        }
        if self.balance.is_negative() {
            return Err(EnvelopeValidationError::NegativeBalance(self.balance));
        }
        Ok(())
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

/// Validation errors for envelopes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeValidationError {
    #[error("Envelope category cannot be empty")]
    EmptyCategory,

    #[error("Envelope budget must be positive, got {0}")]
    NonPositiveBudget(Money),

    #[error("Envelope balance cannot be negative, got {0}")]
    NegativeBalance(Money),
}
