//! Envelope ledger
//!
//! Owns the envelope collection and the fixed total budget, and is the only
//! sanctioned mutator of envelope state. Every operation either applies in
//! full or leaves the ledger untouched.
//!
//! Invariants held after every operation:
//!
//! - the sum of envelope budgets never exceeds the total budget
//! - no balance goes below zero; explicit balance edits stay within the
//!   budget, while transfers may lift a balance above it
//! - categories are unique case-insensitively
//! - ids are never reused, even after deletion

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Envelope, EnvelopeId, Money};

/// Fields to change on an existing envelope; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeUpdate {
    pub category: Option<String>,
    pub budget: Option<Money>,
    pub balance: Option<Money>,
}

impl EnvelopeUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.budget.is_none() && self.balance.is_none()
    }
}

/// Both sides of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    pub from: Envelope,
    pub to: Envelope,
}

/// Aggregate figures across the whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub total_budget: Money,
    pub used_budget: Money,
    pub unallocated: Money,
    pub total_available_balance: Money,
    pub envelope_count: usize,
}

#[derive(Debug, Default)]
struct LedgerState {
    /// Creation order
    envelopes: Vec<Envelope>,
    /// Highest id ever assigned
    last_id: u64,
}

impl LedgerState {
    fn position(&self, id: EnvelopeId) -> Option<usize> {
        self.envelopes.iter().position(|e| e.id == id)
    }

    fn require(&self, id: EnvelopeId) -> LedgerResult<usize> {
        self.position(id)
            .ok_or_else(|| LedgerError::envelope_not_found(id))
    }

    fn used_budget(&self) -> Money {
        self.envelopes.iter().map(|e| e.budget).sum()
    }

    fn budget_excluding(&self, id: EnvelopeId) -> Money {
        self.envelopes
            .iter()
            .filter(|e| e.id != id)
            .map(|e| e.budget)
            .sum()
    }

    /// Reject `category` if an envelope other than `except` already uses it
    fn ensure_unique(&self, category: &str, except: Option<EnvelopeId>) -> LedgerResult<()> {
        let taken = self
            .envelopes
            .iter()
            .any(|e| Some(e.id) != except && e.matches_category(category));
        if taken {
            return Err(LedgerError::DuplicateCategory {
                category: category.to_string(),
            });
        }
        Ok(())
    }
}

/// In-memory envelope ledger
///
/// State sits behind a single lock: mutations hold the write lock across the
/// whole check-then-apply sequence, reads share the read lock.
#[derive(Debug)]
pub struct EnvelopeLedger {
    total_budget: Money,
    state: RwLock<LedgerState>,
}

impl EnvelopeLedger {
    /// Create an empty ledger with a fixed total budget
    pub fn new(total_budget: Money) -> LedgerResult<Self> {
        if !total_budget.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Total budget must be positive, got {}",
                total_budget
            )));
        }

        Ok(Self {
            total_budget,
            state: RwLock::new(LedgerState::default()),
        })
    }

    pub fn total_budget(&self) -> Money {
        self.total_budget
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    // === Mutations ===

    /// Create a new envelope whose balance starts at its full budget
    pub fn create(&self, category: &str, budget: Money) -> LedgerResult<Envelope> {
        rejected("create", self.create_inner(category, budget))
    }

    fn create_inner(&self, category: &str, budget: Money) -> LedgerResult<Envelope> {
        let category = validate_category(category)?;
        validate_budget(budget)?;

        let mut state = self.write()?;
        state.ensure_unique(category, None)?;
        self.ensure_within_total(state.used_budget(), budget)?;

        let id = EnvelopeId::new(state.last_id + 1);
        let envelope = Envelope::new(id, category, budget);
        state.last_id = id.get();
        state.envelopes.push(envelope.clone());

        info!(
            "Created envelope {} '{}' with budget {}",
            envelope.id, envelope.category, envelope.budget
        );
        Ok(envelope)
    }

    /// Change category, budget and/or balance of an envelope
    ///
    /// The budget is applied first and shifts the balance by the same
    /// difference. An explicit balance is applied afterwards and replaces
    /// whatever the budget change produced.
    pub fn update(&self, id: EnvelopeId, changes: EnvelopeUpdate) -> LedgerResult<Envelope> {
        rejected("update", self.update_inner(id, changes))
    }

    fn update_inner(&self, id: EnvelopeId, changes: EnvelopeUpdate) -> LedgerResult<Envelope> {
        let mut state = self.write()?;
        let index = state.require(id)?;
        let mut envelope = state.envelopes[index].clone();

        if let Some(category) = &changes.category {
            let category = validate_category(category)?;
            state.ensure_unique(category, Some(id))?;
            envelope.category = category.to_string();
        }

        if let Some(new_budget) = changes.budget {
            validate_budget(new_budget)?;
            self.ensure_within_total(state.budget_excluding(id), new_budget)?;

            if new_budget > envelope.budget {
                envelope.balance += new_budget - envelope.budget;
            } else if new_budget < envelope.budget {
                let decrease = envelope.budget - new_budget;
                if envelope.balance.is_zero() || envelope.balance < decrease {
                    return Err(LedgerError::InsufficientBalance {
                        category: envelope.category,
                        needed: decrease,
                        available: envelope.balance,
                    });
                }
                envelope.balance -= decrease;
            }
            envelope.budget = new_budget;
        }

        if let Some(balance) = changes.balance {
            if balance.is_negative() {
                return Err(LedgerError::Validation(format!(
                    "Balance cannot be negative, got {}",
                    balance
                )));
            }
            if balance > envelope.budget {
                return Err(LedgerError::Validation(format!(
                    "Balance {} cannot exceed the envelope budget {}",
                    balance, envelope.budget
                )));
            }
            envelope.balance = balance;
        }

        envelope
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        envelope.touch();
        state.envelopes[index] = envelope.clone();

        info!(
            "Updated envelope {} '{}': budget {}, balance {}",
            envelope.id, envelope.category, envelope.budget, envelope.balance
        );
        Ok(envelope)
    }

    /// Remove an envelope; returns false when no envelope has this id
    pub fn delete(&self, id: EnvelopeId) -> LedgerResult<bool> {
        let mut state = self.write()?;
        match state.position(id) {
            Some(index) => {
                let removed = state.envelopes.remove(index);
                info!("Deleted envelope {} '{}'", removed.id, removed.category);
                Ok(true)
            }
            None => {
                debug!("delete: no envelope with id {}", id);
                Ok(false)
            }
        }
    }

    /// Move balance from one envelope to another
    pub fn transfer(
        &self,
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        rejected("transfer", self.transfer_inner(from_id, to_id, amount))
    }

    fn transfer_inner(
        &self,
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        let mut state = self.write()?;
        let from_index = state.require(from_id)?;
        let to_index = state.require(to_id)?;

        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transfer amount must be positive, got {}",
                amount
            )));
        }
        if from_id == to_id {
            return Err(LedgerError::Validation(
                "Cannot transfer to the same envelope".into(),
            ));
        }

        let mut from = state.envelopes[from_index].clone();
        let mut to = state.envelopes[to_index].clone();

        if from.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                category: from.category,
                needed: amount,
                available: from.balance,
            });
        }

        from.balance -= amount;
        to.balance += amount;
        from.touch();
        to.touch();

        state.envelopes[from_index] = from.clone();
        state.envelopes[to_index] = to.clone();

        info!(
            "Transferred {} from envelope {} '{}' to envelope {} '{}'",
            amount, from.id, from.category, to.id, to.category
        );
        Ok(TransferResult { from, to })
    }

    // === Queries ===

    /// Snapshot of one envelope
    pub fn get(&self, id: EnvelopeId) -> LedgerResult<Envelope> {
        let state = self.read()?;
        let index = state.require(id)?;
        Ok(state.envelopes[index].clone())
    }

    /// Snapshot of all envelopes in creation order
    pub fn list(&self) -> LedgerResult<Vec<Envelope>> {
        Ok(self.read()?.envelopes.clone())
    }

    /// Find an envelope by category name or id string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Envelope>> {
        let state = self.read()?;

        // Try by category first
        if let Some(envelope) = state.envelopes.iter().find(|e| e.matches_category(identifier)) {
            return Ok(Some(envelope.clone()));
        }

        // Then as an id
        if let Ok(id) = identifier.parse::<EnvelopeId>() {
            return Ok(state.position(id).map(|i| state.envelopes[i].clone()));
        }

        Ok(None)
    }

    /// Sum of all envelope budgets
    pub fn used_budget(&self) -> LedgerResult<Money> {
        Ok(self.read()?.used_budget())
    }

    /// Sum of all envelope balances
    pub fn total_available_balance(&self) -> LedgerResult<Money> {
        Ok(self.read()?.envelopes.iter().map(|e| e.balance).sum())
    }

    pub fn summary(&self) -> LedgerResult<LedgerSummary> {
        let state = self.read()?;
        let used_budget = state.used_budget();
        Ok(LedgerSummary {
            total_budget: self.total_budget,
            used_budget,
            unallocated: self.total_budget - used_budget,
            total_available_balance: state.envelopes.iter().map(|e| e.balance).sum(),
            envelope_count: state.envelopes.len(),
        })
    }

    fn ensure_within_total(&self, allocated: Money, requested: Money) -> LedgerResult<()> {
        let fits = allocated
            .checked_add(requested)
            .map_or(false, |sum| sum <= self.total_budget);
        if !fits {
            return Err(LedgerError::BudgetExceeded {
                requested,
                available: self.total_budget - allocated,
                total: self.total_budget,
            });
        }
        Ok(())
    }
}

fn validate_category(category: &str) -> LedgerResult<&str> {
    let category = category.trim();
    if category.is_empty() {
        return Err(LedgerError::Validation(
            "Envelope category cannot be empty".into(),
        ));
    }
    Ok(category)
}

fn validate_budget(budget: Money) -> LedgerResult<()> {
    if !budget.is_positive() {
        return Err(LedgerError::Validation(format!(
            "Envelope budget must be positive, got {}",
            budget
        )));
    }
    Ok(())
}

fn rejected<T>(operation: &str, result: LedgerResult<T>) -> LedgerResult<T> {
    if let Err(err) = &result {
        debug!("{} rejected: {}", operation, err);
    }
    result
}
