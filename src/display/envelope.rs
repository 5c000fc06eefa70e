//! Envelope display formatting
//!
//! Formats envelopes, transfers and ledger summaries for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Envelope, Money};
use crate::services::{LedgerSummary, TransferResult};

#[derive(Tabled)]
struct EnvelopeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Spent")]
    spent: String,
}

impl EnvelopeRow {
    fn new(envelope: &Envelope, symbol: &str) -> Self {
        Self {
            id: envelope.id.get(),
            category: envelope.category.clone(),
            budget: envelope.budget.format_with_symbol(symbol),
            balance: envelope.balance.format_with_symbol(symbol),
            spent: envelope.spent().format_with_symbol(symbol),
        }
    }
}

/// Format envelopes as a table, in the order given
pub fn format_envelope_list(envelopes: &[Envelope], symbol: &str) -> String {
    if envelopes.is_empty() {
        return "No envelopes yet.\n\nRun 'create <category> <budget>' to add one.\n".to_string();
    }

    let rows: Vec<EnvelopeRow> = envelopes
        .iter()
        .map(|e| EnvelopeRow::new(e, symbol))
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format one envelope's details
pub fn format_envelope_details(envelope: &Envelope, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Envelope: {}\n", envelope.category));
    output.push_str(&format!("  ID:      {}\n", envelope.id));
    output.push_str(&format!("  Budget:  {}\n", money(envelope.budget)));
    output.push_str(&format!("  Balance: {}\n", money(envelope.balance)));
    output.push_str(&format!("  Spent:   {}\n", money(envelope.spent())));
    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        envelope.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        envelope.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

pub fn format_transfer(result: &TransferResult, amount: Money, symbol: &str) -> String {
    format!(
        "Transferred {} from '{}' to '{}'\n  {}: {}\n  {}: {}\n",
        amount.format_with_symbol(symbol),
        result.from.category,
        result.to.category,
        result.from.category,
        result.from.balance.format_with_symbol(symbol),
        result.to.category,
        result.to.balance.format_with_symbol(symbol),
    )
}

/// Format the ledger-wide totals
pub fn format_summary(summary: &LedgerSummary, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str("Budget Summary\n");
    output.push_str(&format!("  Total budget:      {:>12}\n", money(summary.total_budget)));
    output.push_str(&format!("  Allocated:         {:>12}\n", money(summary.used_budget)));
    output.push_str(&format!("  Unallocated:       {:>12}\n", money(summary.unallocated)));
    output.push_str(&format!(
        "  Available balance: {:>12}\n",
        money(summary.total_available_balance)
    ));
    output.push_str(&format!("  Envelopes:         {:>12}\n", summary.envelope_count));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnvelopeId;

    fn envelope(id: u64, category: &str, budget: i64) -> Envelope {
        Envelope::new(EnvelopeId::new(id), category, Money::from_units(budget))
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_envelope_list(&[], "$");
        assert!(output.contains("No envelopes yet"));
    }

    #[test]
    fn test_format_envelope_list() {
        let mut rent = envelope(2, "Rent", 1000);
        rent.balance = Money::from_units(400);
        let output = format_envelope_list(&[envelope(1, "Groceries", 500), rent], "$");

        assert!(output.contains("Category"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$1000.00"));
        assert!(output.contains("$600.00"));
        assert!(output.find("Groceries").unwrap() < output.find("Rent").unwrap());
    }

    #[test]
    fn test_format_details_with_symbol() {
        let output = format_envelope_details(&envelope(3, "Travel", 250), "€");
        assert!(output.contains("Envelope: Travel"));
        assert!(output.contains("ID:      3"));
        assert!(output.contains("€250.00"));
    }

    #[test]
    fn test_overfunded_envelope_shows_zero_spent() {
        let mut rent = envelope(2, "Rent", 1000);
        rent.balance = Money::from_units(1200);
        let output = format_envelope_details(&rent, "$");

        assert!(output.contains("Balance: $1200.00"));
        assert!(output.contains("Spent:   $0.00"));
        assert!(!output.contains("-$"));
    }

    #[test]
    fn test_format_summary() {
        let summary = LedgerSummary {
            total_budget: Money::from_units(2000),
            used_budget: Money::from_units(1500),
            unallocated: Money::from_units(500),
            total_available_balance: Money::from_units(1200),
            envelope_count: 2,
        };
        let output = format_summary(&summary, "$");
        assert!(output.contains("$2000.00"));
        assert!(output.contains("$500.00"));
        assert!(output.contains("Envelopes:"));
    }

    #[test]
    fn test_format_transfer() {
        let result = TransferResult {
            from: envelope(1, "Groceries", 300),
            to: envelope(2, "Rent", 1200),
        };
        let output = format_transfer(&result, Money::from_units(200), "$");
        assert!(output.starts_with("Transferred $200.00 from 'Groceries' to 'Rent'"));
    }
}
