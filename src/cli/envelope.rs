//! Envelope commands
//!
//! Implements the commands available inside a ledger session, bridging clap
//! argument parsing with the envelope ledger.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_envelope_details, format_envelope_list, format_summary, format_transfer};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Envelope, Money};
use crate::services::{EnvelopeLedger, EnvelopeUpdate};

/// Commands accepted by a ledger session
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeCommands {
    /// Create a new envelope funded with its full budget
    Create {
        /// Category name
        category: String,
        /// Budget amount (e.g., "500" or "500.00")
        budget: String,
    },

    /// List all envelopes
    #[command(alias = "ls")]
    List,

    /// Show envelope details
    Show {
        /// Envelope category or ID
        envelope: String,
    },

    /// Edit an envelope
    Update {
        /// Envelope category or ID
        envelope: String,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New budget; the balance moves by the same difference
        #[arg(short, long)]
        budget: Option<String>,
        /// Set the balance directly (applied after --budget)
        #[arg(long)]
        balance: Option<String>,
    },

    /// Delete an envelope
    #[command(alias = "rm")]
    Delete {
        /// Envelope category or ID
        envelope: String,
    },

    /// Move balance from one envelope to another
    Transfer {
        /// Source envelope category or ID
        from: String,
        /// Destination envelope category or ID
        to: String,
        /// Amount to move
        amount: String,
    },

    /// Show budget totals
    Summary,

    /// End the session
    #[command(alias = "quit")]
    Exit,
}

/// Run one command and return the text to print
pub fn handle_envelope_command(
    ledger: &EnvelopeLedger,
    settings: &Settings,
    cmd: EnvelopeCommands,
) -> LedgerResult<String> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EnvelopeCommands::Create { category, budget } => {
            let budget = parse_amount(&budget, "budget")?;
            let envelope = ledger.create(&category, budget)?;
            Ok(format!(
                "Created envelope: {}\n  ID: {}\n  Budget: {}\n",
                envelope.category,
                envelope.id,
                settings.format_money(envelope.budget)
            ))
        }

        EnvelopeCommands::List => Ok(format_envelope_list(&ledger.list()?, symbol)),

        EnvelopeCommands::Show { envelope } => {
            let env = resolve(ledger, &envelope)?;
            Ok(format_envelope_details(&env, symbol))
        }

        EnvelopeCommands::Update {
            envelope,
            category,
            budget,
            balance,
        } => {
            let env = resolve(ledger, &envelope)?;

            let changes = EnvelopeUpdate {
                category,
                budget: budget.map(|b| parse_amount(&b, "budget")).transpose()?,
                balance: balance.map(|b| parse_amount(&b, "balance")).transpose()?,
            };
            if changes.is_empty() {
                return Ok(
                    "No changes specified. Use --category, --budget, or --balance.\n".to_string(),
                );
            }

            let updated = ledger.update(env.id, changes)?;
            Ok(format!(
                "Updated envelope: {}\n  Budget: {}\n  Balance: {}\n",
                updated.category,
                settings.format_money(updated.budget),
                settings.format_money(updated.balance)
            ))
        }

        EnvelopeCommands::Delete { envelope } => {
            let env = resolve(ledger, &envelope)?;
            if !ledger.delete(env.id)? {
                return Err(LedgerError::envelope_not_found(env.id));
            }
            Ok(format!("Deleted envelope: {}\n", env.category))
        }

        EnvelopeCommands::Transfer { from, to, amount } => {
            let from = resolve(ledger, &from)?;
            let to = resolve(ledger, &to)?;
            let amount = parse_amount(&amount, "amount")?;

            let result = ledger.transfer(from.id, to.id, amount)?;
            Ok(format_transfer(&result, amount, symbol))
        }

        EnvelopeCommands::Summary => Ok(format_summary(&ledger.summary()?, symbol)),

        EnvelopeCommands::Exit => Ok(String::new()),
    }
}

fn resolve(ledger: &EnvelopeLedger, identifier: &str) -> LedgerResult<Envelope> {
    ledger
        .find(identifier)?
        .ok_or_else(|| LedgerError::identifier_not_found(identifier))
}

/// Parse a `--total-budget` override, which must be positive
pub fn parse_total_budget(input: &str) -> LedgerResult<Money> {
    let total = parse_amount(input, "total budget")?;
    if !total.is_positive() {
        return Err(LedgerError::Config(format!(
            "Total budget must be positive, got {}",
            total
        )));
    }
    Ok(total)
}

pub(crate) fn parse_amount(input: &str, field: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid {} '{}'. Use a format like '100.00' or '100'. Error: {}",
            field, input, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EnvelopeLedger, Settings) {
        let settings = Settings::default();
        let ledger = EnvelopeLedger::new(settings.total_budget).unwrap();
        (ledger, settings)
    }

    fn create(ledger: &EnvelopeLedger, settings: &Settings, category: &str, budget: &str) {
        let cmd = EnvelopeCommands::Create {
            category: category.into(),
            budget: budget.into(),
        };
        handle_envelope_command(ledger, settings, cmd).unwrap();
    }

    #[test]
    fn test_create_and_show_by_name() {
        let (ledger, settings) = setup();
        create(&ledger, &settings, "Groceries", "500");

        let output = handle_envelope_command(
            &ledger,
            &settings,
            EnvelopeCommands::Show {
                envelope: "groceries".into(),
            },
        )
        .unwrap();
        assert!(output.contains("Balance: $500.00"));
    }

    #[test]
    fn test_transfer_by_name_and_id() {
        let (ledger, settings) = setup();
        create(&ledger, &settings, "Groceries", "500");
        create(&ledger, &settings, "Rent", "1000");

        let cmd = EnvelopeCommands::Transfer {
            from: "1".into(),
            to: "Rent".into(),
            amount: "200".into(),
        };
        let output = handle_envelope_command(&ledger, &settings, cmd).unwrap();
        assert!(output.contains("Transferred $200.00"));
        assert_eq!(ledger.find("Rent").unwrap().unwrap().balance, Money::from_units(1200));
    }

    #[test]
    fn test_update_without_changes() {
        let (ledger, settings) = setup();
        create(&ledger, &settings, "Groceries", "500");

        let cmd = EnvelopeCommands::Update {
            envelope: "Groceries".into(),
            category: None,
            budget: None,
            balance: None,
        };
        let output = handle_envelope_command(&ledger, &settings, cmd).unwrap();
        assert!(output.starts_with("No changes specified"));
    }

    #[test]
    fn test_bad_amount_is_validation_error() {
        let (ledger, settings) = setup();
        let cmd = EnvelopeCommands::Create {
            category: "Rent".into(),
            budget: "lots".into(),
        };
        let err = handle_envelope_command(&ledger, &settings, cmd).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_total_budget() {
        assert_eq!(parse_total_budget("2500.50").unwrap(), Money::from_cents(250050));
        assert!(matches!(parse_total_budget("0"), Err(LedgerError::Config(_))));
        assert!(parse_total_budget("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_envelope() {
        let (ledger, settings) = setup();
        let cmd = EnvelopeCommands::Delete {
            envelope: "Travel".into(),
        };
        let err = handle_envelope_command(&ledger, &settings, cmd).unwrap_err();
        assert_eq!(err.to_string(), "Envelope not found: Travel");
    }
}
