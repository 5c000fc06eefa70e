//! Envelope ledger - in-memory envelope budgeting
//!
//! A fixed total budget is divided into named envelopes, each with an
//! allocation (`budget`) and the funds still available in it (`balance`).
//! The ledger enforces the accounting rules for creating, updating, deleting
//! and transferring between envelopes.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money and envelope models
//! - `services`: The envelope ledger
//! - `api`: Request handler mapping requests to ledger operations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and sessions
//!
//! # Example
//!
//! ```
//! use envelope_ledger::models::{EnvelopeId, Money};
//! use envelope_ledger::services::EnvelopeLedger;
//!
//! let ledger = EnvelopeLedger::new(Money::from_units(2000)).unwrap();
//! let groceries = ledger.create("Groceries", Money::from_units(500)).unwrap();
//! let rent = ledger.create("Rent", Money::from_units(1000)).unwrap();
//!
//! let moved = ledger.transfer(groceries.id, rent.id, Money::from_units(200)).unwrap();
//! assert_eq!(moved.from.balance, Money::from_units(300));
//! assert_eq!(ledger.get(EnvelopeId::new(2)).unwrap().balance, Money::from_units(1200));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;

pub use error::{ErrorKind, LedgerError, LedgerResult};
