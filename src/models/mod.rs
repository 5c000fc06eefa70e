//! Core data models for the envelope ledger
//!
//! `Money` for exact amounts and `Envelope` for the budget slices the ledger
//! manages.

pub mod envelope;
pub mod money;

pub use envelope::{Envelope, EnvelopeId, EnvelopeValidationError};
pub use money::{Money, MoneyParseError};
