//! Business logic layer
//!
//! The envelope ledger owns every invariant-checking operation; the CLI and
//! request handler only translate inputs and results.

pub mod ledger;

pub use ledger::{EnvelopeLedger, EnvelopeUpdate, LedgerSummary, TransferResult};
