//! CLI command handlers
//!
//! Bridges clap argument parsing with the envelope ledger. Envelopes are
//! held in memory, so commands run inside a session that owns one ledger.

pub mod api;
pub mod envelope;
pub mod session;

pub use api::serve_json_lines;
pub use envelope::{handle_envelope_command, parse_total_budget, EnvelopeCommands};
pub use session::{split_args, LineOutcome, Session};
