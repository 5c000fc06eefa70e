//! Display formatting for terminal output

pub mod envelope;

pub use envelope::{format_envelope_details, format_envelope_list, format_summary, format_transfer};
