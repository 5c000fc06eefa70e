//! Ledger sessions
//!
//! Envelopes live only in memory, so every command of a run has to go
//! through the same ledger. A session reads command lines (interactively or
//! from a script) and feeds them to one ledger.

use std::io::{BufRead, Write};
use std::path::Path;

use clap::Parser;
use log::{debug, warn};

use super::envelope::{handle_envelope_command, EnvelopeCommands};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::services::EnvelopeLedger;

/// One parsed session line
#[derive(Parser, Debug)]
#[command(name = "envelope", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: EnvelopeCommands,
}

/// What the caller should do after a line ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print this and keep going
    Output(String),
    /// The user asked to leave
    Exit,
}

/// A ledger plus the settings used to present it
pub struct Session {
    ledger: EnvelopeLedger,
    settings: Settings,
}

impl Session {
    pub fn new(ledger: EnvelopeLedger, settings: Settings) -> Self {
        Self { ledger, settings }
    }

    pub fn ledger(&self) -> &EnvelopeLedger {
        &self.ledger
    }

    /// Run one command line
    ///
    /// Blank lines and `#` comments produce empty output. Help requests and
    /// parse failures come back as validation errors carrying clap's message.
    pub fn execute_line(&self, line: &str) -> LedgerResult<LineOutcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(LineOutcome::Output(String::new()));
        }

        let args = split_args(line)?;
        let parsed = match SessionLine::try_parse_from(&args) {
            Ok(parsed) => parsed,
            Err(err) => match err.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    return Ok(LineOutcome::Output(err.to_string()))
                }
                _ => return Err(LedgerError::Validation(err.to_string().trim_end().to_string())),
            },
        };

        debug!("session command: {:?}", parsed.command);
        if parsed.command == EnvelopeCommands::Exit {
            return Ok(LineOutcome::Exit);
        }

        handle_envelope_command(&self.ledger, &self.settings, parsed.command).map(LineOutcome::Output)
    }

    /// Interactive loop: errors are reported and the session continues
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
        prompt: bool,
    ) -> LedgerResult<()> {
        if prompt {
            writeln!(
                writer,
                "Envelope ledger session (total budget {}). Type 'help' for commands.",
                self.settings.format_money(self.ledger.total_budget())
            )?;
            write!(writer, "> ")?;
            writer.flush()?;
        }

        for line in reader.lines() {
            match self.execute_line(&line?) {
                Ok(LineOutcome::Output(text)) => write!(writer, "{}", text)?,
                Ok(LineOutcome::Exit) => break,
                Err(err) => {
                    warn!("{}", err);
                    writeln!(writer, "Error: {}", err)?;
                }
            }
            if prompt {
                write!(writer, "> ")?;
                writer.flush()?;
            }
        }

        Ok(())
    }

    /// Run a script, stopping at the first failing line
    pub fn run_script<W: Write>(&self, path: &Path, mut writer: W) -> LedgerResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Io(format!("Failed to read script {}: {}", path.display(), e))
        })?;

        for (line_num, line) in contents.lines().enumerate() {
            match self.execute_line(line) {
                Ok(LineOutcome::Output(text)) => write!(writer, "{}", text)?,
                Ok(LineOutcome::Exit) => break,
                Err(err) => {
                    return Err(annotate(err, line_num + 1));
                }
            }
        }

        Ok(())
    }
}

/// Prefix the message of an error with its script line, keeping its kind
fn annotate(err: LedgerError, line: usize) -> LedgerError {
    match err {
        LedgerError::Validation(msg) => LedgerError::Validation(format!("line {}: {}", line, msg)),
        LedgerError::NotFound { identifier } => LedgerError::NotFound {
            identifier: format!("{} (line {})", identifier, line),
        },
        other => other,
    }
}

/// Split a command line into words, honoring double quotes
pub fn split_args(line: &str) -> LedgerResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(LedgerError::Validation("Unterminated quote".into()));
    }
    if in_word {
        args.push(current);
    }

    Ok(args)
}
