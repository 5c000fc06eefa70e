//! JSON-lines driver for the request handler
//!
//! Each input line is one request object `{"method", "path", "body"?}`; each
//! output line is the matching response `{"status", "body"?}`.

use std::io::{BufRead, Write};

use log::warn;

use crate::api::{ApiRequest, ApiResponse, RequestHandler};
use crate::error::LedgerResult;
use crate::services::EnvelopeLedger;

/// Serve requests from `reader` until end of input
pub fn serve_json_lines<R: BufRead, W: Write>(
    ledger: &EnvelopeLedger,
    reader: R,
    mut writer: W,
) -> LedgerResult<()> {
    let handler = RequestHandler::new(ledger);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ApiRequest>(&line) {
            Ok(request) => handler.handle(&request),
            Err(e) => {
                warn!("Malformed request line: {}", e);
                ApiResponse::error(400, format!("Malformed request: {}", e))
            }
        };

        writeln!(writer, "{}", serde_json::to_string(&response)?)?;
        writer.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use serde_json::Value;
    use std::io::Cursor;

    #[test]
    fn test_serve_json_lines() {
        let ledger = EnvelopeLedger::new(Money::from_units(2000)).unwrap();
        let input = concat!(
            r#"{"method":"POST","path":"/envelopes","body":{"category":"Groceries","budget":500}}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"method":"DELETE","path":"/envelopes/1"}"#,
            "\n",
        );
        let mut out = Vec::new();

        serve_json_lines(&ledger, Cursor::new(input), &mut out).unwrap();

        let responses: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["status"], 201);
        assert_eq!(responses[0]["body"]["category"], "Groceries");
        assert_eq!(responses[1]["status"], 400);
        assert_eq!(responses[2]["status"], 204);
        assert!(ledger.list().unwrap().is_empty());
    }
}
