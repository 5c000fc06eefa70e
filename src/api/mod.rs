//! Request handler boundary
//!
//! Translates transport-neutral requests (method, path, JSON body) into
//! ledger operations and ledger results into status codes and JSON bodies.
//! No network listener lives here; callers feed requests in from whatever
//! transport they own.
//!
//! # Example
//!
//! ```
//! use envelope_ledger::api::{ApiRequest, Method, RequestHandler};
//! use envelope_ledger::models::Money;
//! use envelope_ledger::services::EnvelopeLedger;
//! use serde_json::json;
//!
//! let ledger = EnvelopeLedger::new(Money::from_units(2000)).unwrap();
//! let handler = RequestHandler::new(&ledger);
//!
//! let response = handler.handle(&ApiRequest::new(
//!     Method::Post,
//!     "/envelopes",
//!     Some(json!({"category": "Groceries", "budget": 500})),
//! ));
//! assert_eq!(response.status, 201);
//! ```

pub mod handler;
pub mod request;
pub mod response;

pub use handler::RequestHandler;
pub use request::{ApiRequest, Method};
pub use response::{status_for, ApiResponse, EnvelopeView, SummaryView};
