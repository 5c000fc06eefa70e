//! Route dispatch
//!
//! | Method | Path                  | Success            |
//! |--------|-----------------------|--------------------|
//! | GET    | `/`                   | 200 health text    |
//! | POST   | `/envelopes`          | 201 envelope       |
//! | GET    | `/envelopes`          | 200 envelope array |
//! | GET    | `/envelopes/summary`  | 200 summary        |
//! | GET    | `/envelopes/{id}`     | 200 envelope       |
//! | PUT    | `/envelopes/{id}`     | 200 envelope       |
//! | DELETE | `/envelopes/{id}`     | 204                |
//! | POST   | `/envelopes/transfer` | 201 `{from, to}`   |

use log::debug;

use super::request::{
    parse_envelope_id, update_from_request, ApiRequest, CreateEnvelopeBody, Method, TransferBody,
};
use super::response::{ApiResponse, EnvelopeView, SummaryView, TransferView};
use crate::error::{LedgerError, LedgerResult};
use crate::models::EnvelopeId;
use crate::services::EnvelopeLedger;

/// Health check text for `GET /`
pub const HEALTH_MESSAGE: &str = "Personal Budget API is running!";

/// Maps requests onto one ledger
pub struct RequestHandler<'a> {
    ledger: &'a EnvelopeLedger,
}

impl<'a> RequestHandler<'a> {
    pub fn new(ledger: &'a EnvelopeLedger) -> Self {
        Self { ledger }
    }

    /// Handle one request; never fails, errors become error responses
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = self
            .route(request)
            .unwrap_or_else(|err| ApiResponse::from_error(&err));
        debug!("{} {} -> {}", request.method, request.path, response.status);
        response
    }

    fn route(&self, request: &ApiRequest) -> LedgerResult<ApiResponse> {
        let segments = request.segments();

        match (request.method, segments.as_slice()) {
            (Method::Get, []) => Ok(ApiResponse::text(200, HEALTH_MESSAGE)),

            (Method::Get, ["envelopes"]) => self.list(),
            (Method::Post, ["envelopes"]) => self.create(request),
            (Method::Get, ["envelopes", "summary"]) => self.summary(),
            (Method::Post, ["envelopes", "transfer"]) => self.transfer(request),

            (Method::Get, ["envelopes", id]) => self.get(parse_envelope_id(id)?),
            (Method::Put, ["envelopes", id]) => self.update(parse_envelope_id(id)?, request),
            (Method::Delete, ["envelopes", id]) => self.delete(parse_envelope_id(id)?),

            (_, [] | ["envelopes"] | ["envelopes", _]) => Ok(ApiResponse::error(
                405,
                format!("Method {} not allowed on {}", request.method, request.path),
            )),
            _ => Ok(ApiResponse::error(
                404,
                format!("Route not found: {}", request.path),
            )),
        }
    }

    fn list(&self) -> LedgerResult<ApiResponse> {
        let envelopes: Vec<EnvelopeView> = self.ledger.list()?.iter().map(EnvelopeView::from).collect();
        Ok(ApiResponse::json(200, &envelopes))
    }

    fn create(&self, request: &ApiRequest) -> LedgerResult<ApiResponse> {
        let body = CreateEnvelopeBody::from_request(request)?;
        let envelope = self.ledger.create(&body.category, body.budget)?;
        Ok(ApiResponse::json(201, &EnvelopeView::from(&envelope)))
    }

    fn summary(&self) -> LedgerResult<ApiResponse> {
        let summary = self.ledger.summary()?;
        Ok(ApiResponse::json(200, &SummaryView::from(&summary)))
    }

    fn get(&self, id: EnvelopeId) -> LedgerResult<ApiResponse> {
        let envelope = self.ledger.get(id)?;
        Ok(ApiResponse::json(200, &EnvelopeView::from(&envelope)))
    }

    fn update(&self, id: EnvelopeId, request: &ApiRequest) -> LedgerResult<ApiResponse> {
        // Unknown ids are reported before body problems. This check and the
        // update take the lock separately; update re-checks the id, so a
        // concurrent delete still ends in NotFound.
        self.ledger.get(id)?;
        let changes = update_from_request(request)?;
        let envelope = self.ledger.update(id, changes)?;
        Ok(ApiResponse::json(200, &EnvelopeView::from(&envelope)))
    }

    fn delete(&self, id: EnvelopeId) -> LedgerResult<ApiResponse> {
        if self.ledger.delete(id)? {
            Ok(ApiResponse::no_content())
        } else {
            Err(LedgerError::envelope_not_found(id))
        }
    }

    fn transfer(&self, request: &ApiRequest) -> LedgerResult<ApiResponse> {
        let body = TransferBody::from_request(request)?;
        let result = self.ledger.transfer(body.from, body.to, body.amount)?;
        Ok(ApiResponse::json(201, &TransferView::from(&result)))
    }
}
