//! Outbound responses and error-kind to status mapping

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ErrorKind, LedgerError};
use crate::models::Envelope;
use crate::services::{LedgerSummary, TransferResult};

/// Status code and optional JSON body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Serialize `body` with the given status; serialization failure becomes a 500
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: Some(value),
            },
            Err(e) => Self::error(500, format!("Failed to serialize response: {}", e)),
        }
    }

    pub fn text(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Some(Value::String(message.to_string())),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(json!({ "error": message.into() })),
        }
    }

    pub fn from_error(err: &LedgerError) -> Self {
        Self::error(status_for(err.kind()), err.to_string())
    }
}

/// Status code for a ledger error kind
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::DuplicateCategory => 409,
        ErrorKind::BudgetExceeded | ErrorKind::InsufficientBalance => 400,
        ErrorKind::Config | ErrorKind::Io | ErrorKind::Json | ErrorKind::Storage => 500,
    }
}

/// Envelope as exposed in JSON bodies, amounts in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeView {
    pub id: u64,
    pub category: String,
    pub budget: f64,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Envelope> for EnvelopeView {
    fn from(envelope: &Envelope) -> Self {
        Self {
            id: envelope.id.get(),
            category: envelope.category.clone(),
            budget: envelope.budget.to_decimal(),
            balance: envelope.balance.to_decimal(),
            created_at: envelope.created_at,
            updated_at: envelope.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferView {
    pub from: EnvelopeView,
    pub to: EnvelopeView,
}

impl From<&TransferResult> for TransferView {
    fn from(result: &TransferResult) -> Self {
        Self {
            from: EnvelopeView::from(&result.from),
            to: EnvelopeView::from(&result.to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_budget: f64,
    pub used_budget: f64,
    pub unallocated: f64,
    pub total_available_balance: f64,
    pub envelope_count: usize,
}

impl From<&LedgerSummary> for SummaryView {
    fn from(summary: &LedgerSummary) -> Self {
        Self {
            total_budget: summary.total_budget.to_decimal(),
            used_budget: summary.used_budget.to_decimal(),
            unallocated: summary.unallocated.to_decimal(),
            total_available_balance: summary.total_available_balance.to_decimal(),
            envelope_count: summary.envelope_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnvelopeId, Money};

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), 400);
        assert_eq!(status_for(ErrorKind::NotFound), 404);
        assert_eq!(status_for(ErrorKind::DuplicateCategory), 409);
        assert_eq!(status_for(ErrorKind::BudgetExceeded), 400);
        assert_eq!(status_for(ErrorKind::InsufficientBalance), 400);
        assert_eq!(status_for(ErrorKind::Storage), 500);
    }

    #[test]
    fn test_error_body() {
        let response = ApiResponse::from_error(&LedgerError::envelope_not_found(EnvelopeId::new(4)));
        assert_eq!(response.status, 404);
        assert_eq!(
            response.body,
            Some(json!({"error": "Envelope not found: 4"}))
        );
    }

    #[test]
    fn test_envelope_view_uses_camel_case_units() {
        let envelope = Envelope::new(EnvelopeId::new(1), "Groceries", Money::from_cents(50050));
        let value = serde_json::to_value(EnvelopeView::from(&envelope)).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["budget"], 500.5);
        assert_eq!(value["balance"], 500.5);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_no_content_serializes_without_body() {
        let line = serde_json::to_string(&ApiResponse::no_content()).unwrap();
        assert_eq!(line, r#"{"status":204}"#);
    }
}
