//! Inbound requests and body validation
//!
//! Bodies are checked field by field before anything reaches the ledger, so
//! a wrongly typed field is reported by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{EnvelopeId, Money};
use crate::services::EnvelopeUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A single request addressed to the handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    /// Path segments with empty pieces (leading/trailing slashes) removed
    pub fn segments(&self) -> Vec<&str> {
        self.path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn body_object(&self) -> LedgerResult<Map<String, Value>> {
        match &self.body {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(LedgerError::Validation(
                "Request body must be a JSON object.".into(),
            )),
        }
    }
}

/// Validated body of `POST /envelopes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEnvelopeBody {
    pub category: String,
    pub budget: Money,
}

impl CreateEnvelopeBody {
    pub fn from_request(request: &ApiRequest) -> LedgerResult<Self> {
        let body = request.body_object()?;

        let category = body
            .get("category")
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                LedgerError::Validation(
                    "Request must include a non-empty \"category\" string.".into(),
                )
            })?;

        let budget = positive_amount(body.get("budget"))
            .ok_or_else(|| LedgerError::Validation("\"budget\" must be a positive number.".into()))?;

        Ok(Self {
            category: category.to_string(),
            budget,
        })
    }
}

/// Validated body of `PUT /envelopes/{id}`
pub fn update_from_request(request: &ApiRequest) -> LedgerResult<EnvelopeUpdate> {
    let body = request.body_object()?;
    let mut changes = EnvelopeUpdate::default();

    if let Some(value) = body.get("category") {
        let category = value
            .as_str()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                LedgerError::Validation(
                    "If provided, \"category\" must be a non-empty string.".into(),
                )
            })?;
        changes.category = Some(category.to_string());
    }

    if let Some(value) = body.get("budget") {
        let budget = positive_amount(Some(value)).ok_or_else(|| {
            LedgerError::Validation("\"budget\", if provided, must be a positive number.".into())
        })?;
        changes.budget = Some(budget);
    }

    if let Some(value) = body.get("balance") {
        let balance = amount(Some(value))
            .filter(|b| !b.is_negative())
            .ok_or_else(|| {
                LedgerError::Validation(
                    "\"balance\", if provided, must be zero or a positive number.".into(),
                )
            })?;
        changes.balance = Some(balance);
    }

    Ok(changes)
}

/// Validated body of `POST /envelopes/transfer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBody {
    pub from: EnvelopeId,
    pub to: EnvelopeId,
    pub amount: Money,
}

impl TransferBody {
    pub fn from_request(request: &ApiRequest) -> LedgerResult<Self> {
        let body = request.body_object()?;

        let ids = (
            positive_id(body.get("fromEnvelopeId")),
            positive_id(body.get("toEnvelopeId")),
        );
        let (from, to) = match ids {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(LedgerError::Validation(
                    "\"fromEnvelopeId\" and \"toEnvelopeId\" must be positive numbers.".into(),
                ))
            }
        };

        if from == to {
            return Err(LedgerError::Validation(
                "\"fromEnvelopeId\" and \"toEnvelopeId\" cannot be the same.".into(),
            ));
        }

        let amount = positive_amount(body.get("amount"))
            .ok_or_else(|| LedgerError::Validation("\"amount\" must be a positive number.".into()))?;

        Ok(Self { from, to, amount })
    }
}

/// Parse a path segment as an envelope id
pub fn parse_envelope_id(segment: &str) -> LedgerResult<EnvelopeId> {
    segment
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .map(EnvelopeId::new)
        .ok_or_else(|| {
            LedgerError::Validation("Invalid envelope ID. It must be a positive number.".into())
        })
}

fn amount(value: Option<&Value>) -> Option<Money> {
    value
        .and_then(Value::as_f64)
        .and_then(|v| Money::from_decimal(v).ok())
}

fn positive_amount(value: Option<&Value>) -> Option<Money> {
    amount(value).filter(Money::is_positive)
}

fn positive_id(value: Option<&Value>) -> Option<EnvelopeId> {
    value
        .and_then(Value::as_u64)
        .filter(|id| *id > 0)
        .map(EnvelopeId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(path: &str, body: Value) -> ApiRequest {
        ApiRequest::new(Method::Post, path, Some(body))
    }

    #[test]
    fn test_request_deserialization() {
        let request: ApiRequest =
            serde_json::from_str(r#"{"method":"PUT","path":"/envelopes/3","body":{"budget":1}}"#)
                .unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.segments(), vec!["envelopes", "3"]);

        let request: ApiRequest = serde_json::from_str(r#"{"method":"GET","path":"/"}"#).unwrap();
        assert!(request.body.is_none());
        assert!(request.segments().is_empty());

        assert!(serde_json::from_str::<ApiRequest>(r#"{"method":"PATCH","path":"/"}"#).is_err());
    }

    #[test]
    fn test_create_body() {
        let body = CreateEnvelopeBody::from_request(&post(
            "/envelopes",
            json!({"category": "Groceries", "budget": 12.5}),
        ))
        .unwrap();
        assert_eq!(body.category, "Groceries");
        assert_eq!(body.budget, Money::from_cents(1250));

        for bad in [
            json!({"category": "  ", "budget": 5}),
            json!({"category": 7, "budget": 5}),
            json!({"category": "Rent", "budget": "5"}),
            json!({"category": "Rent", "budget": 0}),
            json!({"category": "Rent"}),
        ] {
            let err = CreateEnvelopeBody::from_request(&post("/envelopes", bad)).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_update_body() {
        let request = ApiRequest::new(
            Method::Put,
            "/envelopes/1",
            Some(json!({"budget": 800, "balance": 0})),
        );
        let changes = update_from_request(&request).unwrap();
        assert_eq!(changes.budget, Some(Money::from_units(800)));
        assert_eq!(changes.balance, Some(Money::zero()));
        assert!(changes.category.is_none());

        let request = ApiRequest::new(Method::Put, "/envelopes/1", Some(json!({"balance": -1})));
        assert!(update_from_request(&request).unwrap_err().is_validation());

        let request = ApiRequest::new(Method::Put, "/envelopes/1", Some(json!([1, 2])));
        assert!(update_from_request(&request).is_err());

        let request = ApiRequest::new(Method::Put, "/envelopes/1", None);
        assert!(update_from_request(&request).unwrap().is_empty());
    }

    #[test]
    fn test_transfer_body() {
        let body = TransferBody::from_request(&post(
            "/envelopes/transfer",
            json!({"fromEnvelopeId": 1, "toEnvelopeId": 2, "amount": 200}),
        ))
        .unwrap();
        assert_eq!(body.from, EnvelopeId::new(1));
        assert_eq!(body.amount, Money::from_units(200));

        let same = post(
            "/envelopes/transfer",
            json!({"fromEnvelopeId": 1, "toEnvelopeId": 1, "amount": 5}),
        );
        assert!(TransferBody::from_request(&same)
            .unwrap_err()
            .to_string()
            .contains("cannot be the same"));

        let negative_id = post(
            "/envelopes/transfer",
            json!({"fromEnvelopeId": -1, "toEnvelopeId": 2, "amount": 5}),
        );
        assert!(TransferBody::from_request(&negative_id).is_err());
    }

    #[test]
    fn test_parse_envelope_id() {
        assert_eq!(parse_envelope_id("12").unwrap(), EnvelopeId::new(12));
        assert!(parse_envelope_id("0").is_err());
        assert!(parse_envelope_id("-3").is_err());
        assert!(parse_envelope_id("abc").is_err());
    }
}
