use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload used in place of a response body when the server sends none.
pub const COMPLETED_SENTINEL: &str = "request completed successfully";

/// Uniform result of every request made through [`Client`](crate::Client).
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", from = "WireEnvelope")]
pub enum Envelope {
    Success(Value),
    Failure(String),
}

impl Envelope {
    pub fn success(data: impl Into<Value>) -> Self {
        Envelope::Success(data.into())
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Envelope::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(error) => Some(error),
        }
    }

    /// Decode the success payload into a typed model.
    ///
    /// Returns `None` for failures and for payloads that don't match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }
}

/// Payload standing in for a missing or unreadable body.
pub(crate) fn completed_payload() -> Value {
    Value::String(COMPLETED_SENTINEL.to_string())
}

impl From<Result<Value, ApiError>> for Envelope {
    fn from(outcome: Result<Value, ApiError>) -> Self {
        match outcome {
            Ok(data) => Envelope::Success(data),
            Err(err) => Envelope::Failure(err.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Success(data) => WireEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Envelope::Failure(error) => WireEnvelope {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl From<WireEnvelope> for Envelope {
    fn from(wire: WireEnvelope) -> Self {
        if wire.success {
            Envelope::Success(wire.data.unwrap_or(Value::Null))
        } else {
            Envelope::Failure(wire.error.unwrap_or_default())
        }
    }
}
