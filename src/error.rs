use serde::{Deserialize, Serialize};

/// Classified failures surfaced by every public operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrendsError {
    /// Caller input rejected before contacting the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport failure, non-2xx status or provider-side rejection
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// Body did not match any recognized envelope or container shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl TrendsError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    pub fn network(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Network {
            message: message.into(),
            status,
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Build a network error from a non-success HTTP status
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = match status {
            429 => "Rate limit exceeded: the provider is throttling requests".to_string(),
            400 => format!("Bad request (400): the provider rejected the parameters. {}", truncate(body, 200)),
            404 => "Not found (404): unknown endpoint or unsupported geography".to_string(),
            500..=599 => format!("Server error ({}): the provider is unavailable", status),
            _ => format!("Request failed with status {}", status),
        };
        Self::network(message, Some(status))
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TrendsError::InvalidRequest(_) => "INVALID_REQUEST",
            TrendsError::Network { .. } => "NETWORK_ERROR",
            TrendsError::Parse(_) => "PARSE_ERROR",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TrendsError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TrendsError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else if err.is_connect() {
            format!("Connection failed: {}", err)
        } else {
            err.to_string()
        };
        Self::Network { message, status }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Serialized form of a [`TrendsError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&TrendsError> for ErrorBody {
    fn from(err: &TrendsError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            status_code: err.status(),
        }
    }
}

/// Discriminated outcome of an operation: `{"data": ...}` or `{"error": ...}`, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response<T> {
    Data(T),
    Error(ErrorBody),
}

impl<T> Response<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, Response::Data(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Response::Data(data) => Some(data),
            Response::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Response::Data(_) => None,
            Response::Error(err) => Some(err),
        }
    }
}

impl<T> From<Result<T, TrendsError>> for Response<T> {
    fn from(result: Result<T, TrendsError>) -> Self {
        match result {
            Ok(data) => Response::Data(data),
            Err(err) => Response::Error(ErrorBody::from(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_variant_has_no_error_field() {
        let response: Response<Vec<u32>> = Ok(vec![1, 2]).into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "data": [1, 2] }));
    }

    #[test]
    fn test_error_variant_has_no_data_field() {
        let response: Response<Vec<u32>> = Err(TrendsError::parse("missing nested JSON")).into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "code": "PARSE_ERROR",
                    "message": "Parse error: missing nested JSON"
                }
            })
        );
    }

    #[test]
    fn test_status_is_carried_for_network_errors() {
        let err = TrendsError::from_status(429, "");
        assert_eq!(err.code(), "NETWORK_ERROR");
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("Rate limit"));

        let body = ErrorBody::from(&err);
        assert_eq!(body.status_code, Some(429));
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(500);
        let err = TrendsError::from_status(400, &long);
        assert!(err.to_string().len() < 300);
    }
}
