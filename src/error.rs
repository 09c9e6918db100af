use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use isahc::Error as rError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response body is not a JSON object: {0}")]
    UnexpectedBody(String),
    #[error("{provider} error: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },
    #[error("Isahc Error: {0}")]
    Http(#[from] rError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorJson {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("{}", self);

        let status = self.status_code();
        let code = self.code().map(str::to_owned);
        (
            status,
            Json(ErrorJson {
                error: self.to_string(),
                code,
            }),
        )
            .into_response()
    }
}

impl Error {
    pub fn provider_not_configured() -> Self {
        Self::Configuration("geolocation provider is not configured".into())
    }

    pub fn unknown_provider(name: impl AsRef<str>) -> Self {
        Self::Configuration(format!(
            "unknown geolocation provider `{}`, expected one of test, freegeoip, ipstack, ipinfo",
            name.as_ref()
        ))
    }

    pub fn unexpected_body(body: impl Into<String>) -> Self {
        Self::UnexpectedBody(body.into())
    }

    /// Errors caused by a bad setup rather than by the lookup itself.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Http(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            Error::Configuration(_) => Some("configuration_error"),
            Error::Status { .. } => Some("upstream_status"),
            Error::Decode(_) => Some("decode_error"),
            Error::UnexpectedBody(_) => Some("unexpected_body"),
            Error::Provider { .. } => Some("provider_error"),
            Error::Http(_) => Some("http_client_error"),
            Error::Io(_) => Some("io_error"),
        }
    }
}
