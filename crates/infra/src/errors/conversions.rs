//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use tropeiro_domain::ErpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ErpError);

impl From<InfraError> for ErpError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ErpError> for InfraError {
    fn from(value: ErpError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoErpError {
    fn into_erp(self) -> ErpError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ErpError */
/* -------------------------------------------------------------------------- */

impl IntoErpError for HttpError {
    fn into_erp(self) -> ErpError {
        if self.is_timeout() {
            return ErpError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ErpError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 => ErpError::Auth(message),
                403 => ErpError::Forbidden(message),
                404 => ErpError::NotFound(message),
                429 => ErpError::Network(message),
                400..=499 => ErpError::Business(message),
                500..=599 => ErpError::Network(message),
                _ => ErpError::Network(message),
            };
        }

        ErpError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_erp())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ErpError */
/* -------------------------------------------------------------------------- */

impl IntoErpError for serde_json::Error {
    fn into_erp(self) -> ErpError {
        ErpError::Internal(format!("JSON payload did not match the expected shape: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_erp())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ErpError */
/* -------------------------------------------------------------------------- */

impl IntoErpError for url::ParseError {
    fn into_erp(self) -> ErpError {
        ErpError::Config(format!("Invalid URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_erp())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
