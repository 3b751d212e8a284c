//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    MSG_ERRO_INESPERADO, MSG_NAO_ENCONTRADO, MSG_REDE_INDISPONIVEL, MSG_SEM_PERMISSAO,
    MSG_SESSAO_EXPIRADA,
};

/// Main error type for Tropeiro
///
/// Variants follow the failure taxonomy of the ERP backend: transport
/// problems, the two authorization signals, client-side validation, and
/// business-rule rejections whose message must reach the user verbatim.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ErpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule rejection: {0}")]
    Business(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ErpError {
    /// Text suitable for an end-user notification.
    ///
    /// Backend-provided messages (business rejections, validation, not-found)
    /// are surfaced verbatim; transport and internal categories fall back to
    /// a generic pt-BR phrase since their payloads are technical.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Business(msg) if !msg.is_empty() => msg.clone(),
            Self::NotFound(msg) if !msg.is_empty() => msg.clone(),
            Self::NotFound(_) => MSG_NAO_ENCONTRADO.to_string(),
            Self::Network(_) => MSG_REDE_INDISPONIVEL.to_string(),
            Self::Auth(_) => MSG_SESSAO_EXPIRADA.to_string(),
            Self::Forbidden(_) => MSG_SEM_PERMISSAO.to_string(),
            _ => MSG_ERRO_INESPERADO.to_string(),
        }
    }

    /// Whether this error is a session-expiry signal the shell must react to.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Whether this error came from a logical rule (validation or business).
    ///
    /// Logical failures are never retried.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Business(_))
    }
}

/// Result type alias for Tropeiro operations
pub type Result<T> = std::result::Result<T, ErpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_message_surfaces_verbatim() {
        let err = ErpError::Business("Título já baixado em 10/01/2024".to_string());
        assert_eq!(err.user_message(), "Título já baixado em 10/01/2024");
    }

    #[test]
    fn network_message_falls_back_to_generic_phrase() {
        let err = ErpError::Network("connection reset by peer".to_string());
        assert_eq!(err.user_message(), MSG_REDE_INDISPONIVEL);
    }

    #[test]
    fn auth_errors_are_flagged_for_the_shell() {
        assert!(ErpError::Auth("401".to_string()).is_auth());
        assert!(!ErpError::Network("down".to_string()).is_auth());
    }

    #[test]
    fn logical_errors_cover_validation_and_business() {
        assert!(ErpError::Validation("x".to_string()).is_logical());
        assert!(ErpError::Business("x".to_string()).is_logical());
        assert!(!ErpError::Network("x".to_string()).is_logical());
    }

    #[test]
    fn serializes_with_type_and_message_tags() {
        let err = ErpError::Auth("sessão expirada".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "sessão expirada");
    }
}
