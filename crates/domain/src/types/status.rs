//! Status vocabularies and legacy-token translation
//!
//! The backend speaks two generations of status tokens: the current API
//! emits a closed SCREAMING_SNAKE_CASE set, while the legacy API emitted
//! free-form mixed-case Portuguese labels. Everything entering the domain is
//! normalized through the tables below. Normalization is total: tokens
//! outside both vocabularies collapse to the fallback variant so rendering
//! never fails on surprise data.

use serde::{Deserialize, Serialize};

/// Visual weight a status badge should be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

/// Ready-to-render badge payload (display label plus tone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: BadgeTone,
}

/// Canonical receivable/installment status (current API generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleStatus {
    Aberta,
    ParcialmentePaga,
    Paga,
    EmCompensacao,
    Cancelada,
    /// Fallback for tokens outside both vocabularies; renders neutrally
    /// instead of failing.
    #[default]
    #[serde(other)]
    Desconhecida,
}

impl TitleStatus {
    /// Normalize a raw wire token from either API generation.
    ///
    /// Canonical tokens match first (case-insensitively), then the legacy
    /// translation table; anything else is [`TitleStatus::Desconhecida`].
    /// Never panics, never errors.
    #[must_use]
    pub fn normalize(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "ABERTA" => return Self::Aberta,
            "PARCIALMENTE_PAGA" => return Self::ParcialmentePaga,
            "PAGA" => return Self::Paga,
            "EM_COMPENSACAO" => return Self::EmCompensacao,
            "CANCELADA" => return Self::Cancelada,
            "DESCONHECIDA" => return Self::Desconhecida,
            _ => {}
        }
        Self::from_legacy(trimmed)
    }

    /// Translate a legacy mixed-case token.
    ///
    /// The legacy generation emitted free-form Portuguese labels; this table
    /// covers the forms observed in production payloads, accents included.
    fn from_legacy(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "aberta" | "aberto" | "pendente" | "em aberto" | "em_aberto" => Self::Aberta,
            "parcial"
            | "parcialmente paga"
            | "parcialmente pago"
            | "pago parcial"
            | "pagamento parcial" => Self::ParcialmentePaga,
            "paga" | "pago" | "quitada" | "quitado" | "liquidada" | "liquidado" => Self::Paga,
            "compensacao"
            | "compensação"
            | "em compensacao"
            | "em compensação"
            | "cheque em compensacao"
            | "cheque em compensação" => Self::EmCompensacao,
            "cancelada" | "cancelado" | "estornada" | "estornado" => Self::Cancelada,
            _ => Self::Desconhecida,
        }
    }

    /// pt-BR display text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Aberta => "Em aberto",
            Self::ParcialmentePaga => "Parcialmente paga",
            Self::Paga => "Paga",
            Self::EmCompensacao => "Em compensação",
            Self::Cancelada => "Cancelada",
            Self::Desconhecida => "Desconhecida",
        }
    }

    #[must_use]
    pub const fn tone(&self) -> BadgeTone {
        match self {
            Self::Aberta => BadgeTone::Warning,
            Self::ParcialmentePaga | Self::EmCompensacao => BadgeTone::Info,
            Self::Paga => BadgeTone::Success,
            Self::Cancelada => BadgeTone::Danger,
            Self::Desconhecida => BadgeTone::Neutral,
        }
    }

    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        StatusBadge { label: self.label().to_string(), tone: self.tone() }
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Paga)
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelada)
    }

    /// Whether the item still carries an open balance.
    ///
    /// Cheques in clearing still count as open; only settled and cancelled
    /// items contribute zero to the aggregates.
    #[must_use]
    pub const fn counts_as_open(&self) -> bool {
        !matches!(self, Self::Paga | Self::Cancelada)
    }
}

/// Canonical order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendente,
    EmSeparacao,
    EmTransito,
    Entregue,
    Cancelado,
    #[default]
    #[serde(other)]
    Desconhecido,
}

impl OrderStatus {
    /// Normalize a raw wire token from either API generation.
    #[must_use]
    pub fn normalize(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "PENDENTE" => return Self::Pendente,
            "EM_SEPARACAO" => return Self::EmSeparacao,
            "EM_TRANSITO" => return Self::EmTransito,
            "ENTREGUE" => return Self::Entregue,
            "CANCELADO" => return Self::Cancelado,
            "DESCONHECIDO" => return Self::Desconhecido,
            _ => {}
        }
        match trimmed.to_lowercase().as_str() {
            "pendente" | "aguardando" | "novo" => Self::Pendente,
            "separacao" | "separação" | "em separacao" | "em separação" | "separando" => {
                Self::EmSeparacao
            }
            "transito" | "trânsito" | "em transito" | "em trânsito" | "despachado" | "enviado" => {
                Self::EmTransito
            }
            "entregue" | "concluido" | "concluído" | "faturado" => Self::Entregue,
            "cancelado" | "cancelada" => Self::Cancelado,
            _ => Self::Desconhecido,
        }
    }

    /// pt-BR display text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::EmSeparacao => "Em separação",
            Self::EmTransito => "Em trânsito",
            Self::Entregue => "Entregue",
            Self::Cancelado => "Cancelado",
            Self::Desconhecido => "Desconhecido",
        }
    }

    #[must_use]
    pub const fn tone(&self) -> BadgeTone {
        match self {
            Self::Pendente => BadgeTone::Warning,
            Self::EmSeparacao | Self::EmTransito => BadgeTone::Info,
            Self::Entregue => BadgeTone::Success,
            Self::Cancelado => BadgeTone::Danger,
            Self::Desconhecido => BadgeTone::Neutral,
        }
    }

    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        StatusBadge { label: self.label().to_string(), tone: self.tone() }
    }
}
