//! Order (pedido) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::status::OrderStatus;

/// Reference to a registry party (client, supplier or carrier).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartyRef {
    pub id: i64,
    pub nome: String,
    /// CPF or CNPJ, digits only; formatting is a presentation concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documento: Option<String>,
}

/// Payment terms agreed on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTerms {
    AVista,
    Parcelado,
    NotaDescontada,
    #[default]
    #[serde(other)]
    Desconhecida,
}

impl PaymentTerms {
    /// pt-BR display text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AVista => "À vista",
            Self::Parcelado => "Parcelado",
            Self::NotaDescontada => "Nota descontada",
            Self::Desconhecida => "Não informada",
        }
    }
}

/// Sales order as the financial screens consume it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub numero: String,
    pub cliente: PartyRef,
    pub valor_total: Money,
    pub condicao: PaymentTerms,
    /// Present when `condicao` is `PARCELADO`.
    #[serde(default)]
    pub qtd_parcelas: Option<u32>,
    pub criado_em: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
}
