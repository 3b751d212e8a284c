//! Payment (pagamento) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;
use crate::money::Money;
use crate::types::status::TitleStatus;

/// Settlement method for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Dinheiro,
    Pix,
    Cartao,
    Boleto,
    Cheque,
    Transferencia,
    #[default]
    #[serde(other)]
    Outro,
}

impl_domain_status_conversions!(PaymentMethod {
    Dinheiro => "dinheiro",
    Pix => "pix",
    Cartao => "cartao",
    Boleto => "boleto",
    Cheque => "cheque",
    Transferencia => "transferencia",
    Outro => "outro",
});

/// Cheque attached to a payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cheque {
    pub numero: String,
    pub banco: String,
    pub valor: Money,
    /// Post-dated cheques carry their clearing date.
    #[serde(default)]
    pub bom_para: Option<NaiveDate>,
}

/// A payment already registered on a title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub valor: Money,
    #[serde(default)]
    pub juros: Money,
    #[serde(default)]
    pub multa: Money,
    #[serde(default)]
    pub desconto: Money,
    pub data: NaiveDate,
    pub metodo: PaymentMethod,
    #[serde(default)]
    pub estornado: bool,
    #[serde(default)]
    pub cheques: Vec<Cheque>,
}

impl Payment {
    /// Net amount applied to the title: paid + interest + fine − discount.
    #[must_use]
    pub fn valor_liquido(&self) -> Money {
        self.valor + self.juros + self.multa - self.desconto
    }
}

/// Client-side draft of a payment registration.
///
/// The correlation id rides in a header so a duplicate submission (double
/// click, flaky network) lands as the same operation on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentDraft {
    pub titulo_id: i64,
    pub valor_pago: Money,
    #[serde(default)]
    pub juros: Money,
    #[serde(default)]
    pub multa: Money,
    #[serde(default)]
    pub desconto: Money,
    pub data_pagamento: NaiveDate,
    pub metodo: PaymentMethod,
    #[serde(default)]
    pub cheques: Vec<Cheque>,
    pub correlacao: Uuid,
}

impl PaymentDraft {
    #[must_use]
    pub fn new(
        titulo_id: i64,
        valor_pago: Money,
        data_pagamento: NaiveDate,
        metodo: PaymentMethod,
    ) -> Self {
        Self {
            titulo_id,
            valor_pago,
            juros: Money::ZERO,
            multa: Money::ZERO,
            desconto: Money::ZERO,
            data_pagamento,
            metodo,
            cheques: Vec::new(),
            correlacao: Uuid::new_v4(),
        }
    }

    /// Net amount that will be applied to the title.
    #[must_use]
    pub fn valor_liquido(&self) -> Money {
        self.valor_pago + self.juros + self.multa - self.desconto
    }

    /// Sum of the attached cheques' face values.
    #[must_use]
    pub fn total_cheques(&self) -> Money {
        self.cheques.iter().map(|cheque| cheque.valor).sum()
    }
}

/// Backend acknowledgement of a registered payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentReceipt {
    pub pagamento_id: i64,
    pub titulo_id: i64,
    pub valor_liquidado: Money,
    pub novo_status: TitleStatus,
    #[serde(default)]
    pub mensagem: Option<String>,
}
