//! Payment registration adapter
//!
//! Posts payment registrations to the backend. Built over a single-attempt
//! client: a payment post is a money mutation and must never be replayed by
//! a retry loop. Recovery from an ambiguous outcome goes through the
//! correlation id, which the backend uses to deduplicate resubmissions.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tropeiro_core::PaymentGateway;
use tropeiro_domain::{Cheque, Money, PaymentDraft, PaymentMethod, PaymentReceipt, Result};

use crate::api::client::ErpClient;

/// Adapter over `POST /duplicatas/{id}/pagamentos`.
#[derive(Clone)]
pub struct PaymentsApi {
    client: Arc<ErpClient>,
}

impl PaymentsApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

/// Wire body of the registration. The title id rides in the path and the
/// correlation id in the `X-Correlacao` header, so neither repeats here.
#[derive(Debug, Serialize)]
struct RegistroPagamentoDto<'a> {
    valor_pago: Money,
    juros: Money,
    multa: Money,
    desconto: Money,
    data_pagamento: NaiveDate,
    metodo: PaymentMethod,
    cheques: &'a [Cheque],
}

impl<'a> From<&'a PaymentDraft> for RegistroPagamentoDto<'a> {
    fn from(draft: &'a PaymentDraft) -> Self {
        Self {
            valor_pago: draft.valor_pago,
            juros: draft.juros,
            multa: draft.multa,
            desconto: draft.desconto,
            data_pagamento: draft.data_pagamento,
            metodo: draft.metodo,
            cheques: &draft.cheques,
        }
    }
}

#[async_trait]
impl PaymentGateway for PaymentsApi {
    async fn register(&self, draft: &PaymentDraft) -> Result<PaymentReceipt> {
        let path = format!("/duplicatas/{}/pagamentos", draft.titulo_id);
        let body = RegistroPagamentoDto::from(draft);
        self.client.post_idempotent(&path, &body, draft.correlacao).await
    }
}
