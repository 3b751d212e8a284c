//! Legacy-generation financial adapter
//!
//! Fallback source for the order financial summary, kept alive until every
//! backend finishes migrating off the old `/financeiro` surface. Amounts
//! arrive as bare numbers that are reais by contract, and statuses as the
//! mixed-case Portuguese labels the legacy generation emits.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tropeiro_core::SummarySource;
use tropeiro_domain::{FinancialFigures, Money, OrderId, Result};

use crate::api::client::ErpClient;
use crate::api::financial::summary_status;

/// Adapter over the legacy `/financeiro/pedidos/{id}` endpoint.
#[derive(Clone)]
pub struct LegacyFinancialApi {
    client: Arc<ErpClient>,
}

impl LegacyFinancialApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

/// Envelope the legacy endpoint wraps its answer in.
#[derive(Debug, Deserialize)]
struct LegacyEnvelopeDto {
    #[serde(default)]
    resumo_financeiro: Option<LegacyResumoDto>,
}

/// Legacy summary payload. Bare numbers, reais by contract.
#[derive(Debug, Deserialize)]
struct LegacyResumoDto {
    #[serde(default)]
    valor_total: Option<Money>,
    #[serde(default)]
    valor_pago: Option<Money>,
    #[serde(default)]
    valor_em_aberto: Option<Money>,
    #[serde(default)]
    situacao: Option<String>,
}

impl LegacyResumoDto {
    fn into_figures(self) -> FinancialFigures {
        FinancialFigures {
            valor_total: self.valor_total,
            valor_pago: self.valor_pago,
            valor_em_aberto: self.valor_em_aberto,
            status: self.situacao.as_deref().and_then(summary_status),
        }
    }
}

#[async_trait]
impl SummarySource for LegacyFinancialApi {
    async fn order_figures(&self, order_id: OrderId) -> Result<Option<FinancialFigures>> {
        let path = format!("/financeiro/pedidos/{order_id}");
        let envelope: Option<LegacyEnvelopeDto> = self.client.get_optional(&path).await?;
        Ok(envelope.and_then(|dto| dto.resumo_financeiro).map(LegacyResumoDto::into_figures))
    }

    fn source_name(&self) -> &'static str {
        "legado"
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the legacy adapter.
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::auth::MemoryTokenStore;
    use crate::api::client::ErpClientConfig;
    use tropeiro_domain::TitleStatus;

    fn api_for(server: &MockServer) -> LegacyFinancialApi {
        let config = ErpClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            max_attempts: 1,
        };
        let client = ErpClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
        LegacyFinancialApi::new(Arc::new(client))
    }

    /// Validates the legacy summary decode scenario.
    ///
    /// Assertions:
    /// - Confirms bare numbers decode as reais, untouched by any unit math.
    /// - Confirms the mixed-case legacy token translates to the canonical
    ///   status.
    #[tokio::test]
    async fn legacy_summary_decodes_bare_reais_and_legacy_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/financeiro/pedidos/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resumo_financeiro": {
                    "valor_total": 1500.0,
                    "valor_pago": 500.0,
                    "valor_em_aberto": 1000.0,
                    "situacao": "Pago Parcial",
                },
            })))
            .mount(&server)
            .await;

        let figures = api_for(&server).order_figures(42).await.unwrap().unwrap();

        assert_eq!(figures.valor_total, Some(Money::from(1500)));
        assert_eq!(figures.valor_pago, Some(Money::from(500)));
        assert_eq!(figures.valor_em_aberto, Some(Money::from(1000)));
        assert_eq!(figures.status, Some(TitleStatus::ParcialmentePaga));
    }

    /// Validates the hollow-envelope scenario: a 200 without the
    /// `resumo_financeiro` key still answers `None`.
    #[tokio::test]
    async fn legacy_summary_treats_hollow_envelope_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/financeiro/pedidos/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        assert!(api_for(&server).order_figures(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn legacy_summary_answers_none_on_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/financeiro/pedidos/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(api_for(&server).order_figures(404).await.unwrap().is_none());
    }
}
