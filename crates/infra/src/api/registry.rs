//! Registry adapter
//!
//! Lookup lists for the selection widgets: clients (with free-text search),
//! suppliers and carriers. All three answer the same party shape.

use std::sync::Arc;

use async_trait::async_trait;
use tropeiro_core::RegistryGateway;
use tropeiro_domain::{PartyRef, Result};

use crate::api::client::ErpClient;

/// Adapter over the `/clientes`, `/fornecedores` and `/transportadoras`
/// endpoints.
#[derive(Clone)]
pub struct RegistryApi {
    client: Arc<ErpClient>,
}

impl RegistryApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistryGateway for RegistryApi {
    async fn clients(&self, busca: Option<&str>) -> Result<Vec<PartyRef>> {
        match busca.map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => {
                self.client.get_with_query("/clientes", &[("busca", text.to_string())]).await
            }
            None => self.client.get("/clientes").await,
        }
    }

    async fn suppliers(&self) -> Result<Vec<PartyRef>> {
        self.client.get("/fornecedores").await
    }

    async fn carriers(&self) -> Result<Vec<PartyRef>> {
        self.client.get("/transportadoras").await
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the registry adapter.
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::auth::MemoryTokenStore;
    use crate::api::client::ErpClientConfig;

    fn api_for(server: &MockServer) -> RegistryApi {
        let config = ErpClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            max_attempts: 1,
        };
        let client = ErpClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
        RegistryApi::new(Arc::new(client))
    }

    /// Validates the client search scenario.
    ///
    /// Assertions:
    /// - Confirms the trimmed search text travels as the `busca` parameter.
    /// - Confirms the list decodes into parties.
    #[tokio::test]
    async fn client_search_sends_trimmed_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .and(query_param("busca", "boa vista"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 12, "nome": "Fazenda Boa Vista", "documento": "12.345.678/0001-90" },
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let parties = api_for(&server).clients(Some("  boa vista  ")).await.unwrap();

        assert_eq!(parties.len(), 1);
        assert_eq!(parties[0].nome, "Fazenda Boa Vista");
    }

    /// Blank search text falls back to the unfiltered list.
    #[tokio::test]
    async fn blank_search_lists_all_clients() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let parties = api_for(&server).clients(Some("   ")).await.unwrap();
        assert!(parties.is_empty());
    }

    #[tokio::test]
    async fn suppliers_and_carriers_share_the_party_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fornecedores"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 3, "nome": "Distribuidora Central" },
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transportadoras"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 8, "nome": "Transportes Rápido" },
            ])))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let suppliers = api.suppliers().await.unwrap();
        let carriers = api.carriers().await.unwrap();

        assert_eq!(suppliers[0].nome, "Distribuidora Central");
        assert_eq!(carriers[0].id, 8);
        assert!(carriers[0].documento.is_none());
    }
}
