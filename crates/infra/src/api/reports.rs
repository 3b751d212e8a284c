//! Report download adapter
//!
//! Fetches generated report files (PDF in practice) as raw bytes. Downloads
//! go straight to the caller and are never cached: the backend regenerates
//! the file per request and the payloads are too large for the query cache.

use std::sync::Arc;

use tropeiro_domain::{ClientId, Result};

use crate::api::client::{ErpClient, ReportDownload};

/// Adapter over the `/relatorios` endpoints.
#[derive(Clone)]
pub struct ReportsApi {
    client: Arc<ErpClient>,
}

impl ReportsApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// Download the receivables report, optionally scoped to one client.
    pub async fn receivables_report(&self, client_id: Option<ClientId>) -> Result<ReportDownload> {
        let query = match client_id {
            Some(id) => vec![("cliente_id", id.to_string())],
            None => Vec::new(),
        };
        self.client.fetch_bytes("/relatorios/recebiveis", &query).await
    }
}
