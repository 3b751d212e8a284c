//! Port interface for registry lookups

use async_trait::async_trait;
use tropeiro_domain::{PartyRef, Result};

/// Read access to the registries the financial screens reference.
#[async_trait]
pub trait RegistryGateway: Send + Sync {
    /// Clients matching an optional search term (name or document).
    async fn clients(&self, busca: Option<&str>) -> Result<Vec<PartyRef>>;

    async fn suppliers(&self) -> Result<Vec<PartyRef>>;

    async fn carriers(&self) -> Result<Vec<PartyRef>>;
}
