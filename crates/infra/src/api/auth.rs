//! Bearer token injection for ERP requests
//!
//! Login lives in the shells; this layer only needs a seam that answers the
//! current token. `None` means anonymous, which the connectivity probe and
//! tests rely on.

use async_trait::async_trait;
use parking_lot::RwLock;
use tropeiro_domain::Result;

/// Trait for providing the Bearer token attached to ERP requests
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` for anonymous requests.
    async fn bearer_token(&self) -> Result<Option<String>>;
}

/// In-memory token store fed by the shell after login.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

#[async_trait]
impl TokenProvider for MemoryTokenStore {
    async fn bearer_token(&self) -> Result<Option<String>> {
        Ok(self.token.read().clone())
    }
}
