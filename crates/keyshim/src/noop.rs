//! Inert binding used when secret-store access is disabled or unavailable

use crate::binding::{Credential, CredentialBinding};
use crate::error::{CredentialError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Drop-in stand-in for the native binding.
///
/// Reads report nothing stored and deletes report nothing deleted. Writes
/// fail with [`CredentialError::WriteDisabled`] so callers never believe a
/// secret was persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBinding;

impl NoopBinding {
    /// Create a new no-op binding
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialBinding for NoopBinding {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        debug!(service, account, "Secret store disabled, lookup returns nothing");
        Ok(None)
    }

    async fn set_password(&self, service: &str, account: &str, _password: &str) -> Result<()> {
        Err(CredentialError::WriteDisabled {
            service: service.to_string(),
            account: account.to_string(),
        })
    }

    async fn delete_password(&self, _service: &str, _account: &str) -> Result<bool> {
        Ok(false)
    }

    async fn find_credentials(&self, _service: &str) -> Result<Vec<Credential>> {
        Ok(Vec::new())
    }

    async fn find_password(&self, _service: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn binding_name(&self) -> &'static str {
        "noop"
    }
}
