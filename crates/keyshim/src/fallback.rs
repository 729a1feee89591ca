//! Fallback-aware lookups
//!
//! [`FallbackBinding`] decorates another [`CredentialBinding`]. Only
//! `get_password` changes: when the requested label misses, each fallback
//! label is tried in order until one returns a non-empty secret. Every other
//! operation is forwarded unchanged.

use crate::binding::{Credential, CredentialBinding};
use crate::error::Result;
use crate::label::Label;
use async_trait::async_trait;
use tracing::{debug, info};

/// Decorator that retries missed lookups under alternate labels
#[derive(Debug, Clone)]
pub struct FallbackBinding<B> {
    inner: B,
    labels: Vec<Label>,
}

impl<B: CredentialBinding> FallbackBinding<B> {
    /// Wrap `inner`, trying `labels` in order after an exact-match miss
    #[must_use]
    pub fn new(inner: B, labels: Vec<Label>) -> Self {
        Self { inner, labels }
    }

    /// The fallback labels, in lookup order
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The wrapped binding
    #[must_use]
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

/// Empty secrets count as a miss
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|secret| !secret.is_empty())
}

#[async_trait]
impl<B: CredentialBinding> CredentialBinding for FallbackBinding<B> {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        if let Some(secret) = non_empty(self.inner.get_password(service, account).await?) {
            return Ok(Some(secret));
        }

        for label in &self.labels {
            if label.matches(service, account) {
                continue;
            }

            debug!(
                requested_service = service,
                requested_account = account,
                fallback = %label,
                "Trying fallback label"
            );

            if let Some(secret) =
                non_empty(self.inner.get_password(&label.service, &label.account).await?)
            {
                info!(
                    requested_service = service,
                    requested_account = account,
                    fallback = %label,
                    "Resolved credential through fallback label"
                );
                return Ok(Some(secret));
            }
        }

        debug!(service, account, "No credential found under any label");
        Ok(None)
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()> {
        self.inner.set_password(service, account, password).await
    }

    async fn delete_password(&self, service: &str, account: &str) -> Result<bool> {
        self.inner.delete_password(service, account).await
    }

    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>> {
        self.inner.find_credentials(service).await
    }

    async fn find_password(&self, service: &str) -> Result<Option<String>> {
        self.inner.find_password(service).await
    }

    fn binding_name(&self) -> &'static str {
        self.inner.binding_name()
    }
}
