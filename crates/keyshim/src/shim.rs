//! The initialized credential shim

use crate::binding::{BindingLoader, Credential, CredentialBinding};
use crate::config::ShimConfig;
use crate::error::Result;
use crate::fallback::FallbackBinding;
use crate::label::{Label, fallback_labels};
use crate::native::KeyringBinding;
use crate::selector::select_binding;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Binding choice and fallback labels, resolved once at start-up.
///
/// Immutable after [`init`](Self::init); share it by reference or wrap it in
/// an `Arc`. Implements [`CredentialBinding`] with fallback-aware lookups.
#[derive(Clone)]
pub struct CredentialShim {
    binding: FallbackBinding<Arc<dyn CredentialBinding>>,
}

impl CredentialShim {
    /// Resolve the binding through `loader` and build the fallback labels.
    ///
    /// # Errors
    ///
    /// Returns the loader's error if the native store cannot be loaded and
    /// the configuration neither disables it nor marks the process as CI.
    pub fn init<L>(config: &ShimConfig, loader: &L) -> Result<Self>
    where
        L: BindingLoader + ?Sized,
    {
        let inner = select_binding(config, loader)?;
        let labels = fallback_labels(config.fallback_labels.as_deref());

        info!(
            binding = inner.binding_name(),
            fallback_labels = labels.len(),
            "Credential shim initialized"
        );

        Ok(Self {
            binding: FallbackBinding::new(inner, labels),
        })
    }

    /// Initialize from the process environment against the platform keychain.
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn from_env() -> Result<Self> {
        Self::init(&ShimConfig::from_env(), &KeyringBinding::load)
    }

    /// Fallback labels in lookup order
    #[must_use]
    pub fn fallback_labels(&self) -> &[Label] {
        self.binding.labels()
    }
}

impl std::fmt::Debug for CredentialShim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialShim")
            .field("binding", &self.binding.binding_name())
            .field("fallback_labels", &self.binding.labels())
            .finish()
    }
}

#[async_trait]
impl CredentialBinding for CredentialShim {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        self.binding.get_password(service, account).await
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()> {
        self.binding.set_password(service, account, password).await
    }

    async fn delete_password(&self, service: &str, account: &str) -> Result<bool> {
        self.binding.delete_password(service, account).await
    }

    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>> {
        self.binding.find_credentials(service).await
    }

    async fn find_password(&self, service: &str) -> Result<Option<String>> {
        self.binding.find_password(service).await
    }

    fn binding_name(&self) -> &'static str {
        self.binding.binding_name()
    }
}
