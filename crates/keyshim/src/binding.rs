//! The credential binding capability set
//!
//! [`CredentialBinding`] mirrors the shape of a native keychain binding so the
//! native store, the no-op stand-in and the fallback decorator are
//! interchangeable behind `Arc<dyn CredentialBinding>`.

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// A stored credential returned by [`CredentialBinding::find_credentials`]
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    /// Account the password is stored under
    pub account: String,
    /// The stored secret
    pub password: String,
}

impl Credential {
    /// Create a new credential record
    #[must_use]
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Operations over a (service, account) keyed secret store.
///
/// Absence of a credential is reported as `Ok(None)` / `Ok(false)` / an empty
/// list. `Err` is reserved for a store that failed to answer.
#[async_trait]
pub trait CredentialBinding: Send + Sync {
    /// Look up the password stored for `service`/`account`.
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>>;

    /// Store `password` for `service`/`account`, replacing any existing value.
    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()>;

    /// Remove the credential; returns whether anything was deleted.
    async fn delete_password(&self, service: &str, account: &str) -> Result<bool>;

    /// List every credential stored under `service`.
    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>>;

    /// Return any one password stored under `service`.
    async fn find_password(&self, service: &str) -> Result<Option<String>>;

    /// Short identifier used in logs
    fn binding_name(&self) -> &'static str;
}

#[async_trait]
impl<T: CredentialBinding + ?Sized> CredentialBinding for Arc<T> {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        (**self).get_password(service, account).await
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()> {
        (**self).set_password(service, account, password).await
    }

    async fn delete_password(&self, service: &str, account: &str) -> Result<bool> {
        (**self).delete_password(service, account).await
    }

    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>> {
        (**self).find_credentials(service).await
    }

    async fn find_password(&self, service: &str) -> Result<Option<String>> {
        (**self).find_password(service).await
    }

    fn binding_name(&self) -> &'static str {
        (**self).binding_name()
    }
}

/// Acquires the real native binding at start-up.
///
/// Returning `Err` means the native store is not usable in this process.
pub trait BindingLoader {
    /// Attempt to load the native binding
    ///
    /// # Errors
    ///
    /// Returns the platform error when the native store cannot be reached.
    fn load(&self) -> Result<Arc<dyn CredentialBinding>>;
}

impl<F> BindingLoader for F
where
    F: Fn() -> Result<Arc<dyn CredentialBinding>>,
{
    fn load(&self) -> Result<Arc<dyn CredentialBinding>> {
        self()
    }
}
