//! Native OS secret store backed by the `keyring` crate
//!
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring / KWallet)
//! - Windows: Credential Manager
//!
//! `keyring` has no enumeration API, so the find operations search the
//! platform store with `keyring-search` and read each hit back through
//! `keyring`. All of these calls block, so each one runs on the blocking
//! thread pool.

use crate::binding::{Credential, CredentialBinding};
use crate::error::{CredentialError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Label looked up once to confirm the platform store answers
const SENTINEL_SERVICE: &str = "keyshim";
const SENTINEL_ACCOUNT: &str = "availability-check";

/// Search attributes naming the service, per platform store
const SERVICE_ATTRIBUTES: [&str; 3] = ["svce", "service", "Service"];

/// Search attributes naming the account, per platform store
const ACCOUNT_ATTRIBUTES: [&str; 5] = ["acct", "username", "user", "UserName", "account"];

/// Account placeholder in errors raised by service-wide searches
const ANY_ACCOUNT: &str = "*";

/// Binding over the platform keychain
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringBinding;

impl KeyringBinding {
    /// Create a new keyring binding without probing the store
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Load the native binding, confirming the platform store is reachable.
    ///
    /// A sentinel lookup that finds nothing still proves the store answers.
    /// This blocks on the platform store, so async callers should run it on
    /// the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Unavailable`] if the platform store cannot
    /// be opened or refuses access.
    pub fn load() -> Result<Arc<dyn CredentialBinding>> {
        let entry = keyring::Entry::new(SENTINEL_SERVICE, SENTINEL_ACCOUNT)
            .map_err(|e| CredentialError::unavailable(e.to_string()))?;

        match entry.get_password() {
            Ok(_) | Err(keyring::Error::NoEntry) => {
                info!("Native secret store loaded");
                Ok(Arc::new(Self::new()))
            }
            Err(
                e @ (keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_)),
            ) => Err(CredentialError::unavailable(e.to_string())),
            // The store answered, just not with a clean value.
            Err(e) => {
                debug!(
                    error = %e,
                    "Sentinel lookup returned an unexpected answer, store is reachable"
                );
                Ok(Arc::new(Self::new()))
            }
        }
    }
}

/// Run a blocking closure on the blocking thread pool
async fn run_blocking<T, F>(op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| CredentialError::TaskFailed {
            message: e.to_string(),
        })
}

/// Run a blocking keyring call for one (service, account) pair
async fn with_entry<T, F>(service: &str, account: &str, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&keyring::Entry) -> keyring::Result<T> + Send + 'static,
{
    let service_owned = service.to_string();
    let account_owned = account.to_string();

    let outcome = run_blocking(move || {
        keyring::Entry::new(&service_owned, &account_owned).and_then(|entry| op(&entry))
    })
    .await?;

    outcome.map_err(|e| CredentialError::backend(service, account, e.to_string()))
}

/// First attribute value present under any of `keys`
fn attribute<'a>(attributes: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| attributes.get(*key))
        .map(String::as_str)
}

/// Accounts stored under exactly `service`, sorted and deduplicated.
///
/// Hits that carry a service attribute for a different service are dropped,
/// since platform searches may match on substrings.
fn accounts_from_hits(
    service: &str,
    hits: &HashMap<String, HashMap<String, String>>,
) -> Vec<String> {
    let mut accounts: Vec<String> = hits
        .values()
        .filter(|attributes| {
            attribute(attributes, &SERVICE_ATTRIBUTES).is_none_or(|found| found == service)
        })
        .filter_map(|attributes| attribute(attributes, &ACCOUNT_ATTRIBUTES))
        .filter(|account| !account.is_empty())
        .map(str::to_string)
        .collect();
    accounts.sort();
    accounts.dedup();
    accounts
}

/// Search the platform store for `service` and read back every password
fn search_service(service: &str) -> Result<Vec<Credential>> {
    let search = keyring_search::Search::new()
        .map_err(|e| CredentialError::backend(service, ANY_ACCOUNT, e.to_string()))?;

    let hits = match search.by_service(service) {
        Ok(hits) => hits,
        Err(keyring_search::Error::NoResults) => return Ok(Vec::new()),
        Err(e) => return Err(CredentialError::backend(service, ANY_ACCOUNT, e.to_string())),
    };

    let mut credentials = Vec::new();
    for account in accounts_from_hits(service, &hits) {
        let entry = keyring::Entry::new(service, &account)
            .map_err(|e| CredentialError::backend(service, &account, e.to_string()))?;
        match entry.get_password() {
            Ok(password) => credentials.push(Credential::new(account, password)),
            // Removed between the search and the read.
            Err(keyring::Error::NoEntry) => {}
            Err(e) => return Err(CredentialError::backend(service, &account, e.to_string())),
        }
    }

    debug!(service, found = credentials.len(), "Searched native secret store");
    Ok(credentials)
}

#[async_trait]
impl CredentialBinding for KeyringBinding {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        with_entry(service, account, |entry| match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()> {
        let password = password.to_string();
        with_entry(service, account, move |entry| entry.set_password(&password)).await
    }

    async fn delete_password(&self, service: &str, account: &str) -> Result<bool> {
        with_entry(service, account, |entry| match entry.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(e),
        })
        .await
    }

    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>> {
        let service = service.to_string();
        run_blocking(move || search_service(&service)).await?
    }

    async fn find_password(&self, service: &str) -> Result<Option<String>> {
        let credentials = self.find_credentials(service).await?;
        Ok(credentials.into_iter().next().map(|c| c.password))
    }

    fn binding_name(&self) -> &'static str {
        "keyring"
    }
}
