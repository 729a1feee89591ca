//! Shared test bindings

#![allow(dead_code)]

use async_trait::async_trait;
use keyshim::{Credential, CredentialBinding, CredentialError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory binding that records every `get_password` call
#[derive(Default)]
pub struct RecordingBinding {
    store: Mutex<HashMap<(String, String), String>>,
    gets: Mutex<Vec<(String, String)>>,
}

impl RecordingBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, service: &str, account: &str, secret: &str) -> Self {
        self.store
            .lock()
            .unwrap()
            .insert((service.to_string(), account.to_string()), secret.to_string());
        self
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn gets(&self) -> Vec<(String, String)> {
        self.gets.lock().unwrap().clone()
    }

    pub fn into_loader(
        self: Arc<Self>,
    ) -> impl Fn() -> Result<Arc<dyn CredentialBinding>> {
        move || Ok(Arc::clone(&self) as Arc<dyn CredentialBinding>)
    }
}

#[async_trait]
impl CredentialBinding for RecordingBinding {
    async fn get_password(&self, service: &str, account: &str) -> Result<Option<String>> {
        let key = (service.to_string(), account.to_string());
        self.gets.lock().unwrap().push(key.clone());
        Ok(self.store.lock().unwrap().get(&key).cloned())
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> Result<()> {
        self.store
            .lock()
            .unwrap()
            .insert((service.to_string(), account.to_string()), password.to_string());
        Ok(())
    }

    async fn delete_password(&self, service: &str, account: &str) -> Result<bool> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .remove(&(service.to_string(), account.to_string()))
            .is_some())
    }

    async fn find_credentials(&self, service: &str) -> Result<Vec<Credential>> {
        let store = self.store.lock().unwrap();
        let mut found: Vec<Credential> = store
            .iter()
            .filter(|((s, _), _)| s == service)
            .map(|((_, account), password)| Credential::new(account.clone(), password.clone()))
            .collect();
        found.sort_by(|a, b| a.account.cmp(&b.account));
        Ok(found)
    }

    async fn find_password(&self, service: &str) -> Result<Option<String>> {
        Ok(self
            .find_credentials(service)
            .await?
            .into_iter()
            .next()
            .map(|c| c.password))
    }

    fn binding_name(&self) -> &'static str {
        "recording"
    }
}

/// Loader standing in for a platform store that cannot be opened
pub fn unavailable_loader() -> Result<Arc<dyn CredentialBinding>> {
    Err(CredentialError::unavailable("org.freedesktop.secrets was not provided"))
}
