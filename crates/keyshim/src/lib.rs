//! Credential lookups that widen to known alternate labels
//!
//! Wraps a native OS secret store (Keychain, Secret Service, Credential
//! Manager) behind the [`CredentialBinding`] trait. When a lookup under the
//! requested (service, account) pair finds nothing, the shim retries a list
//! of fallback labels: any supplied through `KEYSHIM_FALLBACK_LABELS`, then
//! the "Safe Storage" entries of Chromium-family browsers.
//!
//! Setting `KEYSHIM_DISABLE_KEYCHAIN=1` swaps the native store for an inert
//! [`NoopBinding`], which is also used when the native store fails to load
//! under CI.
//!
//! ```ignore
//! use keyshim::{CredentialBinding, CredentialShim};
//!
//! let shim = CredentialShim::from_env()?;
//! if let Some(key) = shim.get_password("Chrome Safe Storage", "Chrome").await? {
//!     // decrypt with `key`
//! }
//! ```

mod binding;
mod config;
mod error;
mod fallback;
mod label;
mod native;
mod noop;
mod selector;
mod shim;

pub use binding::{BindingLoader, Credential, CredentialBinding};
pub use config::{CI_VAR, DISABLE_VAR, FALLBACK_LABELS_VAR, ShimConfig, is_ci};
pub use error::{CredentialError, Result};
pub use fallback::FallbackBinding;
pub use label::{DEFAULT_LABELS, FallbackLabels, Label, fallback_labels};
pub use native::KeyringBinding;
pub use noop::NoopBinding;
pub use selector::select_binding;
pub use shim::CredentialShim;
