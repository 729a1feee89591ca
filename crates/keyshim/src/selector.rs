//! Choice between the native binding and the no-op stand-in

use crate::binding::{BindingLoader, CredentialBinding};
use crate::config::ShimConfig;
use crate::error::Result;
use crate::noop::NoopBinding;
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the binding used for the rest of the process.
///
/// - disabled: the no-op binding, `loader` is never called
/// - loader succeeds: the loaded binding
/// - loader fails under CI: the no-op binding
/// - loader fails otherwise: the loader's error
///
/// # Errors
///
/// Returns the loader's error when the native store cannot be loaded outside CI.
pub fn select_binding<L>(config: &ShimConfig, loader: &L) -> Result<Arc<dyn CredentialBinding>>
where
    L: BindingLoader + ?Sized,
{
    if config.disabled {
        info!("Secret-store access disabled, using no-op binding");
        return Ok(Arc::new(NoopBinding::new()));
    }

    match loader.load() {
        Ok(binding) => Ok(binding),
        Err(e) if config.ci => {
            warn!(error = %e, "Native secret store unavailable in CI, using no-op binding");
            Ok(Arc::new(NoopBinding::new()))
        }
        Err(e) => Err(e),
    }
}
