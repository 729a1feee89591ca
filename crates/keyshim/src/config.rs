//! Start-up configuration read from the process environment

/// Set to `1` to replace the native secret store with inert stand-ins
pub const DISABLE_VAR: &str = "KEYSHIM_DISABLE_KEYCHAIN";

/// JSON array of `{"service", "account"}` objects tried before the defaults
pub const FALLBACK_LABELS_VAR: &str = "KEYSHIM_FALLBACK_LABELS";

/// Generic CI indicator; permits running without a native secret store
pub const CI_VAR: &str = "CI";

/// Configuration consumed by [`CredentialShim::init`](crate::CredentialShim::init)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShimConfig {
    /// Use the no-op binding without attempting the native store
    pub disabled: bool,
    /// Running under CI: a native store load failure is tolerated
    pub ci: bool,
    /// Raw JSON value of the fallback labels variable
    pub fallback_labels: Option<String>,
}

impl ShimConfig {
    /// Create a configuration with everything off
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            disabled: std::env::var(DISABLE_VAR).is_ok_and(|v| v == "1"),
            ci: is_ci(),
            fallback_labels: std::env::var(FALLBACK_LABELS_VAR).ok(),
        }
    }

    /// Force the no-op binding on or off
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark the process as running under CI
    #[must_use]
    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Set the raw fallback labels JSON
    #[must_use]
    pub fn with_fallback_labels(mut self, raw: impl Into<String>) -> Self {
        self.fallback_labels = Some(raw.into());
        self
    }
}

/// Check whether the `CI` indicator is set to a truthy value.
///
/// Any non-empty value other than `0` or `false` counts.
#[must_use]
pub fn is_ci() -> bool {
    std::env::var(CI_VAR)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}
