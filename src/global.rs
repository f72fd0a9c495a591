//! An optional process-wide provider for the application entry point.
//!
//! The core never touches this state: every [`ServiceProvider`] is an
//! explicitly constructed object passed by reference. This module is a thin
//! convenience for binaries that want one provider for the whole process,
//! installed once at startup.
//!
//! # Example
//!
//! ```rust
//! use wireup::{global, singleton, ServiceCollection};
//!
//! struct App;
//!
//! let mut services = ServiceCollection::new();
//! services.add(singleton(|| App));
//!
//! global::init(services.build());
//!
//! let provider = global::provider().unwrap();
//! assert!(provider.contains::<App>());
//! ```

use std::sync::OnceLock;

use crate::{ResolveError, ServiceProvider};

static GLOBAL: OnceLock<ServiceProvider> = OnceLock::new();

/// Installs the process-wide provider.
///
/// # Panics
///
/// - Panics if a provider has already been installed.
pub fn init(provider: ServiceProvider) {
    if GLOBAL.set(provider).is_err() {
        panic!("global service provider already initialized");
    }
}

/// Returns the process-wide provider.
///
/// Fails with [`ResolveError::NotBuilt`] if [`init`] has not been called.
pub fn provider() -> Result<&'static ServiceProvider, ResolveError> {
    GLOBAL.get().ok_or(ResolveError::NotBuilt)
}

/// Returns the process-wide provider, or `None` if [`init`] has not been
/// called.
pub fn try_provider() -> Option<&'static ServiceProvider> {
    GLOBAL.get()
}
