use std::{error::Error, sync::Arc};

use thiserror::Error;

use crate::{Key, ServiceType};

/// The error type produced by service resolution.
///
/// [`NotFound`](ResolveError::NotFound) is recoverable by design: the
/// `resolve_option` family reports it as `Ok(None)` instead. Every other
/// variant describes a real resolution failure and is surfaced as an error
/// by both API flavors.
#[derive(Clone, Debug, Error)]
pub enum ResolveError {
    /// No registration exists for the requested key.
    #[error("no service registered for {key}")]
    NotFound {
        /// The key that was requested.
        key: Key,
    },

    /// A scoped registration was resolved without an active scope.
    #[error("scoped service {key} resolved outside of a scope")]
    OutOfScope {
        /// The key of the scoped registration.
        key: Key,
    },

    /// A declared dependency of a factory could not be resolved.
    ///
    /// Wraps the underlying cause, preserving the full failure chain
    /// through [`Error::source`].
    #[error("{requesting} depends on {missing}, which failed to resolve")]
    Dependency {
        /// The type whose factory declared the dependency.
        requesting: ServiceType,
        /// The dependency type that failed to resolve.
        missing: ServiceType,
        /// The underlying failure.
        #[source]
        source: Arc<ResolveError>,
    },

    /// A fallible factory returned an error.
    #[error("factory for {produced} returned an error")]
    Factory {
        /// The type the factory produces.
        produced: ServiceType,
        /// The error returned by the factory.
        #[source]
        source: Arc<dyn Error + Send + Sync>,
    },

    /// A registration depends on itself, directly or transitively.
    #[error("cyclic dependency detected: {}", format_chain(.chain))]
    Cycle {
        /// The chain of keys on the resolution stack, ending with the
        /// key that was re-entered.
        chain: Vec<Key>,
    },

    /// The global provider was accessed before [`global::init`](crate::global::init).
    #[error("service provider has not been built")]
    NotBuilt,
}

impl ResolveError {
    /// Returns true if the error is [`NotFound`](ResolveError::NotFound).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }

    /// Returns the innermost cause of a nested dependency failure.
    pub fn root_cause(&self) -> &ResolveError {
        match self {
            ResolveError::Dependency { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}

fn format_chain(chain: &[Key]) -> String {
    let mut buf = String::with_capacity(1024);

    buf.push('[');
    buf.push('\n');

    let repeated = chain.last();

    chain.iter().for_each(|key| {
        if repeated == Some(key) {
            buf.push_str(" --> ");
        } else {
            buf.push_str("     ");
        }

        buf.push_str(format!("{}", key).as_str());
        buf.push('\n');
    });

    buf.push(']');

    buf
}
