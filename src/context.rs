use std::{
    any,
    borrow::Cow,
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use crate::{
    descriptor::{DynDescriptor, Payload},
    factory::{ErasedFactory, ErasedInstance},
    scope::{Scope, ScopeState},
    Definition, Key, Lifetime, ResolveError,
};

pub(crate) type Slot = OnceLock<Result<ErasedInstance, ResolveError>>;

struct Entry {
    definition: Definition,
    payload: Payload,
    // Memo slot for the root provider; only singleton entries ever use it.
    slot: Slot,
}

/// The frozen registry a provider resolves against. Read-only after build.
pub(crate) struct ResolverCore {
    entries: Vec<Entry>,
    // Key -> entry indices, in registration order.
    index: HashMap<Key, Vec<usize>>,
    scoped: Vec<usize>,
}

impl ResolverCore {
    pub(crate) fn from_descriptors(descriptors: Vec<DynDescriptor>) -> Self {
        let mut index: HashMap<Key, Vec<usize>> = HashMap::with_capacity(descriptors.len());
        let mut scoped = Vec::new();

        let entries = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, descriptor)| {
                let (definition, payload) = descriptor.into_parts();

                index.entry(definition.key.clone()).or_default().push(i);

                if definition.lifetime == Lifetime::Scoped {
                    scoped.push(i);
                }

                Entry {
                    definition,
                    payload,
                    slot: OnceLock::new(),
                }
            })
            .collect();

        Self {
            entries,
            index,
            scoped,
        }
    }

    pub(crate) fn contains(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn scoped_indices(&self) -> &[usize] {
        &self.scoped
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The context a single resolution call runs in.
///
/// Carries the frozen registry, the active scope (if any) and the chain of
/// keys currently being resolved on this call stack. Passed to
/// [`Dependency::resolve`](crate::Dependency::resolve) implementations;
/// there is no way to construct one outside the crate.
pub struct ResolveContext<'a> {
    core: &'a ResolverCore,
    scope: Option<&'a ScopeState>,
    chain: Vec<Key>,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(core: &'a ResolverCore, scope: Option<&'a ScopeState>) -> Self {
        Self {
            core,
            scope,
            chain: Vec::new(),
        }
    }
}

pub(crate) fn downcast<T: Send + Sync + 'static>(instance: ErasedInstance) -> Arc<T> {
    match instance.downcast::<T>() {
        Ok(typed) => typed,
        // A registration for T always stores a T; the typed binding
        // functions are the only way to construct one.
        Err(_) => unreachable!("registration produced a value that is not a {}", any::type_name::<T>()),
    }
}

/// Single-value lookup: last-registered wins. Absent key is `Ok(None)`.
pub(crate) fn resolve_key(
    cx: &mut ResolveContext<'_>,
    key: &Key,
) -> Result<Option<ErasedInstance>, ResolveError> {
    let core = cx.core;

    let Some(indices) = core.index.get(key) else {
        return Ok(None);
    };

    let Some(&last) = indices.last() else {
        return Ok(None);
    };

    resolve_entry(cx, last).map(Some)
}

/// Multi-binding lookup: every registration under the key, in registration
/// order. Fails fast on the first element that fails to resolve.
pub(crate) fn resolve_all_key(
    cx: &mut ResolveContext<'_>,
    key: &Key,
) -> Result<Vec<ErasedInstance>, ResolveError> {
    let core = cx.core;

    let Some(indices) = core.index.get(key) else {
        return Ok(Vec::new());
    };

    let mut instances = Vec::with_capacity(indices.len());

    for &index in indices {
        instances.push(resolve_entry(cx, index)?);
    }

    Ok(instances)
}

fn resolve_entry(cx: &mut ResolveContext<'_>, index: usize) -> Result<ErasedInstance, ResolveError> {
    let core = cx.core;
    let entry = &core.entries[index];

    let factory = match &entry.payload {
        Payload::Instance(instance) => return Ok(Arc::clone(instance)),
        Payload::Factory(factory) => factory,
    };

    let key = &entry.definition.key;

    if cx.chain.contains(key) {
        let mut chain = cx.chain.clone();
        chain.push(key.clone());
        return Err(ResolveError::Cycle { chain });
    }

    match entry.definition.lifetime {
        Lifetime::Transient => invoke(cx, key, factory),
        Lifetime::Singleton => {
            let chain = cx.chain.clone();

            entry
                .slot
                .get_or_init(|| {
                    // Singleton dependencies resolve against the root only,
                    // so a singleton can never capture a scoped instance.
                    let mut child = ResolveContext {
                        core,
                        scope: None,
                        chain,
                    };
                    invoke(&mut child, key, factory)
                })
                .clone()
        }
        Lifetime::Scoped => {
            let Some(scope) = cx.scope else {
                return Err(ResolveError::OutOfScope { key: key.clone() });
            };

            let chain = cx.chain.clone();

            scope
                .slot(index)
                .get_or_init(|| {
                    let mut child = ResolveContext {
                        core,
                        scope: Some(scope),
                        chain,
                    };
                    invoke(&mut child, key, factory)
                })
                .clone()
        }
    }
}

fn invoke(
    cx: &mut ResolveContext<'_>,
    key: &Key,
    factory: &ErasedFactory,
) -> Result<ErasedInstance, ResolveError> {
    cx.chain.push(key.clone());
    let outcome = factory(cx);
    cx.chain.pop();
    outcome
}

pub(crate) fn resolve_single<T: Send + Sync + 'static>(
    core: &ResolverCore,
    scope: Option<&ScopeState>,
    key: &Key,
) -> Result<Option<Arc<T>>, ResolveError> {
    let mut cx = ResolveContext::new(core, scope);
    Ok(resolve_key(&mut cx, key)?.map(downcast::<T>))
}

pub(crate) fn resolve_required<T: Send + Sync + 'static>(
    core: &ResolverCore,
    scope: Option<&ScopeState>,
    key: Key,
) -> Result<Arc<T>, ResolveError> {
    match resolve_single(core, scope, &key)? {
        Some(instance) => Ok(instance),
        None => Err(ResolveError::NotFound { key }),
    }
}

pub(crate) fn resolve_many<T: Send + Sync + 'static>(
    core: &ResolverCore,
    scope: Option<&ScopeState>,
    key: &Key,
) -> Result<Vec<Arc<T>>, ResolveError> {
    let mut cx = ResolveContext::new(core, scope);

    Ok(resolve_all_key(&mut cx, key)?
        .into_iter()
        .map(downcast::<T>)
        .collect())
}

/// The root resolution context, built once from a
/// [`ServiceCollection`](crate::ServiceCollection).
///
/// Cheap to clone and safe to share across threads: all clones resolve
/// against the same frozen registry and the same singleton instances.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use wireup::{singleton, ServiceCollection};
///
/// struct Config {
///     verbose: bool,
/// }
///
/// struct Logger {
///     config: Arc<Config>,
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add(singleton(|| Config { verbose: true }));
/// services.add(singleton(|config: Arc<Config>| Logger { config }));
///
/// let provider = services.build();
/// let logger = provider.resolve::<Logger>().unwrap();
///
/// assert!(logger.config.verbose);
/// ```
#[derive(Clone)]
pub struct ServiceProvider {
    core: Arc<ResolverCore>,
}

impl ServiceProvider {
    pub(crate) fn new(core: ResolverCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }

    /// Returns an instance for the given type.
    ///
    /// A missing registration is an error here; use
    /// [`resolve_option`](ServiceProvider::resolve_option) when absence is
    /// tolerable.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        resolve_required(&self.core, None, Key::of::<T>())
    }

    /// Returns an instance for the given type and key.
    pub fn resolve_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Arc<T>, ResolveError> {
        resolve_required(&self.core, None, Key::keyed::<T>(key.into()))
    }

    /// Returns an instance for the given type, or `Ok(None)` if no
    /// registration exists.
    ///
    /// Resolution failures other than absence (a failing factory, a missing
    /// dependency, a cycle) still surface as errors.
    pub fn resolve_option<T: Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<T>>, ResolveError> {
        resolve_single(&self.core, None, &Key::of::<T>())
    }

    /// Returns an instance for the given type and key, or `Ok(None)` if no
    /// registration exists.
    pub fn resolve_option_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Option<Arc<T>>, ResolveError> {
        resolve_single(&self.core, None, &Key::keyed::<T>(key.into()))
    }

    /// Returns every instance registered for the given type, in
    /// registration order.
    ///
    /// Fails fast with the first element's error; an absent key yields an
    /// empty collection.
    pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>, ResolveError> {
        resolve_many(&self.core, None, &Key::of::<T>())
    }

    /// Returns every instance registered for the given type and key, in
    /// registration order.
    pub fn resolve_all_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Vec<Arc<T>>, ResolveError> {
        resolve_many(&self.core, None, &Key::keyed::<T>(key.into()))
    }

    /// Returns true if a registration exists for the given type.
    pub fn contains<T: 'static>(&self) -> bool {
        self.core.contains(&Key::of::<T>())
    }

    /// Returns true if a registration exists for the given type and key.
    pub fn contains_keyed<T: 'static>(&self, key: impl Into<Cow<'static, str>>) -> bool {
        self.core.contains(&Key::keyed::<T>(key.into()))
    }

    /// Returns the number of registrations in the provider.
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns true if the provider has no registrations.
    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Creates a new [`Scope`] layered on this provider.
    ///
    /// The scope gets fresh memo slots for every scoped registration;
    /// singleton and transient lookups fall through to this provider.
    pub fn create_scope(&self) -> Scope {
        Scope::new(Arc::clone(&self.core))
    }
}
