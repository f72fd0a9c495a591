use std::{borrow::Cow, collections::HashMap, sync::Arc};

use crate::{
    context::{self, ResolverCore, Slot},
    Key, ResolveError,
};

/// The memo slots owned by one scope instance, one per scoped registration.
pub(crate) struct ScopeState {
    slots: HashMap<usize, Slot>,
}

impl ScopeState {
    fn new(core: &ResolverCore) -> Self {
        Self {
            slots: core
                .scoped_indices()
                .iter()
                .map(|&index| (index, Slot::new()))
                .collect(),
        }
    }

    pub(crate) fn slot(&self, index: usize) -> &Slot {
        match self.slots.get(&index) {
            Some(slot) => slot,
            // Slots for every scoped registration are created at scope
            // construction.
            None => unreachable!("no scope slot for registration {}", index),
        }
    }
}

/// A child resolution context layered on a [`ServiceProvider`](crate::ServiceProvider).
///
/// Scoped registrations resolve within the scope and are memoized per scope
/// instance; singleton and transient lookups fall through to the root
/// provider. Clones share the same scope instance; use
/// [`create_scope`](Scope::create_scope) for a fresh one.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use wireup::{scoped, ServiceCollection};
///
/// struct Connection;
///
/// let mut services = ServiceCollection::new();
/// services.add(scoped(|| Connection));
///
/// let provider = services.build();
///
/// let scope_a = provider.create_scope();
/// let scope_b = provider.create_scope();
///
/// let first = scope_a.resolve::<Connection>().unwrap();
/// let second = scope_a.resolve::<Connection>().unwrap();
/// let other = scope_b.resolve::<Connection>().unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(!Arc::ptr_eq(&first, &other));
/// ```
#[derive(Clone)]
pub struct Scope {
    core: Arc<ResolverCore>,
    state: Arc<ScopeState>,
}

impl Scope {
    pub(crate) fn new(core: Arc<ResolverCore>) -> Self {
        let state = Arc::new(ScopeState::new(&core));
        Self { core, state }
    }

    /// Returns an instance for the given type.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        context::resolve_required(&self.core, Some(&*self.state), Key::of::<T>())
    }

    /// Returns an instance for the given type and key.
    pub fn resolve_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Arc<T>, ResolveError> {
        context::resolve_required(&self.core, Some(&*self.state), Key::keyed::<T>(key.into()))
    }

    /// Returns an instance for the given type, or `Ok(None)` if no
    /// registration exists.
    pub fn resolve_option<T: Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<T>>, ResolveError> {
        context::resolve_single(&self.core, Some(&*self.state), &Key::of::<T>())
    }

    /// Returns an instance for the given type and key, or `Ok(None)` if no
    /// registration exists.
    pub fn resolve_option_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Option<Arc<T>>, ResolveError> {
        context::resolve_single(&self.core, Some(&*self.state), &Key::keyed::<T>(key.into()))
    }

    /// Returns every instance registered for the given type, in
    /// registration order.
    pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>, ResolveError> {
        context::resolve_many(&self.core, Some(&*self.state), &Key::of::<T>())
    }

    /// Returns every instance registered for the given type and key, in
    /// registration order.
    pub fn resolve_all_keyed<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
    ) -> Result<Vec<Arc<T>>, ResolveError> {
        context::resolve_many(&self.core, Some(&*self.state), &Key::keyed::<T>(key.into()))
    }

    /// Returns true if a registration exists for the given type.
    pub fn contains<T: 'static>(&self) -> bool {
        self.core.contains(&Key::of::<T>())
    }

    /// Returns true if a registration exists for the given type and key.
    pub fn contains_keyed<T: 'static>(&self, key: impl Into<Cow<'static, str>>) -> bool {
        self.core.contains(&Key::keyed::<T>(key.into()))
    }

    /// Creates a sibling scope with fresh memo slots, sharing the same
    /// root provider.
    pub fn create_scope(&self) -> Scope {
        Scope::new(Arc::clone(&self.core))
    }
}
