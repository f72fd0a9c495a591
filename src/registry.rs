use crate::{
    context::ResolverCore, module::ResolveModule, Definition, DynDescriptor, Module,
    ServiceProvider,
};

/// An ordered, append-only collection of service registrations.
///
/// Registrations are validated at the call site by the typed binding
/// functions; the collection itself only accumulates them. Multiple
/// registrations for the same key are permitted: the last one wins for
/// single-value resolution and all of them are preserved, in registration
/// order, for multi-binding resolution.
///
/// # Example
///
/// ```rust
/// use wireup::{singleton, transient, ServiceCollection};
///
/// #[derive(Debug)]
/// struct A;
///
/// let mut services = ServiceCollection::new();
/// services.add(singleton(|| A));
/// services.add(transient(|| 42_i32).key("answer"));
///
/// let provider = services.build();
///
/// assert!(provider.contains::<A>());
/// assert!(provider.contains_keyed::<i32>("answer"));
/// ```
#[derive(Default)]
pub struct ServiceCollection {
    descriptors: Vec<DynDescriptor>,
}

impl ServiceCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a registration to the collection.
    pub fn add<D>(&mut self, descriptor: D) -> &mut Self
    where
        D: Into<DynDescriptor>,
    {
        let descriptor = descriptor.into();

        #[cfg(feature = "tracing")]
        {
            let definition = descriptor.definition();

            if self
                .descriptors
                .iter()
                .any(|d| d.definition().key == definition.key)
            {
                tracing::warn!("(!) shadowing earlier registration for key: {:?}", definition);
            } else {
                tracing::debug!("(+) insert new: {:?}", definition);
            }
        }

        self.descriptors.push(descriptor);
        self
    }

    /// Appends every registration of the given [`Module`], flattening its
    /// submodules first.
    pub fn add_module<M: Module + 'static>(&mut self) -> &mut Self {
        self.add_modules(vec![ResolveModule::new::<M>()])
    }

    /// Appends every registration of the given modules, flattening
    /// submodules in declaration order.
    pub fn add_modules(&mut self, modules: Vec<ResolveModule>) -> &mut Self {
        let Some(modules) = flatten(modules, ResolveModule::submodules) else {
            return self;
        };

        modules
            .into_iter()
            .flat_map(ResolveModule::services)
            .for_each(|descriptor| {
                self.add(descriptor);
            });

        self
    }

    /// Returns the definitions of the added registrations, in registration
    /// order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.descriptors.iter().map(DynDescriptor::definition)
    }

    /// Returns the number of registrations in the collection.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the collection has no registrations.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds the root [`ServiceProvider`].
    ///
    /// This is a one-way transition: the collection is consumed and the
    /// resulting registry is frozen. No instantiation happens here;
    /// instances are created lazily on first resolution.
    pub fn build(self) -> ServiceProvider {
        #[cfg(feature = "tracing")]
        tracing::debug!("building provider with {} registrations", self.descriptors.len());

        ServiceProvider::new(ResolverCore::from_descriptors(self.descriptors))
    }
}

fn flatten<T, F>(mut unresolved: Vec<T>, get_sublist: F) -> Option<Vec<T>>
where
    F: Fn(&mut T) -> Option<Vec<T>>,
{
    if unresolved.is_empty() {
        return None;
    }

    let mut resolved = Vec::with_capacity(unresolved.len());

    unresolved.reverse();

    while let Some(mut element) = unresolved.pop() {
        match get_sublist(&mut element) {
            Some(mut sublist) if !sublist.is_empty() => {
                sublist.reverse();
                unresolved.append(&mut sublist);
            }
            _ => {}
        }

        resolved.push(element);
    }

    Some(resolved)
}
