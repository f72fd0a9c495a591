use crate::{DynDescriptor, ServiceType};

/// Represents a group of registrations installed together.
///
/// # Example
///
/// ```rust
/// use wireup::{modules, services, singleton, Module, ServiceCollection};
///
/// struct Infrastructure;
///
/// impl Module for Infrastructure {
///     fn services() -> Vec<wireup::DynDescriptor> {
///         services![singleton(|| "connection string")]
///     }
/// }
///
/// struct App;
///
/// impl Module for App {
///     fn submodules() -> Option<Vec<wireup::ResolveModule>> {
///         Some(modules![Infrastructure])
///     }
///
///     fn services() -> Vec<wireup::DynDescriptor> {
///         services![]
///     }
/// }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_module::<App>();
///
/// let provider = collection.build();
/// assert!(provider.contains::<&'static str>());
/// ```
pub trait Module {
    /// Included submodules, default is None.
    fn submodules() -> Option<Vec<ResolveModule>> {
        None
    }

    /// Included registrations.
    fn services() -> Vec<DynDescriptor>;
}

/// A type representing a module, converted from a type that implements
/// [`Module`].
pub struct ResolveModule {
    ty: ServiceType,
    submodules: Option<Vec<ResolveModule>>,
    services: Vec<DynDescriptor>,
}

impl ResolveModule {
    /// Creates a [`ResolveModule`] from a type that implements [`Module`].
    pub fn new<M: Module + 'static>() -> Self {
        Self {
            ty: ServiceType::of::<M>(),
            submodules: M::submodules(),
            services: M::services(),
        }
    }

    /// The type the module was converted from.
    pub fn ty(&self) -> ServiceType {
        self.ty
    }

    pub(crate) fn submodules(&mut self) -> Option<Vec<ResolveModule>> {
        self.submodules.take()
    }

    pub(crate) fn services(self) -> Vec<DynDescriptor> {
        self.services
    }
}
