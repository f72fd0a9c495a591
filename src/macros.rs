/// Convert a set of types that implement [`Module`]
/// to a set of [`ResolveModule`] instances.
///
/// # Example
///
/// ```rust
/// use wireup::{modules, DynDescriptor, Module, ResolveModule};
///
/// struct MyModule;
///
/// impl Module for MyModule {
///     fn services() -> Vec<DynDescriptor> {
///         Vec::new()
///     }
/// }
///
/// let _: Vec<ResolveModule> = modules![MyModule];
/// ```
///
/// [`Module`]: crate::Module
/// [`ResolveModule`]: crate::ResolveModule
#[macro_export]
macro_rules! modules {
    () => {
        vec![]
    };
    ($($module:ty),+ $(,)?) => {
        vec![$(
            $crate::ResolveModule::new::<$module>()
        ),+]
    };
}

/// Convert a set of instances that implement `Into<DynDescriptor>`
/// to a set of [`DynDescriptor`] instances.
///
/// # Example
///
/// ```rust
/// use wireup::{services, singleton, DynDescriptor};
///
/// let _: Vec<DynDescriptor> = services![singleton(|| "Hello")];
/// ```
///
/// [`DynDescriptor`]: crate::DynDescriptor
#[macro_export]
macro_rules! services {
    () => {
        vec![]
    };
    ($($binding:expr),+ $(,)?) => {
        vec![$(
            <$crate::DynDescriptor as ::core::convert::From<_>>::from($binding)
        ),+]
    };
}
