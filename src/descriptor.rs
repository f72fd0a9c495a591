use std::{borrow::Cow, marker::PhantomData, sync::Arc};

use crate::{
    factory::{DependencySet, ErasedFactory, ErasedInstance, Factory, TryFactory},
    Definition, Lifetime, ResolveContext, ResolveError, ServiceType,
};

pub(crate) enum Payload {
    Instance(ErasedInstance),
    Factory(ErasedFactory),
}

/// A single validated registration of service type `T`.
///
/// There is no method to create this struct directly. Use one of the
/// following functions, then register the result with
/// [`ServiceCollection::add`](crate::ServiceCollection::add):
/// - [`singleton`] / [`try_singleton`]
/// - [`scoped`] / [`try_scoped`]
/// - [`transient`] / [`try_transient`]
/// - [`instance`]
pub struct Binding<T> {
    definition: Definition,
    payload: Payload,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Binding<T> {
    fn new(lifetime: Lifetime, payload: Payload) -> Self {
        Self {
            definition: Definition::new::<T>(lifetime),
            payload,
            _marker: PhantomData,
        }
    }

    /// Sets the key of the registration.
    ///
    /// A keyed registration is looked up with the `*_keyed` resolution
    /// methods; it never shadows an unkeyed registration of the same type.
    pub fn key<K>(mut self, key: K) -> Self
    where
        K: Into<Cow<'static, str>>,
    {
        self.definition.key.name = Some(key.into());
        self
    }

    /// Returns the [`Definition`] of the registration.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }
}

/// Represents a [`Binding`] that erased its generic type.
pub struct DynDescriptor {
    definition: Definition,
    payload: Payload,
}

impl DynDescriptor {
    /// Returns the [`Definition`] of the registration.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub(crate) fn into_parts(self) -> (Definition, Payload) {
        (self.definition, self.payload)
    }
}

impl<T> From<Binding<T>> for DynDescriptor {
    fn from(value: Binding<T>) -> Self {
        Self {
            definition: value.definition,
            payload: value.payload,
        }
    }
}

fn erase<T, A, F>(factory: F) -> ErasedFactory
where
    T: Send + Sync + 'static,
    A: DependencySet,
    F: Factory<A, Output = T>,
{
    let produced = ServiceType::of::<T>();

    Box::new(move |cx: &mut ResolveContext<'_>| {
        let args = A::resolve(cx).map_err(|(missing, source)| ResolveError::Dependency {
            requesting: produced,
            missing,
            source: Arc::new(source),
        })?;

        Ok(Arc::new(factory.call(args)) as ErasedInstance)
    })
}

fn erase_try<T, A, F>(factory: F) -> ErasedFactory
where
    T: Send + Sync + 'static,
    A: DependencySet,
    F: TryFactory<A, Output = T>,
{
    let produced = ServiceType::of::<T>();

    Box::new(move |cx: &mut ResolveContext<'_>| {
        let args = A::resolve(cx).map_err(|(missing, source)| ResolveError::Dependency {
            requesting: produced,
            missing,
            source: Arc::new(source),
        })?;

        let instance = factory
            .try_call(args)
            .map_err(|source| ResolveError::Factory {
                produced,
                source: Arc::from(source),
            })?;

        Ok(Arc::new(instance) as ErasedInstance)
    })
}

macro_rules! define_binding_fn {
    (
        #[$summary:meta]
        $function:ident, $factory:ident, $erase:ident, $lifetime:expr, $example:literal;
    ) => {
        #[$summary]
        ///
        /// The factory's parameters are resolved from the same context the
        /// service is resolved in; each must implement
        /// [`Dependency`](crate::Dependency).
        ///
        /// # Example
        ///
        /// ```rust
        #[doc = concat!("use wireup::", stringify!($function), ";")]
        ///
        /// struct A(i32);
        ///
        #[doc = concat!(
            "let _: wireup::Binding<A> = ",
            stringify!($function),
            "(|| ",
            $example,
            ");"
        )]
        /// ```
        pub fn $function<T, A, F>(factory: F) -> Binding<T>
        where
            T: Send + Sync + 'static,
            A: DependencySet,
            F: $factory<A, Output = T>,
        {
            Binding::new($lifetime, Payload::Factory($erase(factory)))
        }
    };
}

define_binding_fn! {
    /// Creates a singleton registration: the factory runs at most once per provider.
    singleton, Factory, erase, Lifetime::Singleton, "A(42)";
}

define_binding_fn! {
    /// Creates a scoped registration: the factory runs at most once per [`Scope`](crate::Scope).
    scoped, Factory, erase, Lifetime::Scoped, "A(42)";
}

define_binding_fn! {
    /// Creates a transient registration: the factory runs on every resolution.
    transient, Factory, erase, Lifetime::Transient, "A(42)";
}

define_binding_fn! {
    /// Creates a fallible singleton registration; the factory's error is memoized like a value.
    try_singleton, TryFactory, erase_try, Lifetime::Singleton, "Ok::<_, std::io::Error>(A(42))";
}

define_binding_fn! {
    /// Creates a fallible scoped registration; the factory's error is memoized per scope.
    try_scoped, TryFactory, erase_try, Lifetime::Scoped, "Ok::<_, std::io::Error>(A(42))";
}

define_binding_fn! {
    /// Creates a fallible transient registration.
    try_transient, TryFactory, erase_try, Lifetime::Transient, "Ok::<_, std::io::Error>(A(42))";
}

/// Creates a singleton registration from a precomputed instance.
///
/// The instance short-circuits resolution: no factory is involved and no
/// dependency resolution happens. Precomputed instances always have the
/// [`Singleton`](Lifetime::Singleton) lifetime.
///
/// # Example
///
/// ```rust
/// use wireup::instance;
///
/// struct Config {
///     verbose: bool,
/// }
///
/// let _: wireup::Binding<Config> = instance(Config { verbose: true });
/// ```
pub fn instance<T>(value: T) -> Binding<T>
where
    T: Send + Sync + 'static,
{
    Binding::new(Lifetime::Singleton, Payload::Instance(Arc::new(value)))
}
