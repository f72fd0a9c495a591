use std::{any::Any, error::Error, sync::Arc};

use crate::{
    context::{self, ResolveContext},
    Key, ResolveError, ServiceType,
};

/// A type-erased boxed error, the failure type of fallible factories.
pub type BoxError = Box<dyn Error + Send + Sync>;

pub(crate) type ErasedInstance = Arc<dyn Any + Send + Sync>;

#[allow(clippy::type_complexity)]
pub(crate) type ErasedFactory =
    Box<dyn for<'a> Fn(&mut ResolveContext<'a>) -> Result<ErasedInstance, ResolveError> + Send + Sync>;

/// A value a factory can declare as a parameter.
///
/// Implemented for `Arc<T>` (single-value resolution, last registration
/// wins) and for `Vec<Arc<T>>` (multi-binding resolution, all registrations
/// in registration order).
pub trait Dependency: Sized + Send + Sync + 'static {
    /// The service type reported when this dependency fails to resolve.
    fn service_type() -> ServiceType;

    /// Resolves the dependency in the given context.
    fn resolve(cx: &mut ResolveContext<'_>) -> Result<Self, ResolveError>;
}

impl<T: Send + Sync + 'static> Dependency for Arc<T> {
    fn service_type() -> ServiceType {
        ServiceType::of::<T>()
    }

    fn resolve(cx: &mut ResolveContext<'_>) -> Result<Self, ResolveError> {
        let key = Key::of::<T>();

        match context::resolve_key(cx, &key)? {
            Some(instance) => Ok(context::downcast::<T>(instance)),
            None => Err(ResolveError::NotFound { key }),
        }
    }
}

impl<T: Send + Sync + 'static> Dependency for Vec<Arc<T>> {
    fn service_type() -> ServiceType {
        ServiceType::of::<T>()
    }

    fn resolve(cx: &mut ResolveContext<'_>) -> Result<Self, ResolveError> {
        let key = Key::of::<T>();

        Ok(context::resolve_all_key(cx, &key)?
            .into_iter()
            .map(context::downcast::<T>)
            .collect())
    }
}

/// An ordered set of [`Dependency`] values, resolved positionally.
///
/// Implemented for tuples of up to 8 dependencies. A failed element is
/// reported together with its [`ServiceType`] so the caller can name the
/// missing dependency.
pub trait DependencySet: Sized {
    /// Resolves every element of the set in declaration order.
    fn resolve(cx: &mut ResolveContext<'_>) -> Result<Self, (ServiceType, ResolveError)>;
}

/// An infallible constructor function with dependency set `A`.
///
/// Implemented for `Fn` closures and functions of up to 8 arguments, each
/// argument implementing [`Dependency`].
pub trait Factory<A>: Send + Sync + 'static {
    /// The service type the factory produces.
    type Output;

    /// Invokes the factory with resolved dependency values.
    fn call(&self, args: A) -> Self::Output;
}

/// A fallible constructor function with dependency set `A`.
///
/// Implemented for `Fn` closures and functions of up to 8 arguments
/// returning `Result<T, E>` where `E` converts into [`BoxError`].
pub trait TryFactory<A>: Send + Sync + 'static {
    /// The service type the factory produces on success.
    type Output;

    /// Invokes the factory with resolved dependency values.
    fn try_call(&self, args: A) -> Result<Self::Output, BoxError>;
}

macro_rules! impl_factory {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Factory<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + Send + Sync + 'static,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }
        }

        impl<Func, Out, Err, $($arg,)*> TryFactory<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Result<Out, Err> + Send + Sync + 'static,
            Err: Into<BoxError>,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn try_call(&self, ($($arg,)*): ($($arg,)*)) -> Result<Out, BoxError> {
                (self)($($arg),*).map_err(Into::into)
            }
        }

        impl<$($arg: Dependency,)*> DependencySet for ($($arg,)*) {
            #[allow(unused_variables)]
            fn resolve(cx: &mut ResolveContext<'_>) -> Result<Self, (ServiceType, ResolveError)> {
                Ok(($(
                    $arg::resolve(cx).map_err(|source| ($arg::service_type(), source))?,
                )*))
            }
        }
    };
}

impl_factory!();
impl_factory!(A1);
impl_factory!(A1, A2);
impl_factory!(A1, A2, A3);
impl_factory!(A1, A2, A3, A4);
impl_factory!(A1, A2, A3, A4, A5);
impl_factory!(A1, A2, A3, A4, A5, A6);
impl_factory!(A1, A2, A3, A4, A5, A6, A7);
impl_factory!(A1, A2, A3, A4, A5, A6, A7, A8);
