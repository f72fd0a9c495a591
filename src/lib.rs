#![doc = include_str!("./docs/lib.md")]

mod context;
mod definition;
mod descriptor;
mod errors;
mod factory;
pub mod global;
mod macros;
mod module;
mod registry;
mod scope;
mod ty;

pub use context::{ResolveContext, ServiceProvider};
pub use definition::{Definition, Key, Lifetime};
pub use descriptor::{
    instance, scoped, singleton, transient, try_scoped, try_singleton, try_transient, Binding,
    DynDescriptor,
};
pub use errors::ResolveError;
pub use factory::{BoxError, Dependency, DependencySet, Factory, TryFactory};
pub use module::{Module, ResolveModule};
pub use registry::ServiceCollection;
pub use scope::Scope;
pub use ty::ServiceType;
