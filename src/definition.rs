use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

use crate::ServiceType;

/// Represents a unique key for a registration.
#[derive(Clone, Debug)]
pub struct Key {
    /// The service type of the registration.
    pub ty: ServiceType,
    /// The optional name disambiguating registrations of the same type.
    ///
    /// An absent name is distinct from any present name, including `Some("")`.
    pub name: Option<Cow<'static, str>>,
}

impl Key {
    pub(crate) fn of<T: 'static>() -> Self {
        Self {
            ty: ServiceType::of::<T>(),
            name: None,
        }
    }

    pub(crate) fn keyed<T: 'static>(name: Cow<'static, str>) -> Self {
        Self {
            ty: ServiceType::of::<T>(),
            name: Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} (key {:?})", self.ty, name),
            None => write!(f, "{}", self.ty),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.name == other.name
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.name.hash(state);
    }
}

/// Represents how often the factory of a registration is run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lifetime {
    /// transient, the factory runs on every resolution.
    Transient,
    /// scoped, the factory runs once per [`Scope`](crate::Scope).
    Scoped,
    /// singleton, the factory runs once per provider.
    Singleton,
}

/// Represents the definition of a registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// The unique key of the registration.
    pub key: Key,
    /// The lifetime of the registration.
    pub lifetime: Lifetime,
}

impl Definition {
    pub(crate) fn new<T: 'static>(lifetime: Lifetime) -> Self {
        Self {
            key: Key::of::<T>(),
            lifetime,
        }
    }
}
