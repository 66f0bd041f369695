//! Binding registry — stores abstract-name to binding mappings.
//!
//! A binding pairs an abstract name with a *concrete*: either a factory
//! closure that receives the container, or a redirect to another type
//! name. A binding with no concrete is a self-binding, i.e. the abstract
//! name resolves to itself as an instantiable type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

/// The type-erased value the container produces.
///
/// Shared instances are handed out by cloning the `Arc`; use
/// [`Container::make_as`](crate::container::Container::make_as) to get a
/// typed `Arc<T>` back.
pub type Instance = Arc<dyn std::any::Any + Send + Sync>;

/// Type alias for factory closures.
///
/// A factory receives the container (to resolve sub-dependencies) and
/// returns a finished instance. Its return value is never further
/// auto-resolved.
///
/// # Why `Arc` and not `Box`?
/// Bindings are read from multiple threads once bootstrap is done.
/// `Arc` allows cloning the closure handle without copying it.
pub type FactoryFn = Arc<dyn Fn(&crate::container::Container) -> Result<Instance> + Send + Sync>;

/// What a binding resolves to.
#[derive(Clone)]
pub enum Concrete {
    /// A factory closure, invoked with the container as sole argument.
    Factory(FactoryFn),
    /// A redirect to another registered type name, autowired on resolve.
    Type(String),
}

impl Concrete {
    /// Wraps a typed factory closure.
    ///
    /// The closure's return value is stored as `Arc<T>`.
    ///
    /// # Examples
    /// ```rust,ignore
    /// container.bind("logger", Some(Concrete::factory(|_| Ok(ConsoleLogger))), false);
    /// ```
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&crate::container::Container) -> Result<T> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(move |container| {
            Ok(Arc::new(factory(container)?) as Instance)
        }))
    }

    /// Redirects the binding to another type name.
    pub fn of(type_name: impl Into<String>) -> Self {
        Concrete::Type(type_name.into())
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Factory(_) => write!(f, "Concrete::Factory(..)"),
            Concrete::Type(name) => write!(f, "Concrete::Type({name:?})"),
        }
    }
}

/// Registration entry for a single abstract name.
#[derive(Clone, Debug)]
pub struct Binding {
    /// `None` means self-binding: the name denotes its own type.
    pub concrete: Option<Concrete>,
    /// Shared bindings are cached after first resolution.
    pub shared: bool,
}

/// Stores all bindings, keyed by abstract name.
///
/// Populated during the single-threaded bootstrap phase; read-only
/// afterwards by contract.
#[derive(Debug, Default)]
pub(crate) struct BindingRegistry {
    bindings: HashMap<String, Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding, overwriting any previous one (last write wins).
    pub fn bind(&mut self, name: &str, concrete: Option<Concrete>, shared: bool) {
        debug!(name, shared, "Registered binding");
        self.bindings.insert(name.to_owned(), Binding { concrete, shared });
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// True if the name is bound with `shared = true`.
    ///
    /// The facade's `is_shared` also accounts for already-cached
    /// instances; this only reflects the registration.
    pub fn is_shared_binding(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(|b| b.shared)
    }

    pub fn registered_names(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn flush(&mut self) {
        self.bindings.clear();
    }
}
