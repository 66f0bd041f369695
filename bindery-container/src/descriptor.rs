//! Type descriptors — the autowiring metadata.
//!
//! Rust has no runtime constructor reflection, so every autowirable type
//! registers a [`TypeDescriptor`] at bootstrap: an ordered parameter list
//! plus a constructor closure that assembles the instance from resolved
//! arguments. Interface-like names register with no constructor and fail
//! resolution with `NotInstantiable` unless a binding supplies a concrete.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::binding::Instance;
use crate::error::{ContainerError, Result};

/// Produces a parameter's default value on demand.
pub type DefaultFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Builds an instance from resolved constructor arguments.
pub type ConstructorFn = Arc<dyn Fn(ResolvedArgs) -> Result<Instance> + Send + Sync>;

/// One constructor parameter.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    declared_type: Option<String>,
    default: Option<DefaultFn>,
}

impl Parameter {
    /// A parameter with a declared type, autowired by recursive resolution.
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            default: None,
        }
    }

    /// A parameter with no declared type.
    ///
    /// Resolvable only through an explicit override or a default value.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    /// Attaches a default value, used when no override matches and the
    /// declared type (if any) is absent.
    pub fn with_default<T, F>(mut self, default: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(move || Arc::new(default()) as Instance));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    pub(crate) fn default_value(&self) -> Option<Instance> {
        self.default.as_ref().map(|f| f())
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// Resolved constructor arguments, in declared parameter order.
///
/// Constructor closures consume arguments front to back:
///
/// ```rust,ignore
/// TypeDescriptor::new("db", params, |mut args| {
///     let config: Arc<Config> = args.take()?;
///     let logger: Arc<ConsoleLogger> = args.take()?;
///     Ok(Database { config, logger })
/// })
/// ```
pub struct ResolvedArgs {
    values: VecDeque<(String, Instance)>,
}

impl ResolvedArgs {
    pub(crate) fn new(values: Vec<(String, Instance)>) -> Self {
        Self { values: values.into() }
    }

    /// Takes the next argument, downcast to `Arc<T>`.
    ///
    /// # Errors
    /// [`ContainerError::TypeMismatch`] when the argument holds a
    /// different type, or when the arguments are exhausted.
    pub fn take<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let (name, value) = self.values.pop_front().ok_or_else(|| {
            ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                context: "constructor arguments exhausted".to_owned(),
            }
        })?;

        value.downcast::<T>().map_err(|_| ContainerError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            context: format!("constructor argument {name:?}"),
        })
    }

    /// Takes the next argument without downcasting.
    pub fn take_raw(&mut self) -> Option<Instance> {
        self.values.pop_front().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Describes how to construct one named type.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    parameters: Vec<Parameter>,
    constructor: Option<ConstructorFn>,
}

impl TypeDescriptor {
    /// Describes an instantiable type.
    ///
    /// The constructor closure receives arguments in declared parameter
    /// order; its result is stored as `Arc<T>`.
    pub fn new<T, F>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        constructor: F,
    ) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(ResolvedArgs) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
            constructor: Some(Arc::new(move |args| {
                Ok(Arc::new(constructor(args)?) as Instance)
            })),
        }
    }

    /// Describes an interface-like (abstract) type.
    ///
    /// The name is known to the container but resolving it without a
    /// binding fails with `NotInstantiable`.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: vec![],
            constructor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<&ConstructorFn> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}

/// Stores all registered type descriptors, keyed by type name.
#[derive(Debug, Default)]
pub(crate) struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: TypeDescriptor) {
        debug!(
            name = descriptor.name(),
            instantiable = descriptor.is_instantiable(),
            "Registered type descriptor"
        );
        self.types.insert(descriptor.name().to_owned(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn registered_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    pub fn flush(&mut self) {
        self.types.clear();
    }
}
