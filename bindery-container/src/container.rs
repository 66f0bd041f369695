//! # The Container — binding registration and autowired resolution
//!
//! One `Container` instance composes the binding registry, alias table,
//! type registry and singleton cache, and exposes the public operations
//! every collaborator uses. `make()` is the sole resolution entry point.
//!
//! # Control flow
//! ```text
//! make(name)
//!   -> resolve alias chain to a canonical name
//!   -> check the singleton cache
//!   -> look up the binding (or self-bind the canonical name)
//!   -> build: invoke the factory, or autowire the type descriptor's
//!      constructor, recursively resolving each declared parameter
//!   -> cache if shared
//! ```
//!
//! # Examples
//! ```rust
//! use bindery_container::prelude::*;
//!
//! struct Config { url: String }
//! struct Database { config: std::sync::Arc<Config> }
//!
//! let container = Container::new();
//! container.register_type(TypeDescriptor::new("config", [], |_| {
//!     Ok(Config { url: "sqlite::memory:".into() })
//! }));
//! container.register_type(TypeDescriptor::new(
//!     "db",
//!     [Parameter::typed("config", "config")],
//!     |mut args| Ok(Database { config: args.take()? }),
//! ));
//! container.singleton("db", None);
//!
//! let db = container.make_as::<Database>("db").expect("Failed to resolve");
//! assert_eq!(db.config.url, "sqlite::memory:");
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument, trace};

use crate::alias::AliasTable;
use crate::binding::{BindingRegistry, Concrete, Instance};
use crate::cache::SingletonCache;
use crate::descriptor::{ResolvedArgs, TypeDescriptor, TypeRegistry};
use crate::error::{
    ClassNotFoundError, ContainerError, NotInstantiableError, Result,
    UnresolvableParameterError,
};
use crate::provider::Provider;
use crate::resolve::{Parameters, ResolutionContext};

use bindery_support::rendering::suggest_similar;

const MAX_SUGGESTIONS: usize = 3;

/// Thread-safe string-keyed IoC container.
///
/// Registration (`bind`, `alias`, `register_type`) is expected during a
/// single-threaded bootstrap phase; `make` is safe under concurrent
/// invocation afterwards. Mutating bindings concurrently with in-flight
/// resolutions is outside the contract.
#[derive(Default)]
pub struct Container {
    bindings: RwLock<BindingRegistry>,
    aliases: RwLock<AliasTable>,
    types: RwLock<TypeRegistry>,
    cache: SingletonCache,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──

    /// Registers a binding, overwriting any previous one.
    ///
    /// `concrete: None` means self-binding: the name resolves to its own
    /// registered type descriptor. Re-binding drops any stale cached
    /// instance and any alias entry under the name, so the next `make`
    /// rebuilds.
    pub fn bind(&self, name: &str, concrete: Option<Concrete>, shared: bool) {
        if self.cache.forget(name) {
            debug!(name, "Dropped stale cached instance on rebind");
        }
        self.aliases.write().forget(name);
        self.bindings.write().bind(name, concrete, shared);
    }

    /// Like [`bind`](Container::bind), but a no-op when the name is
    /// already bound.
    pub fn bind_if(&self, name: &str, concrete: Option<Concrete>, shared: bool) {
        if !self.bound(name) {
            self.bind(name, concrete, shared);
        }
    }

    /// Registers a shared binding: `bind(name, concrete, shared = true)`.
    pub fn singleton(&self, name: &str, concrete: Option<Concrete>) {
        self.bind(name, concrete, true);
    }

    /// Like [`singleton`](Container::singleton), but a no-op when the
    /// name is already bound.
    pub fn singleton_if(&self, name: &str, concrete: Option<Concrete>) {
        if !self.bound(name) {
            self.singleton(name, concrete);
        }
    }

    /// Registers `alias` as an alternate name for `name`.
    ///
    /// # Errors
    /// [`ContainerError::InvalidAlias`] when the alias refers to itself
    /// or would complete a cycle. Raised synchronously, never deferred.
    pub fn alias(&self, name: &str, alias: &str) -> Result<()> {
        self.aliases.write().alias(name, alias)
    }

    /// Registers a type descriptor, making the name autowirable.
    pub fn register_type(&self, descriptor: TypeDescriptor) {
        self.types.write().register(descriptor);
    }

    /// Registers an existing value as the cached shared instance for a
    /// name. Any alias entry under the name is removed; the name now
    /// resolves directly.
    pub fn instance<T: Send + Sync + 'static>(&self, name: &str, value: T) -> Arc<T> {
        let instance = Arc::new(value);
        self.aliases.write().forget(name);
        self.cache.put(name, Arc::clone(&instance) as Instance);
        instance
    }

    /// Applies a [`Provider`] module's registrations.
    pub fn register_provider(&self, provider: &dyn Provider) {
        debug!(provider = provider.name(), "Registering provider");
        provider.register(self);
    }

    // ── Introspection ──

    /// True when the name is bound, has a cached instance, or is an alias.
    pub fn bound(&self, name: &str) -> bool {
        self.bindings.read().bound(name)
            || self.cache.contains(name)
            || self.aliases.read().is_alias(name)
    }

    /// True when the canonical name currently has a cached instance.
    pub fn resolved(&self, name: &str) -> bool {
        match self.aliases.read().canonical(name) {
            Ok(canonical) => self.cache.contains(&canonical),
            Err(_) => false,
        }
    }

    /// True when the name is bound as shared, or already has a cached
    /// instance.
    pub fn is_shared(&self, name: &str) -> bool {
        match self.aliases.read().canonical(name) {
            Ok(canonical) => {
                self.cache.contains(&canonical)
                    || self.bindings.read().is_shared_binding(&canonical)
            }
            Err(_) => false,
        }
    }

    // ── Teardown ──

    /// Drops the cached instance for one name. Returns true if one existed.
    pub fn forget_instance(&self, name: &str) -> bool {
        self.cache.forget(name)
    }

    /// Resets the container: all bindings, aliases, type descriptors and
    /// cached instances are dropped.
    pub fn flush(&self) {
        debug!("Flushing container");
        self.bindings.write().flush();
        self.aliases.write().flush();
        self.types.write().flush();
        self.cache.flush();
    }

    // ── Resolution ──

    /// Resolves an abstract name into a live instance.
    pub fn make(&self, name: &str) -> Result<Instance> {
        self.make_with(name, &Parameters::new())
    }

    /// Resolves with explicit constructor-parameter overrides.
    ///
    /// Overrides match constructor parameters by name on the outermost
    /// constructed type. They are ignored on singleton cache hits:
    /// singletons are built exactly once (contract, not a defect).
    #[instrument(skip(self, parameters), name = "container_make")]
    pub fn make_with(&self, name: &str, parameters: &Parameters) -> Result<Instance> {
        self.resolve(name, parameters)
    }

    /// Resolves and downcasts to `Arc<T>`.
    ///
    /// # Errors
    /// [`ContainerError::TypeMismatch`] when the resolved instance holds
    /// a different type, plus any `make` failure.
    pub fn make_as<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.make(name)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                context: format!("resolving {name:?}"),
            })
    }

    /// One step of recursive resolution: canonicalize, guard against
    /// cycles, then build.
    ///
    /// The in-progress frame lives on a thread-local stack, so a factory
    /// that re-enters `make()` on the same thread continues the same
    /// chain and a cycle through it is still reported.
    fn resolve(&self, name: &str, parameters: &Parameters) -> Result<Instance> {
        let canonical = self.aliases.read().canonical(name)?;
        trace!(name, canonical = %canonical, "Resolving");

        let _frame = self.context().enter(&canonical)?;
        self.resolve_canonical(&canonical, parameters)
    }

    fn resolve_canonical(&self, canonical: &str, parameters: &Parameters) -> Result<Instance> {
        if let Some(instance) = self.cache.get(canonical) {
            trace!(canonical, "Cache hit");
            return Ok(instance);
        }

        // Absent binding means self-binding, transient.
        let binding = self.bindings.read().get(canonical).cloned();
        let (concrete, shared) = match binding {
            Some(b) => (b.concrete, b.shared),
            None => (None, false),
        };

        if shared {
            // Atomic per-key check-then-populate: at most one construction
            // under a concurrent first-access race, first writer wins.
            self.cache.get_or_try_build(canonical, || {
                self.construct(canonical, concrete, parameters)
            })
        } else {
            self.construct(canonical, concrete, parameters)
        }
    }

    fn construct(
        &self,
        canonical: &str,
        concrete: Option<Concrete>,
        parameters: &Parameters,
    ) -> Result<Instance> {
        match concrete {
            // The factory's return value is never further auto-resolved.
            Some(Concrete::Factory(factory)) => factory(self),
            Some(Concrete::Type(target)) => {
                if target == canonical {
                    self.instantiate(canonical, parameters)
                } else {
                    // The redirect target may itself be aliased or bound.
                    self.resolve(&target, parameters)
                }
            }
            None => self.instantiate(canonical, parameters),
        }
    }

    /// Autowires a type: reflects the registered descriptor's parameter
    /// list and resolves each parameter in declared order.
    fn instantiate(&self, type_name: &str, parameters: &Parameters) -> Result<Instance> {
        let descriptor = self.types.read().get(type_name).cloned();
        let Some(descriptor) = descriptor else {
            return Err(ContainerError::ClassNotFound(ClassNotFoundError {
                name: type_name.to_owned(),
                chain: self.context().chain(),
                suggestions: self.find_suggestions(type_name),
            }));
        };

        let Some(constructor) = descriptor.constructor().cloned() else {
            return Err(ContainerError::NotInstantiable(NotInstantiableError {
                name: type_name.to_owned(),
                chain: self.context().chain(),
                reason: "interface-like with no concrete binding".to_owned(),
            }));
        };

        let mut args = Vec::with_capacity(descriptor.parameters().len());
        for param in descriptor.parameters() {
            let value = if let Some(over) = parameters.get(param.name()) {
                over
            } else if let Some(declared) = param.declared_type() {
                match self.resolve(declared, &Parameters::new()) {
                    Ok(dep) => dep,
                    // A typed parameter with a default falls back to it
                    // when its type cannot be resolved.
                    Err(err) => match param.default_value() {
                        Some(default) => default,
                        None => return Err(err),
                    },
                }
            } else if let Some(default) = param.default_value() {
                default
            } else {
                return Err(ContainerError::UnresolvableParameter(
                    UnresolvableParameterError {
                        type_name: type_name.to_owned(),
                        parameter: param.name().to_owned(),
                        chain: self.context().chain(),
                    },
                ));
            };
            args.push((param.name().to_owned(), value));
        }

        constructor(ResolvedArgs::new(args))
    }

    /// The thread-local resolution stack handle for this container.
    fn context(&self) -> ResolutionContext {
        ResolutionContext::for_container(self as *const Self as usize)
    }

    fn find_suggestions(&self, name: &str) -> Vec<String> {
        let mut known = self.bindings.read().registered_names();
        known.extend(self.types.read().registered_names());
        known.extend(self.aliases.read().registered_names());
        known.retain(|k| k != name);
        suggest_similar(name, &known, MAX_SUGGESTIONS)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.read().len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::Container;
    pub use crate::binding::{Concrete, Instance};
    pub use crate::descriptor::{Parameter, ResolvedArgs, TypeDescriptor};
    pub use crate::error::{ContainerError, Result};
    pub use crate::provider::Provider;
    pub use crate::resolve::Parameters;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Parameter;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Config {
        url: String,
    }

    struct Database {
        config: Arc<Config>,
    }

    fn register_config(container: &Container) {
        container.register_type(TypeDescriptor::new("config", [], |_| {
            Ok(Config { url: "sqlite::memory:".into() })
        }));
    }

    fn register_database(container: &Container) {
        container.register_type(TypeDescriptor::new(
            "db",
            [Parameter::typed("config", "config")],
            |mut args| Ok(Database { config: args.take()? }),
        ));
    }

    #[test]
    fn make_unknown_name_fails_class_not_found() {
        let container = Container::new();
        let err = container.make("nothing").unwrap_err();
        assert!(matches!(err, ContainerError::ClassNotFound(_)));
    }

    #[test]
    fn class_not_found_suggests_similar_names() {
        let container = Container::new();
        register_config(&container);

        let err = container.make("confg").unwrap_err();
        match err {
            ContainerError::ClassNotFound(e) => {
                assert_eq!(e.suggestions, vec!["config".to_owned()]);
            }
            other => panic!("Expected ClassNotFound, got: {other}"),
        }
    }

    #[test]
    fn self_binding_autowires_registered_type() {
        let container = Container::new();
        register_config(&container);

        // No binding at all: the name itself denotes an instantiable type
        let config = container.make_as::<Config>("config").unwrap();
        assert_eq!(config.url, "sqlite::memory:");
    }

    #[test]
    fn autowires_two_level_chain() {
        let container = Container::new();
        register_config(&container);
        register_database(&container);

        let db = container.make_as::<Database>("db").unwrap();
        assert_eq!(db.config.url, "sqlite::memory:");
    }

    #[test]
    fn shared_binding_returns_identical_instance() {
        let container = Container::new();
        register_config(&container);
        container.singleton("config", None);

        let a = container.make_as::<Config>("config").unwrap();
        let b = container.make_as::<Config>("config").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn transient_binding_returns_distinct_instances() {
        let container = Container::new();
        register_config(&container);
        container.bind("config", None, false);

        let a = container.make_as::<Config>("config").unwrap();
        let b = container.make_as::<Config>("config").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factory_transient_then_singleton() {
        let container = Container::new();
        container.bind(
            "logger",
            Some(Concrete::factory(|_| Ok(String::from("log")))),
            false,
        );

        let a = container.make_as::<String>("logger").unwrap();
        let b = container.make_as::<String>("logger").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));

        container.singleton("logger", Some(Concrete::factory(|_| Ok(String::from("log")))));

        let c = container.make_as::<String>("logger").unwrap();
        let d = container.make_as::<String>("logger").unwrap();
        assert!(Arc::ptr_eq(&c, &d));
    }

    #[test]
    fn factory_receives_the_container() {
        let container = Container::new();
        register_config(&container);
        container.bind(
            "url",
            Some(Concrete::factory(|c| {
                let config = c.make_as::<Config>("config")?;
                Ok(config.url.clone())
            })),
            false,
        );

        let url = container.make_as::<String>("url").unwrap();
        assert_eq!(*url, "sqlite::memory:");
    }

    #[test]
    fn self_alias_fails() {
        let container = Container::new();
        let err = container.alias("log", "log").unwrap_err();
        assert!(matches!(err, ContainerError::InvalidAlias(_)));
    }

    #[test]
    fn alias_resolves_to_same_cached_instance() {
        let container = Container::new();
        register_config(&container);
        container.singleton("config", None);
        container.alias("config", "cfg").unwrap();

        let a = container.make_as::<Config>("config").unwrap();
        let b = container.make_as::<Config>("cfg").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn bind_if_never_overwrites() {
        let container = Container::new();
        container.bind("value", Some(Concrete::factory(|_| Ok(1u32))), false);
        container.bind_if("value", Some(Concrete::factory(|_| Ok(2u32))), false);

        assert_eq!(*container.make_as::<u32>("value").unwrap(), 1);

        container.singleton_if("value", Some(Concrete::factory(|_| Ok(3u32))));
        assert_eq!(*container.make_as::<u32>("value").unwrap(), 1);
        assert!(!container.is_shared("value"));
    }

    #[test]
    fn bind_always_overwrites() {
        let container = Container::new();
        container.bind("value", Some(Concrete::factory(|_| Ok(1u32))), false);
        container.bind("value", Some(Concrete::factory(|_| Ok(2u32))), false);

        assert_eq!(*container.make_as::<u32>("value").unwrap(), 2);
    }

    #[test]
    fn rebind_drops_stale_singleton() {
        let container = Container::new();
        container.singleton("value", Some(Concrete::factory(|_| Ok(1u32))));
        assert_eq!(*container.make_as::<u32>("value").unwrap(), 1);
        assert!(container.resolved("value"));

        container.singleton("value", Some(Concrete::factory(|_| Ok(2u32))));
        assert!(!container.resolved("value"));
        assert_eq!(*container.make_as::<u32>("value").unwrap(), 2);
    }

    #[test]
    fn interface_without_concrete_is_not_instantiable() {
        let container = Container::new();
        container.register_type(TypeDescriptor::interface("logger"));
        container.bind("logger", None, false);

        let err = container.make("logger").unwrap_err();
        match err {
            ContainerError::NotInstantiable(e) => {
                assert_eq!(e.name, "logger");
            }
            other => panic!("Expected NotInstantiable, got: {other}"),
        }
    }

    #[test]
    fn type_redirect_follows_target_binding() {
        let container = Container::new();
        register_config(&container);
        container.singleton("config", None);
        container.bind("settings", Some(Concrete::of("config")), false);

        let a = container.make_as::<Config>("settings").unwrap();
        let b = container.make_as::<Config>("config").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn explicit_parameter_overrides_by_name() {
        let container = Container::new();
        container.register_type(TypeDescriptor::new(
            "greeting",
            [Parameter::untyped("who")],
            |mut args| {
                let who: Arc<String> = args.take()?;
                Ok(format!("hello {who}"))
            },
        ));

        let params = Parameters::new().with("who", String::from("world"));
        let greeting = container.make_with("greeting", &params).unwrap();
        assert_eq!(*greeting.downcast::<String>().unwrap(), "hello world");
    }

    #[test]
    fn parameters_ignored_on_cache_hit() {
        let container = Container::new();
        container.register_type(TypeDescriptor::new(
            "greeting",
            [Parameter::untyped("who").with_default(|| String::from("default"))],
            |mut args| {
                let who: Arc<String> = args.take()?;
                Ok(format!("hello {who}"))
            },
        ));
        container.singleton("greeting", None);

        let first = container.make_as::<String>("greeting").unwrap();
        assert_eq!(*first, "hello default");

        // Singletons are built exactly once; the override is ignored
        let params = Parameters::new().with("who", String::from("again"));
        let second = container.make_with("greeting", &params).unwrap();
        assert!(Arc::ptr_eq(&first, &second.downcast::<String>().unwrap()));
    }

    #[test]
    fn untyped_parameter_without_default_is_unresolvable() {
        let container = Container::new();
        container.register_type(TypeDescriptor::new(
            "job",
            [Parameter::untyped("payload")],
            |mut args| {
                let payload: Arc<String> = args.take()?;
                Ok(payload.len())
            },
        ));

        let err = container.make("job").unwrap_err();
        match err {
            ContainerError::UnresolvableParameter(e) => {
                assert_eq!(e.parameter, "payload");
                assert_eq!(e.type_name, "job");
            }
            other => panic!("Expected UnresolvableParameter, got: {other}"),
        }
    }

    #[test]
    fn default_value_fills_missing_parameter() {
        let container = Container::new();
        container.register_type(TypeDescriptor::new(
            "pool",
            [Parameter::untyped("size").with_default(|| 8usize)],
            |mut args| {
                let size: Arc<usize> = args.take()?;
                Ok(*size)
            },
        ));

        assert_eq!(*container.make_as::<usize>("pool").unwrap(), 8);
    }

    #[test]
    fn circular_constructor_dependency_reported() {
        struct A;
        struct B;

        let container = Container::new();
        container.register_type(TypeDescriptor::new(
            "a",
            [Parameter::typed("b", "b")],
            |_| Ok(A),
        ));
        container.register_type(TypeDescriptor::new(
            "b",
            [Parameter::typed("a", "a")],
            |_| Ok(B),
        ));

        let err = container.make("a").unwrap_err();
        match err {
            ContainerError::CircularDependency(e) => {
                assert_eq!(e.chain, vec!["a".to_owned(), "b".to_owned(), "a".to_owned()]);
            }
            other => panic!("Expected CircularDependency, got: {other}"),
        }
    }

    #[test]
    fn transient_factory_reentering_its_own_name_reports_circular() {
        let container = Container::new();
        container.bind(
            "a",
            Some(Concrete::Factory(Arc::new(|c: &Container| c.make("a")))),
            false,
        );

        let err = container.make("a").unwrap_err();
        match err {
            ContainerError::CircularDependency(e) => {
                assert_eq!(e.chain, vec!["a".to_owned(), "a".to_owned()]);
            }
            other => panic!("Expected CircularDependency, got: {other}"),
        }
    }

    #[test]
    fn shared_factory_cycle_reports_instead_of_hanging() {
        let container = Container::new();
        container.singleton(
            "a",
            Some(Concrete::Factory(Arc::new(|c: &Container| c.make("a")))),
        );

        let err = container.make("a").unwrap_err();
        assert!(matches!(err, ContainerError::CircularDependency(_)));

        // The failed build leaves the cache empty; a sane rebinding works
        container.singleton("a", Some(Concrete::factory(|_| Ok(1u8))));
        assert_eq!(*container.make_as::<u8>("a").unwrap(), 1);
    }

    #[test]
    fn two_name_factory_cycle_reports_full_chain() {
        let container = Container::new();
        container.bind(
            "a",
            Some(Concrete::Factory(Arc::new(|c: &Container| c.make("b")))),
            false,
        );
        container.bind(
            "b",
            Some(Concrete::Factory(Arc::new(|c: &Container| c.make("a")))),
            false,
        );

        let err = container.make("a").unwrap_err();
        match err {
            ContainerError::CircularDependency(e) => {
                assert_eq!(
                    e.chain,
                    vec!["a".to_owned(), "b".to_owned(), "a".to_owned()]
                );
            }
            other => panic!("Expected CircularDependency, got: {other}"),
        }
    }

    #[test]
    fn error_chain_names_dependency_path() {
        let container = Container::new();
        register_database(&container);
        // "db" needs "config", which is never registered

        let err = container.make("db").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("db -> config"), "unexpected message: {msg}");
    }

    #[test]
    fn concurrent_first_access_constructs_singleton_once() {
        let container = Arc::new(Container::new());
        let constructions = Arc::new(AtomicU32::new(0));

        {
            let constructions = Arc::clone(&constructions);
            container.singleton(
                "counter",
                Some(Concrete::factory(move |_| {
                    Ok(constructions.fetch_add(1, Ordering::SeqCst))
                })),
            );
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let container = Arc::clone(&container);
                std::thread::spawn(move || container.make_as::<u32>("counter").unwrap())
            })
            .collect();

        let results: Vec<Arc<u32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        for result in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], result));
        }
    }

    #[test]
    fn instance_registers_resolved_shared_value() {
        let container = Container::new();
        let held = container.instance("config", Config { url: "env".into() });

        assert!(container.bound("config"));
        assert!(container.resolved("config"));
        assert!(container.is_shared("config"));

        let made = container.make_as::<Config>("config").unwrap();
        assert!(Arc::ptr_eq(&held, &made));
    }

    #[test]
    fn instance_removes_alias_under_the_name() {
        let container = Container::new();
        container.instance("config", Config { url: "a".into() });
        container.alias("config", "cfg").unwrap();

        let replaced = container.instance("cfg", Config { url: "b".into() });
        let made = container.make_as::<Config>("cfg").unwrap();
        assert!(Arc::ptr_eq(&replaced, &made));
    }

    #[test]
    fn forget_instance_forces_rebuild() {
        let container = Container::new();
        container.singleton("value", Some(Concrete::factory(|_| Ok(String::from("v")))));

        let a = container.make_as::<String>("value").unwrap();
        assert!(container.forget_instance("value"));
        let b = container.make_as::<String>("value").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn flush_restores_unbound_state() {
        let container = Container::new();
        register_config(&container);
        container.singleton("config", None);
        container.alias("config", "cfg").unwrap();
        let _ = container.make("config").unwrap();

        container.flush();
        assert!(!container.bound("config"));
        assert!(!container.resolved("config"));
        assert!(container.make("cfg").is_err());
    }

    #[test]
    fn bound_and_resolved_lifecycle() {
        let container = Container::new();
        register_config(&container);

        assert!(!container.bound("config"));
        container.singleton("config", None);
        assert!(container.bound("config"));
        assert!(!container.resolved("config"));
        assert!(container.is_shared("config"));

        let _ = container.make("config").unwrap();
        assert!(container.resolved("config"));
    }

    #[test]
    fn resolved_follows_aliases() {
        let container = Container::new();
        register_config(&container);
        container.singleton("config", None);
        container.alias("config", "cfg").unwrap();

        let _ = container.make("cfg").unwrap();
        assert!(container.resolved("cfg"));
        assert!(container.resolved("config"));
    }

    #[test]
    fn make_as_wrong_type_fails() {
        let container = Container::new();
        register_config(&container);

        let err = container.make_as::<u64>("config").unwrap_err();
        assert!(matches!(err, ContainerError::TypeMismatch { .. }));
    }

    #[test]
    fn provider_groups_registrations() {
        struct CoreProvider;

        impl Provider for CoreProvider {
            fn register(&self, container: &Container) {
                container.register_type(TypeDescriptor::new("config", [], |_| {
                    Ok(Config { url: "provided".into() })
                }));
                container.singleton("config", None);
                container.alias("config", "cfg").expect("alias");
            }
        }

        let container = Container::new();
        container.register_provider(&CoreProvider);

        let config = container.make_as::<Config>("cfg").unwrap();
        assert_eq!(config.url, "provided");
    }

    #[test]
    fn debug_display() {
        let container = Container::new();
        container.bind("a", None, false);
        container.bind("b", None, true);

        let debug = format!("{container:?}");
        assert!(debug.contains("Container"));
        assert!(debug.contains("2"));
    }
}
