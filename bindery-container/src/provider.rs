//! Provider trait — a module of related registrations.
//!
//! Providers group related bindings, aliases and type descriptors
//! together so bootstrap code stays split by domain instead of one giant
//! registration block:
//!
//! ```rust,ignore
//! container.register_provider(&DatabaseProvider);
//! container.register_provider(&LoggingProvider);
//! container.register_provider(&QueueProvider);
//! ```

use crate::container::Container;

/// A module that registers related services into a container.
///
/// # Examples
/// ```rust,ignore
/// struct DatabaseProvider;
///
/// impl Provider for DatabaseProvider {
///     fn register(&self, container: &Container) {
///         container.register_type(TypeDescriptor::new("db.connection", params, ctor));
///         container.singleton("db.connection", None);
///         container.alias("db.connection", "db").expect("alias");
///     }
/// }
/// ```
pub trait Provider: Send + Sync {
    /// Register services into the container.
    ///
    /// Called once during the bootstrap phase.
    fn register(&self, container: &Container);

    /// Optional: human-readable name for log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
