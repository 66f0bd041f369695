//! # Bindery — a string-keyed IoC container for Rust
//!
//! Binding registration, alias indirection, recursive autowired
//! resolution and singleton lifecycle caching, behind one narrow API.
//!
//! ```rust
//! use bindery::prelude::*;
//!
//! let container = Container::new();
//! container.singleton("answer", Some(Concrete::factory(|_| Ok(42u32))));
//!
//! let a = container.make_as::<u32>("answer").unwrap();
//! let b = container.make_as::<u32>("answer").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

pub use bindery_container::*;
pub use bindery_support::rendering;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_reexports_the_container() {
        let container = Container::new();
        container.bind("n", Some(Concrete::factory(|_| Ok(7i64))), false);
        assert_eq!(*container.make_as::<i64>("n").unwrap(), 7);
    }
}
