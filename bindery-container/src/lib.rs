//! Core container implementation for Bindery.

pub mod alias;
pub mod binding;
pub mod cache;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod provider;
pub mod resolve;

pub use binding::{Concrete, FactoryFn, Instance};
pub use container::{prelude, Container};
pub use descriptor::{Parameter, ResolvedArgs, TypeDescriptor};
pub use error::{ContainerError, Result};
pub use provider::Provider;
pub use resolve::Parameters;
