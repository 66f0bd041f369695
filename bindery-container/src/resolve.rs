//! Per-call resolution state.
//!
//! The in-progress dependency chain lives in a thread-local stack so it
//! survives factory re-entry: a factory that calls back into `make()` on
//! the same thread continues the same chain, and a cycle routed through
//! it still surfaces as `CircularDependency` instead of unbounded
//! recursion. Entries are tagged with the owning container's identity so
//! two containers resolving the same name on one thread do not collide.
//! [`Parameters`] carries the explicit by-name overrides passed to
//! `make_with`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::binding::Instance;
use crate::error::{CircularDependencyError, ContainerError, Result};

/// Defensive bound on constructor recursion.
///
/// The stack check below catches true cycles; the depth guard converts
/// anything it misses into a reported error instead of a stack overflow.
const MAX_RESOLUTION_DEPTH: usize = 64;

thread_local! {
    /// Canonical names currently being resolved on this thread, tagged
    /// with the owning container's identity, innermost last.
    static IN_PROGRESS: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// Handle over the thread-local in-progress stack for one container.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolutionContext {
    container_id: usize,
}

impl ResolutionContext {
    pub fn for_container(container_id: usize) -> Self {
        Self { container_id }
    }

    /// Pushes a canonical name onto the in-progress stack.
    ///
    /// The returned frame pops the entry when dropped, so a failing or
    /// panicking construction cannot leave the stack dirty.
    ///
    /// # Errors
    /// [`ContainerError::CircularDependency`] when the name is already
    /// in progress for this container, or when the stack exceeds
    /// [`MAX_RESOLUTION_DEPTH`].
    pub fn enter(&self, canonical: &str) -> Result<StackFrame> {
        let container_id = self.container_id;
        IN_PROGRESS.with(|stack| {
            let mut stack = stack.borrow_mut();

            let revisited = stack
                .iter()
                .any(|(id, name)| *id == container_id && name == canonical);
            if revisited || stack.len() >= MAX_RESOLUTION_DEPTH {
                let mut chain = chain_of(&stack, container_id);
                chain.push(canonical.to_owned());
                return Err(ContainerError::CircularDependency(
                    CircularDependencyError { chain },
                ));
            }

            stack.push((container_id, canonical.to_owned()));
            Ok(())
        })?;

        Ok(StackFrame)
    }

    /// The current chain for this container, innermost name last.
    pub fn chain(&self) -> Vec<String> {
        IN_PROGRESS.with(|stack| chain_of(&stack.borrow(), self.container_id))
    }
}

fn chain_of(stack: &[(usize, String)], container_id: usize) -> Vec<String> {
    stack
        .iter()
        .filter(|(id, _)| *id == container_id)
        .map(|(_, name)| name.clone())
        .collect()
}

/// RAII frame that pops its stack entry on drop.
///
/// Frames are created and dropped in strict LIFO order by the recursive
/// resolver, so popping the top entry is always correct.
#[derive(Debug)]
pub(crate) struct StackFrame;

impl Drop for StackFrame {
    fn drop(&mut self) {
        IN_PROGRESS.with(|stack| {
            let _ = stack.borrow_mut().pop();
        });
    }
}

/// Explicit constructor-parameter overrides, matched by name.
///
/// Overrides apply only to the outermost constructed type; recursive
/// dependency resolution runs with an empty set. They are ignored
/// entirely on singleton cache hits.
///
/// # Examples
/// ```rust,ignore
/// let report = container.make_with("report", &Parameters::new().with("year", 2026u16))?;
/// ```
#[derive(Clone, Default)]
pub struct Parameters {
    values: HashMap<String, Instance>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, consuming and returning `self` for chaining.
    pub fn with<T: Send + Sync + 'static>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: T) {
        let _ = self.values.insert(name.into(), Arc::new(value) as Instance);
    }

    pub fn get(&self, name: &str) -> Option<Instance> {
        self.values.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Debug for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameters")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
