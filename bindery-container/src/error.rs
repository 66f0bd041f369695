//! Error types for container operations.
//!
//! Every resolution failure names the offending abstract name and the
//! dependency chain that led to it, e.g. `"B -> A: A is not instantiable"`.

use std::fmt;

use bindery_support::rendering::render_chain;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Alias registration was rejected (self-alias or cycle).
    #[error("{}", .0)]
    InvalidAlias(InvalidAliasError),

    /// Resolved concrete name matches no binding and no registered type.
    #[error("{}", .0)]
    ClassNotFound(ClassNotFoundError),

    /// The type exists but cannot be built.
    #[error("{}", .0)]
    NotInstantiable(NotInstantiableError),

    /// A constructor parameter has no declared type, no default,
    /// and no explicit override.
    #[error("{}", .0)]
    UnresolvableParameter(UnresolvableParameterError),

    /// The resolution stack revisited an in-progress name, or the
    /// defensive depth guard tripped.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// A typed downcast found a different concrete type than requested.
    #[error("Type mismatch{}: expected {expected}", render_context(.context))]
    TypeMismatch {
        expected: &'static str,
        context: String,
    },
}

fn render_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(" ({context})")
    }
}

/// Why an alias registration or chain walk failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasViolation {
    /// `alias(X, X)` — an alias may not refer to itself.
    SelfReferential,
    /// Inserting the alias would complete a cycle in the alias graph.
    Cycle,
    /// The chain walk exceeded the defensive maximum depth.
    DepthExceeded,
}

/// Error when an alias registration is rejected, or an alias chain
/// cannot be resolved.
///
/// Raised synchronously at registration time, never deferred.
#[derive(Debug)]
pub struct InvalidAliasError {
    /// The alias name being registered or walked.
    pub alias: String,
    /// The abstract name the alias points to.
    pub target: String,
    /// What rule was violated.
    pub violation: AliasViolation,
    /// The alias chain that exposed the problem.
    pub chain: Vec<String>,
}

impl fmt::Display for InvalidAliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            AliasViolation::SelfReferential => {
                write!(f, "Alias {:?} is aliased to itself", self.alias)
            }
            AliasViolation::Cycle => {
                write!(
                    f,
                    "Registering alias {:?} -> {:?} would create a cycle:\n  {}",
                    self.alias,
                    self.target,
                    render_chain(&self.chain),
                )
            }
            AliasViolation::DepthExceeded => {
                write!(
                    f,
                    "Alias chain for {:?} exceeds the maximum depth:\n  {}",
                    self.alias,
                    render_chain(&self.chain),
                )
            }
        }
    }
}

/// Error when a canonical name matches no known type at all.
///
/// Includes "did you mean?" suggestions against the registered names.
#[derive(Debug)]
pub struct ClassNotFoundError {
    /// The name that could not be resolved.
    pub name: String,
    /// The dependency chain leading to the failure (innermost last).
    pub chain: Vec<String>,
    /// Similar names that ARE registered.
    pub suggestions: Vec<String>,
}

impl fmt::Display for ClassNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?} is not a known type or binding", render_chain(&self.chain), self.name)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: register a binding or a type descriptor for {:?} before resolving it",
            self.name
        )
    }
}

/// Error when a target exists but cannot be built.
#[derive(Debug)]
pub struct NotInstantiableError {
    /// The name that cannot be instantiated.
    pub name: String,
    /// The dependency chain leading to the failure (innermost last).
    pub chain: Vec<String>,
    /// Short reason, e.g. "interface-like with no concrete binding".
    pub reason: String,
}

impl fmt::Display for NotInstantiableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} is not instantiable ({})",
            render_chain(&self.chain),
            self.name,
            self.reason,
        )
    }
}

/// Error when a constructor parameter cannot be satisfied.
///
/// The parameter has no declared type to autowire, no default value,
/// and no explicit override was supplied to `make_with`.
#[derive(Debug)]
pub struct UnresolvableParameterError {
    /// The type whose constructor declares the parameter.
    pub type_name: String,
    /// The parameter that could not be resolved.
    pub parameter: String,
    /// The dependency chain leading to the failure (innermost last).
    pub chain: Vec<String>,
}

impl fmt::Display for UnresolvableParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: unresolvable parameter {:?} of {}",
            render_chain(&self.chain),
            self.parameter,
            self.type_name,
        )?;
        write!(
            f,
            "\n  Hint: declare a type for the parameter, give it a default, or pass an override"
        )
    }
}

/// Error when a circular constructor dependency is detected.
///
/// Shows the full resolution chain so you can see WHERE the cycle is.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// The chain of in-progress names, ending with the revisited one.
    /// Example: `["A", "B", "A"]`
    pub chain: Vec<String>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circular dependency detected:\n  {}",
            render_chain(&self.chain),
        )?;
        write!(
            f,
            "\n  Hint: break the cycle with a factory binding that defers one side"
        )
    }
}

/// Convenient Result type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
