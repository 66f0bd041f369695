//! Alias table — alias-name to abstract-name indirection.
//!
//! Aliases resolve transitively: `log -> logger -> console.logger`.
//! Cycle detection happens at registration time by walking the existing
//! chain, so a bad `alias()` call fails fast instead of hanging a later
//! `make()`.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{AliasViolation, ContainerError, InvalidAliasError, Result};

/// Defensive bound on alias-chain walks.
///
/// Registration-time checks should make a cycle impossible; the bound
/// converts any residual one into a reported error instead of a loop.
const MAX_ALIAS_DEPTH: usize = 32;

/// Stores alias-name -> abstract-name entries.
#[derive(Debug, Default)]
pub(crate) struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` as an alternate name for `target`.
    ///
    /// # Errors
    /// [`ContainerError::InvalidAlias`] when `alias == target`, or when
    /// the insertion would complete a cycle through existing entries.
    pub fn alias(&mut self, target: &str, alias: &str) -> Result<()> {
        if alias == target {
            return Err(ContainerError::InvalidAlias(InvalidAliasError {
                alias: alias.to_owned(),
                target: target.to_owned(),
                violation: AliasViolation::SelfReferential,
                chain: vec![],
            }));
        }

        // Walk the chain starting at `target`; reaching `alias` means the
        // new entry would close a cycle.
        let mut chain = vec![alias.to_owned(), target.to_owned()];
        let mut current = target;
        while let Some(next) = self.aliases.get(current) {
            chain.push(next.clone());
            if next == alias {
                return Err(ContainerError::InvalidAlias(InvalidAliasError {
                    alias: alias.to_owned(),
                    target: target.to_owned(),
                    violation: AliasViolation::Cycle,
                    chain,
                }));
            }
            current = next;
        }

        debug!(alias, target, "Registered alias");
        self.aliases.insert(alias.to_owned(), target.to_owned());
        Ok(())
    }

    /// Follows the alias chain until no further alias exists.
    ///
    /// # Errors
    /// [`ContainerError::InvalidAlias`] when the walk exceeds
    /// [`MAX_ALIAS_DEPTH`].
    pub fn canonical(&self, name: &str) -> Result<String> {
        let mut current = name;
        let mut chain = vec![name.to_owned()];

        while let Some(next) = self.aliases.get(current) {
            trace!(from = current, to = %next, "Following alias");
            chain.push(next.clone());
            if chain.len() > MAX_ALIAS_DEPTH {
                return Err(ContainerError::InvalidAlias(InvalidAliasError {
                    alias: name.to_owned(),
                    target: next.clone(),
                    violation: AliasViolation::DepthExceeded,
                    chain,
                }));
            }
            current = next;
        }

        Ok(current.to_owned())
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Removes an alias entry, if present.
    ///
    /// Used when a name gains its own binding or instance and must no
    /// longer redirect.
    pub fn forget(&mut self, name: &str) {
        if self.aliases.remove(name).is_some() {
            debug!(name, "Removed alias");
        }
    }

    pub fn registered_names(&self) -> Vec<String> {
        self.aliases.keys().cloned().collect()
    }

    pub fn flush(&mut self) {
        self.aliases.clear();
    }
}
