//! Command and alias tables.
//!
//! The command table maps canonical names to registered commands. The alias
//! table maps every recognized name, folded to lowercase, to its canonical
//! name; each canonical name is also an alias of itself. Both tables are
//! persistent maps so a registry can be snapshotted cheaply.

use std::fmt;
use std::sync::Arc;

use parley_foundation::{Error, Result, Value};

use crate::binder::BoundArgs;
use crate::descriptor::CommandDescriptor;
use crate::handler::HandlerFn;

/// A descriptor paired with the callable it describes.
#[derive(Clone)]
pub struct RegisteredCommand {
    descriptor: Arc<CommandDescriptor>,
    handler: HandlerFn,
}

impl RegisteredCommand {
    /// Pairs a descriptor with its handler.
    #[must_use]
    pub fn new(descriptor: CommandDescriptor, handler: HandlerFn) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            handler,
        }
    }

    /// The command's descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<CommandDescriptor> {
        &self.descriptor
    }

    /// The canonical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Calls the handler with bound arguments.
    ///
    /// # Errors
    ///
    /// Returns an invocation error wrapping whatever the handler returned.
    pub fn invoke(&self, args: &BoundArgs) -> Result<Value> {
        (self.handler)(args).map_err(|source| Error::invocation(self.name(), source))
    }
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Folds a name for alias lookup.
fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// The command and alias tables.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    commands: im::OrdMap<String, RegisteredCommand>,
    aliases: im::HashMap<String, String>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` is not yet a name or alias of any command.
    #[must_use]
    pub fn is_command_name_available(&self, name: &str) -> bool {
        !self.aliases.contains_key(&fold(name))
    }

    /// Finds the first of a descriptor's names that is already taken.
    ///
    /// Returns the colliding name and the canonical command that owns it.
    fn find_conflict(&self, descriptor: &CommandDescriptor) -> Option<(String, String)> {
        std::iter::once(&descriptor.name)
            .chain(&descriptor.aliases)
            .find_map(|candidate| {
                self.aliases
                    .get(&fold(candidate))
                    .map(|existing| (candidate.clone(), existing.clone()))
            })
    }

    /// Registers a command under its canonical name and aliases.
    ///
    /// # Errors
    ///
    /// Returns a name-conflict error, leaving the registry unchanged, if the
    /// canonical name or any alias is already taken (case-insensitively).
    pub fn register(&mut self, command: RegisteredCommand) -> Result<()> {
        let descriptor = Arc::clone(command.descriptor());
        if let Some((name, existing)) = self.find_conflict(&descriptor) {
            return Err(Error::name_conflict(name, existing));
        }

        for alias in std::iter::once(&descriptor.name).chain(&descriptor.aliases) {
            self.aliases.insert(fold(alias), descriptor.name.clone());
        }
        self.commands.insert(descriptor.name.clone(), command);

        log::debug!(
            "registered command '{}' (aliases: {:?})",
            descriptor.name,
            descriptor.aliases
        );
        Ok(())
    }

    /// Removes a command and every alias that points at it.
    ///
    /// `name` may be the canonical name or any alias.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error if nothing is registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Result<RegisteredCommand> {
        let canonical = self
            .aliases
            .get(&fold(name))
            .cloned()
            .ok_or_else(|| Error::unknown_command(name))?;
        let command = self
            .commands
            .remove(&canonical)
            .ok_or_else(|| Error::unknown_command(name))?;
        self.aliases.retain(|_, target| *target != canonical);

        log::debug!("unregistered command '{canonical}'");
        Ok(command)
    }

    /// Resolves a name or alias (case-insensitively) to its command.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        let canonical = self.aliases.get(&fold(name))?;
        self.commands.get(canonical)
    }

    /// Resolves a name or alias to its descriptor.
    #[must_use]
    pub fn get_command(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.get(name).map(|command| Arc::clone(command.descriptor()))
    }

    /// Descriptors whose prefix exactly equals `prefix`, or all of them.
    ///
    /// Results are ordered by canonical name.
    #[must_use]
    pub fn commands(&self, prefix: Option<&str>) -> Vec<Arc<CommandDescriptor>> {
        self.commands
            .values()
            .map(RegisteredCommand::descriptor)
            .filter(|desc| prefix.is_none_or(|p| desc.prefix == p))
            .cloned()
            .collect()
    }

    /// Canonical names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Every recognized name and alias, folded to lowercase.
    pub fn alias_keys(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
