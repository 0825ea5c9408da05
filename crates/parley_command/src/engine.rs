//! The command engine.
//!
//! An [`Engine`] owns the command table, the alias table, and the converter
//! chain. It is a cheap, cloneable handle: clones share the same tables.
//! All three tables sit behind one lock; readers copy a persistent snapshot
//! and release the lock before any converter or handler runs, so handlers
//! may call back into the engine.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use parley_foundation::{Error, ErrorContext, Result, Type, Value};
use parley_lexer::{Token, tokenize};

use crate::binder::{self, BoundArgs};
use crate::config::EngineConfig;
use crate::converter::{Converter, ConverterChain};
use crate::descriptor::CommandDescriptor;
use crate::handler::{CommandHandler, HandlerMethod};
use crate::invocation::Invocation;
use crate::registry::{CommandRegistry, RegisteredCommand};

#[derive(Default)]
struct Tables {
    registry: CommandRegistry,
    converters: ConverterChain,
}

struct Inner {
    tables: RwLock<Tables>,
    config: EngineConfig,
}

/// Parses, resolves, binds, and runs command lines.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

/// A non-owning reference to an [`Engine`].
///
/// Commands that need the engine they are registered in (such as `help`)
/// hold one of these to avoid a reference cycle.
#[derive(Clone, Debug)]
pub struct WeakEngine {
    inner: Weak<Inner>,
}

impl WeakEngine {
    /// Returns the engine if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Engine> {
        self.inner.upgrade().map(|inner| Engine { inner })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                tables: RwLock::new(Tables::default()),
                config,
            }),
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.inner.config
    }

    /// Returns a weak handle to this engine.
    #[must_use]
    pub fn downgrade(&self) -> WeakEngine {
        WeakEngine {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // Mutation is check-then-commit, so a poisoned lock still guards
    // consistent tables.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn command(&self, method: HandlerMethod) -> Result<RegisteredCommand> {
        let descriptor = CommandDescriptor::from_method(&method, self.inner.config.optional_flag)?;
        Ok(RegisteredCommand::new(descriptor, method.func))
    }

    /// Registers a single handler method as a command.
    ///
    /// # Errors
    ///
    /// Returns an invalid-signature error for an unusable method, or a
    /// name-conflict error if its name or an alias is taken. The tables are
    /// unchanged on failure.
    pub fn register(&self, method: HandlerMethod) -> Result<Arc<CommandDescriptor>> {
        let command = self.command(method)?;
        let descriptor = Arc::clone(command.descriptor());
        self.write().registry.register(command)?;
        Ok(descriptor)
    }

    /// Registers every method of a handler, then its converters.
    ///
    /// The methods are registered all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the first signature or name-conflict error; nothing from the
    /// handler is registered in that case.
    pub fn register_handler(
        &self,
        handler: &dyn CommandHandler,
    ) -> Result<Vec<Arc<CommandDescriptor>>> {
        let commands = handler
            .methods()
            .into_iter()
            .map(|method| self.command(method))
            .collect::<Result<Vec<_>>>()?;
        let descriptors = commands
            .iter()
            .map(|command| Arc::clone(command.descriptor()))
            .collect();

        let mut tables = self.write();
        let mut registry = tables.registry.clone();
        for command in commands {
            registry.register(command)?;
        }
        tables.registry = registry;
        for converter in handler.converters() {
            tables.converters.add(converter);
        }
        Ok(descriptors)
    }

    /// Removes a command and all of its aliases.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error if `name` resolves to nothing.
    pub fn unregister(&self, name: &str) -> Result<Arc<CommandDescriptor>> {
        let command = self.write().registry.unregister(name)?;
        Ok(Arc::clone(command.descriptor()))
    }

    /// Resolves a name or alias to its descriptor.
    #[must_use]
    pub fn get_command(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.read().registry.get_command(name)
    }

    /// Descriptors whose prefix equals `prefix`, or all of them.
    #[must_use]
    pub fn get_commands(&self, prefix: Option<&str>) -> Vec<Arc<CommandDescriptor>> {
        self.read().registry.commands(prefix)
    }

    /// Returns true if no command uses `name` as its name or an alias.
    #[must_use]
    pub fn is_command_name_available(&self, name: &str) -> bool {
        self.read().registry.is_command_name_available(name)
    }

    /// Canonical names of all registered commands, in order.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        self.read().registry.names().map(String::from).collect()
    }

    /// A point-in-time copy of the command and alias tables.
    #[must_use]
    pub fn registry(&self) -> CommandRegistry {
        self.read().registry.clone()
    }

    /// Appends a converter to the chain.
    pub fn add_converter(&self, converter: Arc<dyn Converter>) {
        self.write().converters.add(converter);
    }

    /// Removes a converter by identity.
    ///
    /// Returns `true` if it was registered.
    pub fn remove_converter(&self, converter: &Arc<dyn Converter>) -> bool {
        self.write().converters.remove(converter)
    }

    /// Registers every converter a handler brings along.
    ///
    /// Returns how many were added.
    pub fn add_converters_from(&self, handler: &dyn CommandHandler) -> usize {
        let converters = handler.converters();
        let count = converters.len();
        let mut tables = self.write();
        for converter in converters {
            tables.converters.add(converter);
        }
        count
    }

    /// A point-in-time copy of the converter chain.
    #[must_use]
    pub fn converters(&self) -> ConverterChain {
        self.read().converters.clone()
    }

    /// Converts raw text through the converter chain.
    ///
    /// # Errors
    ///
    /// See [`ConverterChain::convert`].
    pub fn convert(&self, raw: &str, target: &Type) -> Result<Value> {
        self.converters().convert(raw, target)
    }

    /// Binds tokens to a command's parameters.
    ///
    /// # Errors
    ///
    /// See [`binder::bind`].
    pub fn bind(&self, tokens: &[Token], descriptor: &CommandDescriptor) -> Result<BoundArgs> {
        binder::bind(tokens, descriptor, &self.converters(), &self.inner.config)
    }

    /// Tokenizes, resolves, and binds a line.
    ///
    /// Returns `Ok(None)` if the line has no tokens.
    ///
    /// # Errors
    ///
    /// Returns an unknown-command error if the first token names no
    /// command, or any binding error.
    pub fn resolve(&self, line: &str) -> Result<Option<Invocation>> {
        let tokens = tokenize(line);
        let Some(first) = tokens.first() else {
            return Ok(None);
        };

        let (command, converters) = {
            let tables = self.read();
            (
                tables.registry.get(first.text()).cloned(),
                tables.converters.clone(),
            )
        };
        let command = command.ok_or_else(|| {
            Error::unknown_command(first.text())
                .with_context(ErrorContext::new().with_token(first.text(), first.index()))
        })?;

        let args = binder::bind(&tokens, command.descriptor(), &converters, &self.inner.config)?;
        Ok(Some(Invocation::new(command, args)))
    }

    /// Runs a line end to end.
    ///
    /// Returns `Ok(None)` for a line with no tokens, otherwise the handler's
    /// result.
    ///
    /// # Errors
    ///
    /// Returns any resolution, binding, or invocation error.
    pub fn dispatch(&self, line: &str) -> Result<Option<Value>> {
        match self.resolve(line)? {
            Some(invocation) => invocation.invoke().map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.read();
        f.debug_struct("Engine")
            .field("config", &self.inner.config)
            .field("commands", &tables.registry.names().collect::<Vec<_>>())
            .field("converters", &tables.converters)
            .finish()
    }
}
