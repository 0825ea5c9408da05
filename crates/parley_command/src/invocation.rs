//! A resolved, bound command ready to run.

use std::sync::Arc;

use parley_foundation::{Result, Value};

use crate::binder::BoundArgs;
use crate::descriptor::CommandDescriptor;
use crate::registry::RegisteredCommand;

/// A command together with its bound arguments.
///
/// Produced by [`Engine::resolve`](crate::Engine::resolve). Holding an
/// invocation does not keep the engine's tables locked.
#[derive(Clone, Debug)]
pub struct Invocation {
    command: RegisteredCommand,
    args: BoundArgs,
}

impl Invocation {
    /// Pairs a command with its arguments.
    #[must_use]
    pub fn new(command: RegisteredCommand, args: BoundArgs) -> Self {
        Self { command, args }
    }

    /// The command's descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<CommandDescriptor> {
        self.command.descriptor()
    }

    /// The bound arguments.
    #[must_use]
    pub fn args(&self) -> &BoundArgs {
        &self.args
    }

    /// Runs the handler.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if the handler fails; its error is kept
    /// as the source.
    pub fn invoke(&self) -> Result<Value> {
        log::trace!("invoking '{}' with {:?}", self.command.name(), self.args);
        self.command.invoke(&self.args)
    }
}
