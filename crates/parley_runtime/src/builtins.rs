//! Built-in shell commands.
//!
//! These are registered through the same [`Engine`] as application commands
//! and return their output as a string value for the shell to print.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parley_command::{
    BoundArgs, CommandDescriptor, CommandHandler, CommandMeta, Engine, HandlerMethod, ParamMeta,
    WeakEngine,
};
use parley_foundation::{Error, HandlerError, Result, Type, Value};
use parley_lexer::escape_string;

/// The built-in command set.
pub struct Builtins {
    engine: WeakEngine,
    exit: Arc<AtomicBool>,
}

impl Builtins {
    /// Creates the built-ins for an engine.
    ///
    /// `exit` is set when `exit` or `quit` runs.
    #[must_use]
    pub fn new(engine: &Engine, exit: Arc<AtomicBool>) -> Self {
        Self {
            engine: engine.downgrade(),
            exit,
        }
    }

    /// Registers the built-ins into `engine`.
    ///
    /// # Errors
    ///
    /// Returns a name-conflict error if any built-in name is already taken.
    pub fn register(engine: &Engine, exit: Arc<AtomicBool>) -> Result<()> {
        let descriptors = engine.register_handler(&Self::new(engine, exit))?;
        log::debug!("registered {} built-in commands", descriptors.len());
        Ok(())
    }
}

fn upgrade(engine: &WeakEngine) -> std::result::Result<Engine, HandlerError> {
    engine.upgrade().ok_or_else(|| "engine has been dropped".into())
}

impl CommandHandler for Builtins {
    fn methods(&self) -> Vec<HandlerMethod> {
        let help_engine = self.engine.clone();
        let describe_engine = self.engine.clone();
        let exit = Arc::clone(&self.exit);

        vec![
            HandlerMethod::new("help", move |args: &BoundArgs| {
                let engine = upgrade(&help_engine)?;
                Ok(Value::from(help_text(&engine.get_commands(args.str(0)))))
            })
            .with_meta(
                CommandMeta::new()
                    .with_alias("?")
                    .with_description("List commands, optionally only those with the given prefix"),
            )
            .with_param(
                Type::String,
                ParamMeta::new("prefix")
                    .with_required(false)
                    .with_description("Exact command prefix to filter by"),
            ),
            HandlerMethod::new("describe", move |args: &BoundArgs| {
                let engine = upgrade(&describe_engine)?;
                let name = args.str(0).unwrap_or_default();
                let descriptor = engine
                    .get_command(name)
                    .ok_or_else(|| Error::unknown_command(name))?;
                Ok(Value::from(describe_text(&descriptor)))
            })
            .with_meta(CommandMeta::new().with_description("Show everything known about a command"))
            .with_param(
                Type::String,
                ParamMeta::new("command").with_description("Command name or alias"),
            ),
            HandlerMethod::new("echo", |args: &BoundArgs| {
                let words = args.list(0).map_or_else(String::new, |words| {
                    words
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                });
                Ok(Value::from(words))
            })
            .with_meta(CommandMeta::new().with_description("Print the arguments"))
            .with_param(Type::list(Type::String), ParamMeta::new("words"))
            .variadic(),
            HandlerMethod::new("escape", |args: &BoundArgs| {
                Ok(Value::from(escape_string(args.str(0).unwrap_or_default())))
            })
            .with_meta(CommandMeta::new().with_description("Quote text so it lexes as one token"))
            .with_param(Type::String, ParamMeta::new("text")),
            HandlerMethod::new("exit", move |_: &BoundArgs| {
                exit.store(true, Ordering::SeqCst);
                Ok(Value::Nil)
            })
            .with_meta(
                CommandMeta::new()
                    .with_alias("quit")
                    .with_description("Leave the shell"),
            ),
        ]
    }
}

/// Renders one usage line per command.
#[must_use]
pub fn help_text(descriptors: &[Arc<CommandDescriptor>]) -> String {
    let usages: Vec<String> = descriptors.iter().map(|d| d.usage()).collect();
    let width = usages.iter().map(String::len).max().unwrap_or(0);

    let mut text = String::new();
    for (descriptor, usage) in descriptors.iter().zip(&usages) {
        if !text.is_empty() {
            text.push('\n');
        }
        if descriptor.description.is_empty() {
            text.push_str(usage);
        } else {
            let _ = write!(text, "{usage:width$}  {}", descriptor.description);
        }
    }
    text
}

/// Renders a descriptor's full metadata.
#[must_use]
pub fn describe_text(descriptor: &CommandDescriptor) -> String {
    let mut text = format!("{}\n  usage: {}", descriptor.name, descriptor.usage());

    let fields = [
        ("description", descriptor.description.as_str()),
        ("prefix", descriptor.prefix.as_str()),
        ("author", descriptor.author.as_str()),
        ("version", descriptor.version.as_str()),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            let _ = write!(text, "\n  {label}: {value}");
        }
    }
    if !descriptor.aliases.is_empty() {
        let _ = write!(text, "\n  aliases: {}", descriptor.aliases.join(", "));
    }

    if !descriptor.parameters.is_empty() {
        text.push_str("\n  parameters:");
        for param in &descriptor.parameters {
            let flag = if param.optional { "optional" } else { "required" };
            let _ = write!(
                text,
                "\n    {} {}: {} ({flag})",
                param.position, param.name, param.value_type
            );
            if !param.description.is_empty() {
                let _ = write!(text, " - {}", param.description);
            }
        }
    }
    text
}
