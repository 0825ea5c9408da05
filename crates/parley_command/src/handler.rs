//! Handler methods and their declared metadata.
//!
//! A [`HandlerMethod`] is what gets registered: the method's own name, the
//! command metadata it was declared with, one [`ParamSignature`] per
//! parameter, and the callable itself. A [`CommandHandler`] groups several
//! methods together with the converters they rely on.

use std::fmt;
use std::sync::Arc;

use parley_foundation::{HandlerError, Type, Value};

use crate::binder::BoundArgs;
use crate::converter::Converter;

/// The callable behind a command.
pub type HandlerFn = Arc<dyn Fn(&BoundArgs) -> Result<Value, HandlerError> + Send + Sync>;

/// Command metadata declared on a handler method.
///
/// Empty strings mean "not declared".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandMeta {
    /// Declared command name (defaults to the method name).
    pub name: String,
    /// Prefix prepended to the name and aliases.
    pub prefix: String,
    /// Additional names that resolve to this command.
    pub aliases: Vec<String>,
    /// One-line description.
    pub description: String,
    /// Author of the command.
    pub author: String,
    /// Version string.
    pub version: String,
}

impl CommandMeta {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata with a declared name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Metadata declared on a single parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamMeta {
    /// Parameter name.
    pub name: String,
    /// The declared "required" flag.
    pub required: bool,
    /// Parameter description.
    pub description: String,
}

impl ParamMeta {
    /// Creates metadata for a required parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: String::new(),
        }
    }

    /// Sets the required flag.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A declared parameter: its type and optional metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSignature {
    /// The declared type. Variadic parameters are `Type::List(element)`.
    pub value_type: Type,
    /// Metadata, if any was declared.
    pub meta: Option<ParamMeta>,
}

impl ParamSignature {
    /// Creates a parameter without metadata.
    #[must_use]
    pub const fn new(value_type: Type) -> Self {
        Self {
            value_type,
            meta: None,
        }
    }

    /// Attaches metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: ParamMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// A method that can be registered as a command.
#[derive(Clone)]
pub struct HandlerMethod {
    /// The method's own name.
    pub method_name: String,
    /// Declared command metadata.
    pub meta: Option<CommandMeta>,
    /// Declared parameters in order.
    pub params: Vec<ParamSignature>,
    /// Whether the last parameter absorbs all trailing tokens.
    pub variadic: bool,
    /// The callable.
    pub func: HandlerFn,
}

impl HandlerMethod {
    /// Creates a method with no parameters or metadata.
    pub fn new<F>(method_name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&BoundArgs) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        Self {
            method_name: method_name.into(),
            meta: None,
            params: Vec::new(),
            variadic: false,
            func: Arc::new(func),
        }
    }

    /// Sets the command metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: CommandMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Appends a parameter with metadata.
    #[must_use]
    pub fn with_param(mut self, value_type: Type, meta: ParamMeta) -> Self {
        self.params
            .push(ParamSignature::new(value_type).with_meta(meta));
        self
    }

    /// Appends a parameter without metadata.
    #[must_use]
    pub fn with_unnamed_param(mut self, value_type: Type) -> Self {
        self.params.push(ParamSignature::new(value_type));
        self
    }

    /// Appends a fully specified parameter.
    #[must_use]
    pub fn with_signature(mut self, signature: ParamSignature) -> Self {
        self.params.push(signature);
        self
    }

    /// Marks the last parameter as variadic.
    #[must_use]
    pub const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

impl fmt::Debug for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("method_name", &self.method_name)
            .field("meta", &self.meta)
            .field("params", &self.params)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

/// An object that exposes command methods.
pub trait CommandHandler {
    /// Every method this handler registers as a command.
    fn methods(&self) -> Vec<HandlerMethod>;

    /// Converters this handler brings along for its parameter types.
    fn converters(&self) -> Vec<Arc<dyn Converter>> {
        Vec::new()
    }
}
