//! Parameter binding.
//!
//! Maps the argument tokens of a line onto a command's declared parameters,
//! converting each through the [`ConverterChain`]. Binding is linear: the
//! first failure aborts it.

use parley_foundation::{Error, ErrorContext, ErrorKind, Result, Type, Value};
use parley_lexer::Token;

use crate::config::EngineConfig;
use crate::converter::ConverterChain;
use crate::descriptor::CommandDescriptor;

/// Converted arguments, one slot per declared parameter.
///
/// A slot is `None` when an optional parameter was left unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundArgs {
    names: Vec<String>,
    slots: Vec<Option<Value>>,
}

impl BoundArgs {
    /// Creates bound arguments from parameter names and slots.
    #[must_use]
    pub fn new(names: Vec<String>, slots: Vec<Option<Value>>) -> Self {
        Self { names, slots }
    }

    /// The value at `position`, if set.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    /// The value of the parameter called `name`, if set.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Value> {
        let position = self.names.iter().position(|n| n == name)?;
        self.get(position)
    }

    /// Returns true if the slot at `position` holds a value.
    #[must_use]
    pub fn is_set(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    /// The string at `position`.
    #[must_use]
    pub fn str(&self, position: usize) -> Option<&str> {
        self.get(position).and_then(Value::as_str)
    }

    /// The 32-bit integer at `position`.
    #[must_use]
    pub fn int(&self, position: usize) -> Option<i32> {
        self.get(position).and_then(Value::as_int)
    }

    /// The integer at `position`, widened to 64 bits.
    #[must_use]
    pub fn long(&self, position: usize) -> Option<i64> {
        self.get(position).and_then(Value::as_long)
    }

    /// The floating-point number at `position`, widened to 64 bits.
    #[must_use]
    pub fn double(&self, position: usize) -> Option<f64> {
        self.get(position).and_then(Value::as_double)
    }

    /// The boolean at `position`.
    #[must_use]
    pub fn bool(&self, position: usize) -> Option<bool> {
        self.get(position).and_then(Value::as_bool)
    }

    /// The list at `position`.
    #[must_use]
    pub fn list(&self, position: usize) -> Option<&im::Vector<Value>> {
        self.get(position).and_then(Value::as_list)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in parameter order.
    #[must_use]
    pub fn slots(&self) -> &[Option<Value>] {
        &self.slots
    }
}

impl From<Vec<Option<Value>>> for BoundArgs {
    fn from(slots: Vec<Option<Value>>) -> Self {
        Self {
            names: Vec::new(),
            slots,
        }
    }
}

/// Binds a tokenized line to a command's parameters.
///
/// `tokens[0]` is the command name; `tokens[1..]` are the arguments.
///
/// # Errors
///
/// - Missing argument, if a required parameter has no token.
/// - Invalid argument, wrapping the conversion error of the offending token.
/// - Converter contract, if a converter returned the wrong type.
/// - Arity mismatch, for surplus tokens when `config.strict_arity` is set.
pub fn bind(
    tokens: &[Token],
    descriptor: &CommandDescriptor,
    converters: &ConverterChain,
    config: &EngineConfig,
) -> Result<BoundArgs> {
    let args = tokens.get(1..).unwrap_or_default();
    let params = &descriptor.parameters;
    let mut slots: Vec<Option<Value>> = Vec::with_capacity(params.len());

    let Some((last, fixed)) = params.split_last() else {
        check_surplus(descriptor, args.len(), config)?;
        return Ok(BoundArgs::default());
    };

    for param in fixed {
        let token = args
            .get(param.position)
            .ok_or_else(|| missing(descriptor, param.position, &param.name))?;
        slots.push(Some(convert_token(
            token,
            &param.value_type,
            descriptor,
            converters,
        )?));
    }

    if descriptor.variadic {
        let element = last.value_type.element().ok_or_else(|| {
            Error::new(ErrorKind::Internal(format!(
                "variadic parameter '{}' of '{}' is not a list",
                last.name, descriptor.name
            )))
        })?;
        let rest = args.get(fixed.len()..).unwrap_or_default();
        let values = rest
            .iter()
            .map(|token| convert_token(token, element, descriptor, converters))
            .collect::<Result<im::Vector<Value>>>()?;
        log::trace!("bound {} variadic values to '{}'", values.len(), last.name);
        slots.push(Some(Value::List(values)));
    } else {
        let slot = match args.get(last.position) {
            Some(token) if token.is_empty() && last.optional => None,
            Some(token) => Some(convert_token(
                token,
                &last.value_type,
                descriptor,
                converters,
            )?),
            None if last.optional => None,
            None => return Err(missing(descriptor, last.position, &last.name)),
        };
        slots.push(slot);
        check_surplus(descriptor, args.len(), config)?;
    }

    let names = params.iter().map(|param| param.name.clone()).collect();
    Ok(BoundArgs::new(names, slots))
}

fn convert_token(
    token: &Token,
    target: &Type,
    descriptor: &CommandDescriptor,
    converters: &ConverterChain,
) -> Result<Value> {
    converters.convert(token.text(), target).map_err(|err| {
        let context = ErrorContext::new()
            .with_command(&descriptor.name)
            .with_token(token.text(), token.index());
        match err.kind {
            ErrorKind::ConverterContract { .. } => err.with_context(context),
            _ => Error::invalid_argument(token.text(), err).with_context(context),
        }
    })
}

fn missing(descriptor: &CommandDescriptor, position: usize, name: &str) -> Error {
    Error::missing_argument(position, name)
        .with_context(ErrorContext::new().with_command(&descriptor.name))
}

fn check_surplus(descriptor: &CommandDescriptor, supplied: usize, config: &EngineConfig) -> Result<()> {
    let expected = descriptor.arity;
    if supplied <= expected {
        return Ok(());
    }
    if config.strict_arity {
        return Err(Error::arity_mismatch(format!("at most {expected}"), supplied)
            .with_context(ErrorContext::new().with_command(&descriptor.name)));
    }
    log::debug!(
        "ignoring {} extra argument(s) to '{}'",
        supplied - expected,
        descriptor.name
    );
    Ok(())
}
