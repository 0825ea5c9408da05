//! Pluggable value conversion.
//!
//! A [`ConverterChain`] holds converters in registration order. The first
//! converter that applies to a `(raw, target)` pair wins; when none does,
//! [`convert_elementary`] handles strings, numbers, booleans, and named types
//! with a string constructor.

use std::fmt;
use std::sync::Arc;

use parley_foundation::{Error, Result, Type, Value};

/// Turns raw token text into a typed value.
pub trait Converter: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Converts `raw` to `target`, or returns `None` if not applicable.
    fn convert(&self, raw: &str, target: &Type) -> Option<Value>;
}

/// A converter backed by a closure.
pub struct FnConverter<F> {
    name: String,
    func: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&str, &Type) -> Option<Value> + Send + Sync,
{
    /// Creates a named converter from a closure.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&str, &Type) -> Option<Value> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, raw: &str, target: &Type) -> Option<Value> {
        (self.func)(raw, target)
    }
}

impl<F> fmt::Debug for FnConverter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered converters plus the elementary fallback.
///
/// Backed by a persistent vector, so cloning a chain is cheap.
#[derive(Clone, Default)]
pub struct ConverterChain {
    converters: im::Vector<Arc<dyn Converter>>,
}

impl ConverterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a converter to the end of the chain.
    pub fn add(&mut self, converter: Arc<dyn Converter>) {
        log::debug!("adding converter '{}'", converter.name());
        self.converters.push_back(converter);
    }

    /// Removes a converter by identity.
    ///
    /// Returns `true` if that exact converter was in the chain.
    pub fn remove(&mut self, converter: &Arc<dyn Converter>) -> bool {
        let position = self
            .converters
            .iter()
            .position(|c| std::ptr::addr_eq(Arc::as_ptr(c), Arc::as_ptr(converter)));
        match position {
            Some(index) => {
                self.converters.remove(index);
                log::debug!("removed converter '{}'", converter.name());
                true
            }
            None => false,
        }
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns true if no converters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Names of the registered converters, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.converters.iter().map(|c| c.name())
    }

    /// Converts raw text to the target type.
    ///
    /// # Errors
    ///
    /// Returns a converter-contract error if the first applicable converter
    /// produces a value `target` does not admit, or a conversion error if
    /// neither a converter nor the elementary fallback can produce a value.
    pub fn convert(&self, raw: &str, target: &Type) -> Result<Value> {
        for converter in &self.converters {
            let Some(value) = converter.convert(raw, target) else {
                continue;
            };
            if !target.admits(&value) {
                log::warn!(
                    "converter '{}' returned {} for target {target}",
                    converter.name(),
                    value.value_type()
                );
                return Err(Error::converter_contract(
                    converter.name(),
                    target.clone(),
                    value.value_type(),
                ));
            }
            log::trace!("converter '{}' converted {raw:?} to {target}", converter.name());
            return Ok(value);
        }
        convert_elementary(raw, target)
    }
}

impl fmt::Debug for ConverterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Converts raw text using only the built-in rules.
///
/// # Errors
///
/// Returns a conversion error if the text does not parse as the target
/// type, or if the target has no elementary conversion.
pub fn convert_elementary(raw: &str, target: &Type) -> Result<Value> {
    let because = |reason: String| Error::conversion_because(raw, target.clone(), reason);

    match target {
        Type::Any | Type::String => Ok(Value::from(raw)),
        Type::Int => raw.parse::<i32>().map(Value::Int).map_err(|e| because(e.to_string())),
        Type::Long => raw.parse::<i64>().map(Value::Long).map_err(|e| because(e.to_string())),
        Type::Float => raw.parse::<f32>().map(Value::Float).map_err(|e| because(e.to_string())),
        Type::Double => raw.parse::<f64>().map(Value::Double).map_err(|e| because(e.to_string())),
        Type::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(because("expected true or false".to_string()))
            }
        }
        Type::Named(named) => {
            let Some(construct) = named.constructor() else {
                return Err(Error::conversion(raw, target.clone()));
            };
            let value = construct(raw).map_err(|e| because(e.to_string()))?;
            if target.admits(&value) {
                Ok(value)
            } else {
                Err(Error::converter_contract(
                    named.name(),
                    target.clone(),
                    value.value_type(),
                ))
            }
        }
        Type::List(_) => Err(Error::conversion(raw, target.clone())),
    }
}
