//! Command and parameter descriptors.
//!
//! Descriptors are built once, when a [`HandlerMethod`] is registered, and
//! are immutable afterwards.

use std::fmt::Write as _;

use parley_foundation::{Error, Result, Type};

use crate::handler::HandlerMethod;

/// How a parameter's declared `required` flag becomes its `optional` flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OptionalFlag {
    /// `optional = !required`.
    #[default]
    Negated,
    /// `optional = required`, copied through unchanged.
    ///
    /// This reproduces older registries, where a parameter declared
    /// required could be omitted and vice versa.
    Legacy,
}

impl OptionalFlag {
    /// Derives the `optional` flag from a declared `required` flag.
    #[must_use]
    pub const fn optional_from(self, required: bool) -> bool {
        match self {
            Self::Negated => !required,
            Self::Legacy => required,
        }
    }
}

/// The optional-flag semantics engines use unless configured otherwise.
pub const DEFAULT_OPTIONAL_FLAG: OptionalFlag = OptionalFlag::Negated;

/// Describes one declared parameter of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name (`p<position+1>` when none was declared).
    pub name: String,
    /// Zero-based position in the handler's parameter list.
    pub position: usize,
    /// Whether the binder may leave this slot unset.
    pub optional: bool,
    /// Parameter description.
    pub description: String,
    /// The declared type.
    pub value_type: Type,
}

/// Describes a registered command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Canonical lookup key (prefix included).
    pub name: String,
    /// Declared prefix, empty if none.
    pub prefix: String,
    /// Effective aliases (prefix included).
    pub aliases: Vec<String>,
    /// One-line description.
    pub description: String,
    /// Author of the command.
    pub author: String,
    /// Version string.
    pub version: String,
    /// Number of declared parameters.
    pub arity: usize,
    /// Declared parameters in order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Whether the last parameter absorbs all trailing tokens.
    pub variadic: bool,
}

impl CommandDescriptor {
    /// Builds the descriptor for a handler method.
    ///
    /// # Errors
    ///
    /// Returns an invalid-signature error if the command has no name, a
    /// variadic method does not end in a list parameter, or (with
    /// [`OptionalFlag::Negated`]) a parameter other than the last one is
    /// declared optional.
    pub fn from_method(method: &HandlerMethod, flag: OptionalFlag) -> Result<Self> {
        let meta = method.meta.clone().unwrap_or_default();

        let base_name = if meta.name.is_empty() {
            method.method_name.clone()
        } else {
            meta.name
        };
        if base_name.is_empty() {
            return Err(Error::invalid_signature(
                &method.method_name,
                "command has no name",
            ));
        }
        let name = format!("{}{base_name}", meta.prefix);

        let mut folded = vec![name.to_lowercase()];
        let mut aliases: Vec<String> = Vec::with_capacity(meta.aliases.len());
        for alias in meta.aliases.iter().filter(|alias| !alias.is_empty()) {
            let alias = format!("{}{alias}", meta.prefix);
            let key = alias.to_lowercase();
            if !folded.contains(&key) {
                folded.push(key);
                aliases.push(alias);
            }
        }

        let parameters: Vec<ParameterDescriptor> = method
            .params
            .iter()
            .enumerate()
            .map(|(position, param)| match &param.meta {
                Some(pm) => ParameterDescriptor {
                    name: pm.name.clone(),
                    position,
                    optional: flag.optional_from(pm.required),
                    description: pm.description.clone(),
                    value_type: param.value_type.clone(),
                },
                // Undeclared parameters are treated as not required.
                None => ParameterDescriptor {
                    name: format!("p{}", position + 1),
                    position,
                    optional: true,
                    description: String::new(),
                    value_type: param.value_type.clone(),
                },
            })
            .collect();

        if method.variadic {
            match parameters.last() {
                Some(last) if last.value_type.element().is_some() => {}
                Some(last) => {
                    return Err(Error::invalid_signature(
                        &name,
                        format!(
                            "variadic parameter '{}' must be a list, not {}",
                            last.name, last.value_type
                        ),
                    ));
                }
                None => {
                    return Err(Error::invalid_signature(
                        &name,
                        "variadic command declares no parameters",
                    ));
                }
            }
        }

        let last = parameters.len().saturating_sub(1);
        for (param, sig) in parameters.iter().zip(&method.params) {
            if param.position == last || !param.optional || sig.meta.is_none() {
                continue;
            }
            match flag {
                OptionalFlag::Negated => {
                    return Err(Error::invalid_signature(
                        &name,
                        format!(
                            "only the last parameter may be optional, but '{}' is at position {}",
                            param.name, param.position
                        ),
                    ));
                }
                OptionalFlag::Legacy => log::warn!(
                    "command '{name}': parameter '{}' is marked optional but is not last; it will be treated as required",
                    param.name
                ),
            }
        }

        Ok(Self {
            name,
            prefix: meta.prefix,
            aliases,
            description: meta.description,
            author: meta.author,
            version: meta.version,
            arity: parameters.len(),
            parameters,
            variadic: method.variadic,
        })
    }

    /// Returns the last declared parameter.
    #[must_use]
    pub fn last_parameter(&self) -> Option<&ParameterDescriptor> {
        self.parameters.last()
    }

    /// Returns the element type of the variadic parameter.
    #[must_use]
    pub fn variadic_element(&self) -> Option<&Type> {
        if self.variadic {
            self.last_parameter()
                .and_then(|param| param.value_type.element())
        } else {
            None
        }
    }

    /// Renders a usage line such as `greet <name> [times]`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        let last = self.parameters.len().saturating_sub(1);
        for param in &self.parameters {
            let is_last = param.position == last;
            let _ = if is_last && self.variadic {
                write!(usage, " [{}...]", param.name)
            } else if is_last && param.optional {
                write!(usage, " [{}]", param.name)
            } else {
                write!(usage, " <{}>", param.name)
            };
        }
        usage
    }
}
