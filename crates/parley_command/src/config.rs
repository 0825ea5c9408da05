//! Engine behavior switches.

use crate::descriptor::{DEFAULT_OPTIONAL_FLAG, OptionalFlag};

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct EngineConfig {
    /// How declared `required` flags map to descriptor `optional` flags.
    pub optional_flag: OptionalFlag,
    /// Reject tokens beyond a non-variadic command's arity.
    pub strict_arity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            optional_flag: DEFAULT_OPTIONAL_FLAG,
            strict_arity: false,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optional-flag semantics.
    #[must_use]
    pub const fn with_optional_flag(mut self, flag: OptionalFlag) -> Self {
        self.optional_flag = flag;
        self
    }

    /// Enables or disables strict arity checking.
    #[must_use]
    pub const fn with_strict_arity(mut self, strict: bool) -> Self {
        self.strict_arity = strict;
        self
    }
}
