//! Command registry, argument conversion, binding, and dispatch for Parley.
//!
//! This crate turns a line of text into a validated, bound, invocable
//! command.
//!
//! # Architecture
//!
//! ```text
//! "greet Alice 3"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   LEXER         │  → [greet@0, Alice@6, 3@12]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ REGISTRY        │  → "greet" (via alias table) → CommandDescriptor
//! │ LOOKUP          │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ BINDER          │  → [Some("Alice"), Some(3)]  (via converter chain)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ INVOCATION      │  → handler(&BoundArgs) → Value
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handler`] - Handler methods and their declared metadata
//! - [`descriptor`] - Command and parameter descriptors built at registration
//! - [`converter`] - Pluggable converter chain with elementary fallback
//! - [`registry`] - Command and alias tables with conflict detection
//! - [`binder`] - Maps tokens onto declared parameters
//! - [`invocation`] - A bound command ready to run
//! - [`engine`] - The caller-owned engine tying it all together
//! - [`config`] - Engine behavior switches

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binder;
pub mod config;
pub mod converter;
pub mod descriptor;
pub mod engine;
pub mod handler;
pub mod invocation;
pub mod registry;

// Re-export main types for convenience
pub use binder::{BoundArgs, bind};
pub use config::EngineConfig;
pub use converter::{Converter, ConverterChain, FnConverter, convert_elementary};
pub use descriptor::{
    CommandDescriptor, DEFAULT_OPTIONAL_FLAG, OptionalFlag, ParameterDescriptor,
};
pub use engine::{Engine, WeakEngine};
pub use handler::{CommandHandler, CommandMeta, HandlerFn, HandlerMethod, ParamMeta, ParamSignature};
pub use invocation::Invocation;
pub use registry::{CommandRegistry, RegisteredCommand};
