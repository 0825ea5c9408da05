//! Core types, values, and errors for Parley.
//!
//! This crate provides:
//! - [`Value`] - The values command arguments convert into
//! - [`Type`] - Type descriptors that parameters declare
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, HandlerError, Result};
pub use types::{NamedType, StringConstructor, Type};
pub use value::{Object, Value};
