//! Integration tests for the parley_command crate.
//!
//! Tests for the command pipeline:
//! - Converter chain and elementary fallback
//! - Registry names, aliases, and conflicts
//! - Parameter binding (fixed, optional, variadic)
//! - Engine dispatch end to end

mod binder_tests;
mod converter_tests;
mod engine_tests;
mod registry_tests;
