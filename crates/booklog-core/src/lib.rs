//! Booklog Core — shared domain abstractions.
//!
//! This crate defines the error taxonomy, the key-value store contract and
//! the command trait that the reading-log context and the storage backends
//! depend on. It contains no infrastructure code.

pub mod command;
pub mod error;
pub mod store;
