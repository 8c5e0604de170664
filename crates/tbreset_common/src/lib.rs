//! Shared foundational types used across the tbreset workspace.
//!
//! This crate provides interned identifiers for cheap AST name handling and
//! the internal error type used for failures that indicate a bug in tbreset
//! rather than a problem with the user's testbench.

#![warn(missing_docs)]

pub mod ident;
pub mod result;

pub use ident::{Ident, Interner};
pub use result::{InternalError, TbResult};
