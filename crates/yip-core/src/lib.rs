//! Core types, attribute resolvers and errors for the yip layout compiler.
//!
//! This crate provides the foundational pieces shared by the other yip crates:
//! - Value types for presentation attributes (colors, fonts, scale modes, alignment)
//! - Stateless resolvers turning raw XML attribute strings into those values
//! - The error taxonomy used throughout parsing and validation

pub mod attributes;
pub mod errors;
pub mod types;

pub use attributes::*;
pub use errors::*;
pub use types::*;
