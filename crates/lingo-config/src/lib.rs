//! # Lingo Config
//!
//! Type-safe configuration management for lingo.
//!
//! This crate provides configuration loading, validation, and caching
//! with support for atomic saves and lock-free hot swaps.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
