//! # Lingo CLI
//!
//! Command-line front end for the lingo localization engine.
//!
//! Wires configuration, locale loading, message resolution and console
//! delivery together, and exposes them as subcommands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
