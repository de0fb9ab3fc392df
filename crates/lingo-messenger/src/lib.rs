//! # Lingo Messenger
//!
//! Delivery of resolved messages to output channels.
//!
//! This crate resolves raw messages through the localization pipeline and
//! hands the final text to a pluggable [`MessageSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod error;
pub mod messenger;
pub mod sink;

pub use channel::*;
pub use error::*;
pub use messenger::*;
pub use sink::*;
