#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![deny(unused_must_use)]

pub mod error;
pub mod invoke;
pub mod model;
pub mod registry;

pub use invoke::{Args, Macro};
pub use macroable_macros::Model;
pub use model::{Macroable, Model};
pub use registry::MacroRegistry;
