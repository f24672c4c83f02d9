#[macro_use]
mod macros;
mod compiler;
mod rust_helpers;

pub use compiler::*;
pub use rust_helpers::*;

#[cfg(test)]
pub(crate) use compiler::testing;
