mod debug;
pub use debug::*;
mod diagnostics;
pub use diagnostics::*;
mod estree;
pub use estree::*;
mod factory;
pub use factory::*;
mod scope;
pub use scope::*;
mod transformers;
pub use transformers::*;
mod types;
pub use types::*;
mod visitor;
pub use visitor::*;

#[cfg(test)]
pub(crate) mod testing;
