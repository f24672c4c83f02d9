mod node_factory;
pub use node_factory::*;
mod node_tests;
pub use node_tests::*;
