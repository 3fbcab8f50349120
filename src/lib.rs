pub mod block;
pub mod codegen;
pub mod driver;
pub mod emit;
pub mod error;
pub mod loader;
pub mod names;
pub mod order;
pub mod target;
