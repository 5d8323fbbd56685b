pub mod contract;
pub mod lenient;
pub mod wire;

pub use contract::*;
pub use wire::*;
