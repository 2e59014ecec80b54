pub mod log;
pub mod state;
pub mod tools;

pub use log::*;
pub use state::*;
pub use tools::*;
