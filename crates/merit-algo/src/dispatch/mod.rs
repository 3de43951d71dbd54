//! Economic dispatch of a merit-ordered fleet

mod config;
mod engine;
mod solution;

pub use config::DispatchConfig;
pub use engine::{DispatchEngine, SearchStats};
pub use solution::DispatchSolution;
