//! CLI command implementations.

mod chunk;
mod config;
mod doctor;
mod generate;
mod repair;

pub use chunk::run_chunk;
pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::{run_generate, GenerateKind};
pub use repair::run_repair;
