pub mod cache;
pub mod cli;
pub mod config;
pub mod llm;
pub mod memory;
pub mod pipeline;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::workflow::launch;
