pub mod config;
pub mod constants;
pub mod llm_types;
pub mod reveal;
pub mod state;
