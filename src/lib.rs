pub mod classify;
pub mod config;
pub mod error;
pub mod jsonl;
pub mod llm;
pub mod normalize;
pub mod runner;
pub mod scoring;
pub mod types;

pub use crate::config::Config;
pub use crate::error::TransportError;
pub use crate::normalize::normalize_label;
pub use crate::runner::{run_files, Engine};
pub use crate::scoring::RunStats;
pub use crate::types::{CanonicalLabel, GoldValue, InputRecord, OutputRecord};
