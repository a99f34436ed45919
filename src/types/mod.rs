//! Tipos compartilhados do Mnemo.

pub mod config;
pub mod errors;

pub use config::{Config, GeneralConfig, ModelConfig, StorageConfig};
pub use errors::{MnemoError, MnemoResult};
