//! # Mnemo
//!
//! Cache persistente de perguntas e respostas na frente de um LLM remoto.
//!
//! Mnemo responde perguntas consultando primeiro um banco SQLite local;
//! apenas perguntas nunca vistas chegam ao modelo remoto (Inference API
//! da Hugging Face), e cada resposta nova é armazenada para reuso. Dois
//! contadores persistentes registram quantas respostas vieram do cache
//! e quantas custaram uma chamada ao modelo.
//!
//! ## Módulos
//!
//! - [`cli`] - Interface de linha de comando
//! - [`resolver`] - Fluxo cache-primeiro de resolução de perguntas
//! - [`store`] - Armazenamento SQLite de pares QA e contadores
//! - [`client`] - Clientes de modelos remotos
//! - [`types`] - Tipos compartilhados

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod resolver;
pub mod store;
pub mod types;

pub use types::config::Config;
pub use types::errors::{MnemoError, MnemoResult};
