//! Interface de linha de comando do Mnemo.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mnemo - cache persistente de perguntas e respostas com fallback para LLM.
#[derive(Parser, Debug)]
#[command(name = "mnemo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "mnemo.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração e banco de dados no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Responde uma pergunta, consultando o cache antes do modelo.
    Ask {
        /// Pergunta a resolver.
        question: String,

        /// Mostra a origem da resposta (cache ou modelo).
        #[arg(short, long)]
        show_source: bool,
    },

    /// Busca uma resposta já armazenada (nunca consulta o modelo).
    Get {
        /// Pergunta a buscar (match exato).
        question: String,
    },

    /// Armazena ou substitui uma resposta manualmente.
    Put {
        /// Pergunta (chave literal).
        question: String,

        /// Resposta a armazenar.
        answer: String,
    },

    /// Mostra os contadores de acerto e estatísticas do banco.
    Stats {
        /// Emite as estatísticas em JSON.
        #[arg(short, long)]
        json: bool,
    },

    /// Mostra a configuração carregada.
    Config,

    /// Sessão interativa de perguntas e respostas.
    Interactive,
}
