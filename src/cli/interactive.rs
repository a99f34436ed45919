//! Sessão interativa de perguntas e respostas.
//!
//! Este módulo implementa o REPL de perguntas usando dialoguer.

use std::collections::HashMap;

use dialoguer::{theme::ColorfulTheme, Input};

use crate::client::HuggingFaceClient;
use crate::resolver::Resolver;
use crate::store::{QaStore, DATABASE_HITS, LLM_HITS};
use crate::types::config::Config;
use crate::MnemoResult;

/// Executa a sessão interativa de perguntas.
///
/// Entrada vazia apenas repete o prompt; `exit` ou `quit` encerra a
/// sessão e mostra os totais acumulados dos contadores. Perguntas
/// aceitas são submetidas verbatim, sem normalização.
pub async fn run_interactive(config: &Config) -> MnemoResult<()> {
    let theme = ColorfulTheme::default();

    println!("\n💬 Mnemo - Sessão Interativa\n");
    println!("Digite uma pergunta, ou 'exit'/'quit' para sair.\n");

    let store = QaStore::open(&config.storage.db_path)?;
    let client = HuggingFaceClient::from_config(&config.model);
    let resolver = Resolver::new(store, Box::new(client));

    loop {
        let question: String = Input::with_theme(&theme)
            .with_prompt("Pergunta")
            .allow_empty(true)
            .interact_text()?;

        let trimmed = question.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        let spinner = super::commands::thinking_spinner();
        let result = resolver.resolve(&question).await;
        spinner.finish_and_clear();

        match result {
            Ok(resolution) => {
                println!("\n{}\n", resolution.answer);
                println!("  (origem: {})\n", resolution.source);
            }
            Err(e) => {
                // Falhas upstream não encerram a sessão; a pergunta
                // continua elegível para nova tentativa
                eprintln!("\n✗ {}\n", e);
            }
        }
    }

    show_counter_totals(&resolver.counters()?);

    Ok(())
}

/// Mostra o quadro de totais ao final da sessão.
fn show_counter_totals(counters: &HashMap<String, u64>) {
    println!("{}", render_counter_totals(counters));
}

/// Formata o quadro de totais dos contadores.
///
/// Os valores são os contadores persistidos, acumulados entre execuções,
/// não apenas os desta sessão.
fn render_counter_totals(counters: &HashMap<String, u64>) -> String {
    let database_hits = counters.get(DATABASE_HITS).copied().unwrap_or(0);
    let llm_hits = counters.get(LLM_HITS).copied().unwrap_or(0);

    format!(
        "\n📊 Totais Acumulados\n\n\
         ┌────────────────────────────────┐\n\
         │ Acertos no cache: {:<12} │\n\
         │ Consultas ao LLM: {:<12} │\n\
         │ Total:            {:<12} │\n\
         └────────────────────────────────┘\n",
        database_hits,
        llm_hits,
        database_hits + llm_hits
    )
}
