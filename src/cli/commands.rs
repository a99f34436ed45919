//! Implementação dos comandos CLI do Mnemo.

use std::path::PathBuf;

use crate::client::HuggingFaceClient;
use crate::resolver::Resolver;
use crate::store::{QaStore, DATABASE_HITS, LLM_HITS};
use crate::types::config::Config;
use crate::{MnemoError, MnemoResult};

/// Initializes configuration and database in the specified directory.
pub async fn init(path: Option<PathBuf>) -> MnemoResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("mnemo.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'mnemo config' to inspect it.");
        return Ok(());
    }

    // Create default configuration
    let config = Config::default_config();
    config.save(&config_path)?;

    // Create the empty database with schema and zeroed counters
    let db_path = if config.storage.db_path.is_absolute() {
        config.storage.db_path.clone()
    } else {
        target_dir.join(&config.storage.db_path)
    };
    QaStore::open(&db_path)?;

    println!("Mnemo initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!("Database created at: {}", db_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Optionally set api_token in {}", config_path.display());
    println!("  2. Ask your first question: mnemo ask \"What is Rust?\"");
    println!("  3. Watch the cache fill up: mnemo stats");

    Ok(())
}

/// Responde uma pergunta, consultando o cache antes do modelo remoto.
pub async fn ask(question: &str, show_source: bool, config: &Config) -> MnemoResult<()> {
    // A validação vem antes de abrir o banco ou montar o cliente HTTP
    if question.trim().is_empty() {
        return Err(MnemoError::other("A pergunta não pode ser vazia"));
    }

    let store = QaStore::open(&config.storage.db_path)?;
    let client = HuggingFaceClient::from_config(&config.model);
    let resolver = Resolver::new(store, Box::new(client));

    let spinner = thinking_spinner();
    let result = resolver.resolve(question).await;
    spinner.finish_and_clear();

    let resolution = result?;
    println!("{}", resolution.answer);

    if show_source {
        println!();
        println!("Origem: {}", resolution.source);
    }

    Ok(())
}

/// Busca uma resposta já armazenada, sem consultar o modelo.
pub async fn get(question: &str, config: &Config) -> MnemoResult<()> {
    let store = QaStore::open(&config.storage.db_path)?;

    match store.get(question)? {
        Some(answer) => {
            println!("{}", answer);
            Ok(())
        }
        None => Err(MnemoError::other(format!(
            "Pergunta não está no cache: '{}'",
            question
        ))),
    }
}

/// Armazena ou substitui uma resposta manualmente.
pub async fn put(question: &str, answer: &str, config: &Config) -> MnemoResult<()> {
    let store = QaStore::open(&config.storage.db_path)?;
    store.put(question, answer)?;

    println!("✓ Resposta armazenada para: '{}'", question);

    Ok(())
}

/// Mostra os contadores de acerto e estatísticas do banco.
pub async fn stats(json: bool, config: &Config) -> MnemoResult<()> {
    let store = QaStore::open(&config.storage.db_path)?;
    let counters = store.get_all_counters()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counters)?);
        return Ok(());
    }

    let database_hits = counters.get(DATABASE_HITS).copied().unwrap_or(0);
    let llm_hits = counters.get(LLM_HITS).copied().unwrap_or(0);
    let total = database_hits + llm_hits;

    println!("Estatísticas do Mnemo\n");
    println!("  Respostas em cache: {}", store.count_records()?);
    println!("  Acertos no cache:   {}", database_hits);
    println!("  Consultas ao LLM:   {}", llm_hits);
    println!("  Total respondido:   {}", total);

    if total > 0 {
        let hit_rate = database_hits as f64 / total as f64 * 100.0;
        println!("  Taxa de acerto:     {:.1}%", hit_rate);
    }

    Ok(())
}

/// Mostra a configuração resolvida (token redigido).
pub async fn config_cmd(config_path: &PathBuf) -> MnemoResult<()> {
    if !config_path.exists() {
        return Err(MnemoError::ConfigNotFound(
            config_path.display().to_string(),
        ));
    }

    let config = Config::load(config_path)?;

    println!("Configuração carregada de: {}", config_path.display());
    println!();
    println!("[general]");
    println!("  log_level  = {}", config.general.log_level);
    println!("  log_format = {}", config.general.log_format);
    println!();
    println!("[storage]");
    println!("  db_path = {}", config.storage.db_path.display());
    println!();
    println!("[model]");
    println!("  repo_id        = {}", config.model.repo_id);
    println!(
        "  endpoint       = {}",
        config.model.endpoint.as_deref().unwrap_or("(padrão)")
    );
    println!(
        "  api_token      = {}",
        if config.model.api_token.is_some() {
            "[definido]"
        } else {
            "[não definido]"
        }
    );
    println!("  temperature    = {}", config.model.temperature);
    println!("  max_new_tokens = {}", config.model.max_new_tokens);
    println!("  timeout_secs   = {}", config.model.timeout_secs);

    Ok(())
}

/// Sessão interativa de perguntas e respostas.
pub async fn interactive(config: &Config) -> MnemoResult<()> {
    super::interactive::run_interactive(config).await
}

/// Spinner exibido enquanto o modelo remoto gera a resposta.
pub(crate) fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
