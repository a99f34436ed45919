use clap::Parser;
use mnemo::cli::{Cli, Commands};
use mnemo::types::config::Config;
use mnemo::MnemoResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> MnemoResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        // Use config value if no flag was specified
        config.general.log_level.clone()
    };

    // Initialize logging with appropriate level
    let filter = EnvFilter::from_default_env().add_directive(
        format!("mnemo={}", log_level)
            .parse()
            .unwrap_or_else(|_| "mnemo=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            mnemo::cli::commands::init(path).await?;
        }
        Commands::Ask {
            question,
            show_source,
        } => {
            mnemo::cli::commands::ask(&question, show_source, &config).await?;
        }
        Commands::Get { question } => {
            mnemo::cli::commands::get(&question, &config).await?;
        }
        Commands::Put { question, answer } => {
            mnemo::cli::commands::put(&question, &answer, &config).await?;
        }
        Commands::Stats { json } => {
            mnemo::cli::commands::stats(json, &config).await?;
        }
        Commands::Config => {
            mnemo::cli::commands::config_cmd(&cli.config).await?;
        }
        Commands::Interactive => {
            mnemo::cli::commands::interactive(&config).await?;
        }
    }

    Ok(())
}
