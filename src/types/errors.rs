//! Tipos de erro do Mnemo.

use thiserror::Error;

/// Tipo de resultado padrão do Mnemo.
pub type MnemoResult<T> = Result<T, MnemoError>;

/// Erros possíveis no Mnemo.
#[derive(Error, Debug)]
pub enum MnemoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Armazenamento indisponível: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Modelo remoto '{0}' falhou: {1}")]
    UpstreamModel(String, String),

    #[error("Timeout ao consultar o modelo '{0}'")]
    UpstreamTimeout(String),

    #[error("Contador desconhecido: '{0}'")]
    UnknownCounter(String),

    #[error("Configuração não encontrada em: {0}")]
    ConfigNotFound(String),

    #[cfg(feature = "cli")]
    #[error("Erro de entrada interativa: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl MnemoError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Indica se o erro veio do modelo remoto (falha ou timeout).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            MnemoError::UpstreamModel(_, _) | MnemoError::UpstreamTimeout(_)
        )
    }
}
