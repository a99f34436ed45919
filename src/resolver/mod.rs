//! Resolução de perguntas: cache primeiro, modelo remoto depois.
//!
//! O [`Resolver`] amarra o armazenamento ao cliente de modelo. Toda
//! pergunta passa pelo cache antes de gerar uma chamada de rede, e cada
//! resposta servida incrementa o contador da sua origem.

use std::collections::HashMap;

use tracing::debug;

use crate::client::ModelClient;
use crate::store::{QaStore, DATABASE_HITS, LLM_HITS};
use crate::MnemoResult;

/// Origem de uma resposta resolvida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// A resposta veio do cache persistente.
    Cache,
    /// A resposta foi gerada pelo modelo remoto nesta chamada.
    Model,
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Resposta resolvida, com a origem que a produziu.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub answer: String,
    pub source: AnswerSource,
}

/// Orquestra o fluxo cache-primeiro de resolução de perguntas.
pub struct Resolver {
    store: QaStore,
    client: Box<dyn ModelClient>,
}

impl Resolver {
    /// Cria um resolvedor sobre um armazenamento aberto e um cliente.
    pub fn new(store: QaStore, client: Box<dyn ModelClient>) -> Self {
        Self { store, client }
    }

    /// Resolve uma pergunta, consultando o cache antes do modelo.
    ///
    /// Em caso de acerto, o contador `database_hits` é incrementado e o
    /// modelo nunca é consultado. Em caso de falta, a resposta do modelo
    /// é persistida ANTES de `llm_hits` ser incrementado, para que um
    /// contador nunca conte uma resposta que não foi armazenada.
    ///
    /// Falhas upstream são propagadas sem tocar no cache nem nos
    /// contadores; a pergunta continua elegível para nova tentativa.
    pub async fn resolve(&self, question: &str) -> MnemoResult<Resolution> {
        if let Some(answer) = self.store.get(question)? {
            debug!("Resposta encontrada no cache");
            self.store.increment_counter(DATABASE_HITS)?;
            return Ok(Resolution {
                answer,
                source: AnswerSource::Cache,
            });
        }

        debug!("Cache vazio; consultando o modelo {}", self.client.name());
        let answer = self.client.complete(question).await?;

        self.store.put(question, &answer)?;
        self.store.increment_counter(LLM_HITS)?;

        Ok(Resolution {
            answer,
            source: AnswerSource::Model,
        })
    }

    /// Snapshot dos contadores de acerto.
    pub fn counters(&self) -> MnemoResult<HashMap<String, u64>> {
        self.store.get_all_counters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MnemoError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    struct StaticClient {
        answer: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ModelClient for StaticClient {
        fn name(&self) -> &str {
            "static"
        }

        async fn complete(&self, _question: &str) -> MnemoResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ModelClient for FailingClient {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _question: &str) -> MnemoResult<String> {
            Err(MnemoError::UpstreamModel(
                "failing".to_string(),
                "indisponível".to_string(),
            ))
        }
    }

    fn create_test_resolver(
        answer: &str,
    ) -> (Resolver, Arc<AtomicUsize>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = QaStore::open(&dir.path().join("test.db")).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let client = StaticClient {
            answer: answer.to_string(),
            calls: Arc::clone(&calls),
        };
        (Resolver::new(store, Box::new(client)), calls, dir)
    }

    #[tokio::test]
    async fn test_miss_calls_model_and_persists() {
        let (resolver, calls, _dir) = create_test_resolver("4");

        let resolution = resolver.resolve("What is 2+2?").await.unwrap();
        assert_eq!(resolution.answer, "4");
        assert_eq!(resolution.source, AnswerSource::Model);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let counters = resolver.counters().unwrap();
        assert_eq!(counters[LLM_HITS], 1);
        assert_eq!(counters[DATABASE_HITS], 0);
    }

    #[tokio::test]
    async fn test_hit_skips_model() {
        let (resolver, calls, _dir) = create_test_resolver("4");

        resolver.resolve("What is 2+2?").await.unwrap();
        let resolution = resolver.resolve("What is 2+2?").await.unwrap();

        assert_eq!(resolution.answer, "4");
        assert_eq!(resolution.source, AnswerSource::Cache);
        // O modelo foi chamado apenas na primeira resolução
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let counters = resolver.counters().unwrap();
        assert_eq!(counters[LLM_HITS], 1);
        assert_eq!(counters[DATABASE_HITS], 1);
    }

    #[tokio::test]
    async fn test_upstream_error_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let store = QaStore::open(&dir.path().join("test.db")).unwrap();
        let resolver = Resolver::new(store, Box::new(FailingClient));

        let result = resolver.resolve("Q").await;
        assert!(matches!(result, Err(ref e) if e.is_upstream()));

        let counters = resolver.counters().unwrap();
        assert_eq!(counters[LLM_HITS], 0);
        assert_eq!(counters[DATABASE_HITS], 0);
    }

    #[tokio::test]
    async fn test_failed_question_can_be_retried() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("retry.db");

        {
            let store = QaStore::open(&db_path).unwrap();
            let resolver = Resolver::new(store, Box::new(FailingClient));
            assert!(resolver.resolve("Q").await.is_err());
        }

        let store = QaStore::open(&db_path).unwrap();
        // Nada foi gravado pela tentativa que falhou
        assert_eq!(store.get("Q").unwrap(), None);

        let calls = Arc::new(AtomicUsize::new(0));
        let client = StaticClient {
            answer: "agora sim".to_string(),
            calls: Arc::clone(&calls),
        };
        let resolver = Resolver::new(store, Box::new(client));

        let resolution = resolver.resolve("Q").await.unwrap();
        assert_eq!(resolution.answer, "agora sim");
        assert_eq!(resolution.source, AnswerSource::Model);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(AnswerSource::Cache.to_string(), "cache");
        assert_eq!(AnswerSource::Model.to_string(), "model");
    }
}
