//! Armazenamento persistente de perguntas e respostas.
//!
//! Mantém o par de tabelas `qa_pairs` e `hit_counters` em SQLite,
//! sobrevivendo a reinícios do processo. O layout das tabelas é um
//! contrato durável que outras ferramentas podem ler diretamente.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use crate::{MnemoError, MnemoResult};

/// Contador de respostas servidas pelo cache.
pub const DATABASE_HITS: &str = "database_hits";

/// Contador de respostas geradas pelo modelo remoto.
pub const LLM_HITS: &str = "llm_hits";

/// Conjunto fixo de contadores reconhecidos.
pub const COUNTER_NAMES: [&str; 2] = [DATABASE_HITS, LLM_HITS];

/// Armazenamento durável de pares pergunta/resposta e contadores de acerto.
///
/// A pergunta é a chave primária, usada literalmente (sem normalização):
/// `"Foo?"` e `"foo? "` são registros distintos.
pub struct QaStore {
    conn: Connection,
}

impl QaStore {
    /// Abre (ou cria) o banco no caminho dado e garante o schema.
    pub fn open(db_path: &Path) -> MnemoResult<Self> {
        debug!("Abrindo banco de dados em {}", db_path.display());

        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Cria as tabelas e semeia os contadores com zero.
    ///
    /// Idempotente: chamadas repetidas (ou reaberturas do mesmo arquivo)
    /// não alteram registros nem zeram contadores.
    pub fn initialize(&self) -> MnemoResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS qa_pairs (
                question TEXT PRIMARY KEY,
                answer TEXT
            );

            CREATE TABLE IF NOT EXISTS hit_counters (
                source TEXT PRIMARY KEY,
                count INTEGER
            );
        "#,
        )?;

        for name in COUNTER_NAMES {
            self.conn.execute(
                "INSERT OR IGNORE INTO hit_counters (source, count) VALUES (?, 0)",
                params![name],
            )?;
        }

        Ok(())
    }

    /// Busca a resposta armazenada para uma pergunta (match exato).
    ///
    /// Retorna `None` quando a pergunta nunca foi respondida; ausência
    /// nunca vira string vazia.
    pub fn get(&self, question: &str) -> MnemoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT answer FROM qa_pairs WHERE question = ?")?;
        let mut rows = stmt.query(params![question])?;

        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Insere ou substitui a resposta de uma pergunta (upsert).
    ///
    /// Um único statement, então a escrita é atômica: nenhum leitor
    /// concorrente observa estado parcial.
    pub fn put(&self, question: &str, answer: &str) -> MnemoResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO qa_pairs (question, answer) VALUES (?, ?)",
            params![question, answer],
        )?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Contadores
    // ═══════════════════════════════════════════════════════════════════════

    /// Incrementa atomicamente o contador com o nome dado.
    ///
    /// Nomes fora de [`COUNTER_NAMES`] são erro de programação e retornam
    /// [`MnemoError::UnknownCounter`].
    pub fn increment_counter(&self, name: &str) -> MnemoResult<()> {
        if !COUNTER_NAMES.contains(&name) {
            return Err(MnemoError::UnknownCounter(name.to_string()));
        }

        self.conn.execute(
            "UPDATE hit_counters SET count = count + 1 WHERE source = ?",
            params![name],
        )?;

        Ok(())
    }

    /// Retorna um snapshot de todos os contadores.
    ///
    /// Ambos os nomes estão sempre presentes após [`QaStore::initialize`].
    pub fn get_all_counters(&self) -> MnemoResult<HashMap<String, u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT source, count FROM hit_counters")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?;

        let mut counters = HashMap::new();
        for row in rows {
            let (source, count) = row?;
            counters.insert(source, count);
        }

        Ok(counters)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Métodos auxiliares
    // ═══════════════════════════════════════════════════════════════════════

    /// Conta o número de pares pergunta/resposta armazenados.
    pub fn count_records(&self) -> MnemoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM qa_pairs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store() -> (QaStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = QaStore::open(&db_path).unwrap();
        (store, dir)
    }

    #[test]
    fn test_open_seeds_counters_at_zero() {
        let (store, _dir) = create_test_store();

        let counters = store.get_all_counters().unwrap();
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[DATABASE_HITS], 0);
        assert_eq!(counters[LLM_HITS], 0);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (store, _dir) = create_test_store();

        store.put("Q", "A").unwrap();
        store.increment_counter(LLM_HITS).unwrap();

        // Repetir a inicialização não zera nada nem duplica linhas
        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.get("Q").unwrap().as_deref(), Some("A"));
        let counters = store.get_all_counters().unwrap();
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[LLM_HITS], 1);
        assert_eq!(counters[DATABASE_HITS], 0);
    }

    #[test]
    fn test_get_absent_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get("never asked").unwrap(), None);
    }

    #[test]
    fn test_put_get_round_trip() {
        let (store, _dir) = create_test_store();

        store.put("What is Rust?", "A systems language.").unwrap();
        assert_eq!(
            store.get("What is Rust?").unwrap().as_deref(),
            Some("A systems language.")
        );
    }

    #[test]
    fn test_put_get_empty_answer() {
        let (store, _dir) = create_test_store();

        store.put("Q", "").unwrap();
        assert_eq!(store.get("Q").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_put_upserts_single_row() {
        let (store, _dir) = create_test_store();

        store.put("Q", "first").unwrap();
        store.put("Q", "second").unwrap();

        assert_eq!(store.get("Q").unwrap().as_deref(), Some("second"));
        assert_eq!(store.count_records().unwrap(), 1);
    }

    #[test]
    fn test_keys_are_literal() {
        let (store, _dir) = create_test_store();

        store.put("Foo?", "a").unwrap();
        store.put("foo? ", "b").unwrap();

        assert_eq!(store.get("Foo?").unwrap().as_deref(), Some("a"));
        assert_eq!(store.get("foo? ").unwrap().as_deref(), Some("b"));
        assert_eq!(store.count_records().unwrap(), 2);
    }

    #[test]
    fn test_increment_counter() {
        let (store, _dir) = create_test_store();

        for _ in 0..3 {
            store.increment_counter(DATABASE_HITS).unwrap();
        }
        store.increment_counter(LLM_HITS).unwrap();

        let counters = store.get_all_counters().unwrap();
        assert_eq!(counters[DATABASE_HITS], 3);
        assert_eq!(counters[LLM_HITS], 1);
    }

    #[test]
    fn test_increment_unknown_counter_fails() {
        let (store, _dir) = create_test_store();

        let result = store.increment_counter("total_hits");
        assert!(matches!(result, Err(MnemoError::UnknownCounter(name)) if name == "total_hits"));

        // Nenhuma linha extra foi criada
        assert_eq!(store.get_all_counters().unwrap().len(), 2);
    }

    #[test]
    fn test_counters_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");

        {
            let store = QaStore::open(&db_path).unwrap();
            store.put("Q", "A").unwrap();
            store.increment_counter(LLM_HITS).unwrap();
            store.increment_counter(DATABASE_HITS).unwrap();
            store.increment_counter(DATABASE_HITS).unwrap();
        }

        let store = QaStore::open(&db_path).unwrap();
        assert_eq!(store.get("Q").unwrap().as_deref(), Some("A"));
        let counters = store.get_all_counters().unwrap();
        assert_eq!(counters[LLM_HITS], 1);
        assert_eq!(counters[DATABASE_HITS], 2);
    }
}
