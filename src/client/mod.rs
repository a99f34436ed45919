//! Clientes de modelos de linguagem remotos.
//!
//! O trait [`ModelClient`] isola o resolvedor dos detalhes de transporte:
//! qualquer backend que complete uma pergunta com texto serve. A
//! implementação concreta fala com a Inference API da Hugging Face.

mod hugging_face;

pub use hugging_face::HuggingFaceClient;

use async_trait::async_trait;

use crate::MnemoResult;

/// Interface comum para backends de completamento.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Nome do backend, para logs e mensagens de erro.
    fn name(&self) -> &str;

    /// Monta o prompt enviado ao modelo a partir da pergunta crua.
    fn build_prompt(&self, question: &str) -> String {
        format!("Answer the following question: {}", question)
    }

    /// Envia a pergunta ao modelo e retorna o texto gerado.
    ///
    /// Falhas de rede, timeout ou resposta malformada viram erros da
    /// categoria upstream; o chamador decide se propaga ou tenta de novo.
    async fn complete(&self, question: &str) -> MnemoResult<String>;
}
