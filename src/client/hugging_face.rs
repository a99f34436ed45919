//! Cliente para a Inference API da Hugging Face.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::ModelClient;
use crate::types::ModelConfig;
use crate::{MnemoError, MnemoResult};

/// Base pública da Inference API.
const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Cliente que completa perguntas via modelos hospedados na Hugging Face.
///
/// Use [`HuggingFaceClient::from_config`] para construir a partir do TOML,
/// ou [`HuggingFaceClient::new`] para os valores padrão.
pub struct HuggingFaceClient {
    repo_id: String,
    api_token: Option<String>,
    endpoint: String,
    temperature: f64,
    max_new_tokens: u32,
    client: Client,
}

impl std::fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("repo_id", &self.repo_id)
            .field("endpoint", &self.endpoint)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("temperature", &self.temperature)
            .field("max_new_tokens", &self.max_new_tokens)
            .finish()
    }
}

impl HuggingFaceClient {
    /// Cria um cliente com os valores padrão.
    pub fn new() -> Self {
        Self::from_config(&ModelConfig::default())
    }

    /// Cria um cliente a partir da configuração do TOML.
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            repo_id: config.repo_id.clone(),
            api_token: config.api_token.clone(),
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| HF_API_BASE.to_string()),
            temperature: config.temperature,
            max_new_tokens: config.max_new_tokens,
            client: Self::build_client(Duration::from_secs(config.timeout_secs)),
        }
    }

    /// Define o timeout das requisições.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Self::build_client(timeout);
        self
    }

    fn build_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client")
    }

    /// Monta o corpo da requisição de geração de texto.
    pub fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "inputs": prompt,
            "parameters": {
                "temperature": self.temperature,
                "max_new_tokens": self.max_new_tokens,
                "return_full_text": false
            },
            "options": {
                "wait_for_model": true
            }
        })
    }

    /// Extrai o texto gerado de uma resposta da Inference API.
    ///
    /// A API responde normalmente `[{"generated_text": "..."}]`, mas alguns
    /// endpoints devolvem o objeto sem o array externo. O texto vem aparado
    /// de espaços nas bordas.
    pub fn extract_generated_text(response: &Value) -> Option<String> {
        let item = response
            .as_array()
            .and_then(|items| items.first())
            .unwrap_or(response);

        item["generated_text"]
            .as_str()
            .map(|text| text.trim().to_string())
    }

    /// Extrai a mensagem do corpo de erro `{"error": "..."}` da Inference API.
    ///
    /// Retorna `None` quando o corpo não é JSON ou não traz o campo; nesse
    /// caso o chamador usa o texto bruto.
    pub fn extract_error_message(body: &str) -> Option<String> {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"].as_str().map(String::from))
    }

    /// URL completa do modelo configurado.
    fn api_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.repo_id)
    }

    /// Anexa o token de autenticação, quando configurado.
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Converte uma falha de transporte no erro upstream adequado.
    fn request_error(&self, err: reqwest::Error) -> MnemoError {
        if err.is_timeout() {
            MnemoError::UpstreamTimeout(self.repo_id.clone())
        } else {
            MnemoError::UpstreamModel(self.repo_id.clone(), err.to_string())
        }
    }
}

impl Default for HuggingFaceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for HuggingFaceClient {
    fn name(&self) -> &str {
        &self.repo_id
    }

    async fn complete(&self, question: &str) -> MnemoResult<String> {
        let prompt = self.build_prompt(question);
        let body = self.build_request_body(&prompt);

        debug!("Enviando pergunta ao modelo {}", self.repo_id);

        let request = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&body);

        let request = self.apply_auth(request);

        let response = request.send().await.map_err(|e| self.request_error(e))?;

        if response.status().is_success() {
            let json: Value = response
                .json()
                .await
                .map_err(|e| self.request_error(e))?;

            return match Self::extract_generated_text(&json) {
                Some(text) if !text.is_empty() => Ok(text),
                Some(_) => Err(MnemoError::UpstreamModel(
                    self.repo_id.clone(),
                    "resposta vazia do modelo".to_string(),
                )),
                None => Err(MnemoError::UpstreamModel(
                    self.repo_id.clone(),
                    "resposta sem texto gerado".to_string(),
                )),
            };
        }

        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();
        let message = Self::extract_error_message(&error_text).unwrap_or(error_text);

        Err(MnemoError::UpstreamModel(
            self.repo_id.clone(),
            format!("HTTP {}: {}", status, message),
        ))
    }
}
