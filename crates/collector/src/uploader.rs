//! Envio das leituras ao serviço de ingestão.
//!
//! Cada leitura vira um [`UploadRecord`] com ID sequencial e sai como POST
//! form-encoded, sem credenciais. Não há fila nem retransmissão: uma falha
//! é logada pelo chamador e a leitura é descartada.

use probe_core::config::UploadConfig;
use probe_core::record::{SequenceCounter, UploadRecord};
use probe_core::types::Reading;
use std::time::Duration;

/// Erros do caminho de upload. Nunca fatais para o ciclo.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Serviço respondeu HTTP {0}")]
    Status(u16),

    #[error("Falha de transporte: {0}")]
    Transport(String),
}

/// Cliente do serviço de ingestão. Dono do contador de sequência.
pub struct Uploader {
    agent: ureq::Agent,
    endpoint_url: String,
    counter: SequenceCounter,
}

impl Uploader {
    pub fn new(config: &UploadConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            endpoint_url: config.endpoint_url.clone(),
            counter: SequenceCounter::new(),
        }
    }

    /// Envia uma leitura e retorna o ID atribuído ao registro.
    ///
    /// O ID é consumido na montagem do registro, mesmo que o POST falhe:
    /// a sequência conta registros produzidos, não entregues.
    pub fn submit(&mut self, reading: &Reading<'_>) -> Result<u64, UploadError> {
        let record = UploadRecord::from_reading(reading, &mut self.counter);
        let params = record.form_params();
        let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        match self.agent.post(&self.endpoint_url).send_form(&form) {
            Ok(_) => Ok(record.id),
            Err(ureq::Error::Status(code, _)) => Err(UploadError::Status(code)),
            Err(e) => Err(UploadError::Transport(e.to_string())),
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
