//! Registro de upload e sequenciamento.
//!
//! Cada leitura enviada ao serviço de ingestão recebe um ID único no escopo
//! do processo. O contador começa em 100 e incrementa 1 por registro
//! produzido, independente da sonda de origem. Ele nunca é persistido: um
//! reinício do processo recomeça a sequência em 100, então o ID não serve
//! como chave única entre execuções.

use crate::types::Reading;
use serde::Serialize;

/// Valor inicial da sequência a cada início de processo.
pub const SEQUENCE_START: u64 = 100;

/// Formato do timestamp enviado ao serviço (hora local).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Contador de sequência, estado mutável explícito do processo.
///
/// Pertence à camada de upload. Sob o loop single-thread cada registro toca
/// o contador uma única vez; um chamador concorrente precisa serializar os
/// incrementos.
#[derive(Debug)]
pub struct SequenceCounter {
    next_id: u64,
}

impl SequenceCounter {
    /// Novo contador começando em [`SEQUENCE_START`].
    pub fn new() -> Self {
        Self {
            next_id: SEQUENCE_START,
        }
    }

    /// Consome e retorna o próximo ID da sequência.
    pub fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Registro pronto para envio ao serviço de ingestão.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecord {
    pub id: u64,
    pub sensor_name: String,
    pub date_written: String,
    pub temperature_value: f64,
}

impl UploadRecord {
    /// Monta o registro de uma leitura, consumindo um ID da sequência.
    pub fn from_reading(reading: &Reading<'_>, counter: &mut SequenceCounter) -> Self {
        Self {
            id: counter.next(),
            sensor_name: reading.probe.raw_id.clone(),
            date_written: reading.observed_at.format(DATE_FORMAT).to_string(),
            temperature_value: reading.value_f,
        }
    }

    /// Parâmetros form-encoded do POST, na ordem esperada pelo serviço.
    pub fn form_params(&self) -> [(&'static str, String); 4] {
        [
            ("id", self.id.to_string()),
            ("sensorName", self.sensor_name.clone()),
            ("dateWritten", self.date_written.clone()),
            ("temperatureValue", self.temperature_value.to_string()),
        ]
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
