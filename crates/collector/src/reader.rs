//! Protocolo de leitura das sondas.
//!
//! Cada tentativa reabre o arquivo de dados do zero (nada de handle
//! reaproveitado) e só interpreta o valor depois que a linha 1 traz o
//! marcador de frescor. Entre tentativas o leitor dorme 200 ms (padrão).
//! Sem limite configurado a espera é indefinida, então uma sonda travada
//! segura o ciclo inteiro; com `max_poll_attempts > 0` a leitura expira com
//! [`ReadError::Timeout`].

use chrono::Local;
use probe_core::config::CollectorConfig;
use probe_core::protocol::{SlaveOutput, millicelsius_to_fahrenheit};
use probe_core::types::{ProbeIdentity, Reading};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Política de espera pelo marcador de frescor.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Pausa entre releituras do arquivo.
    pub poll_interval: Duration,
    /// Máximo de tentativas (0 = aguardar indefinidamente).
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn from_config(config: &CollectorConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.max_poll_attempts,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            max_attempts: 0,
        }
    }
}

/// Erros de leitura de uma sonda. Isolados por ciclo: a sonda volta a ser
/// tentada do zero no ciclo seguinte.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Falha ao abrir {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Amostra não ficou fresca em {path} após {attempts} tentativas")]
    Timeout { path: PathBuf, attempts: u32 },
}

/// Leitor de sondas: executa o protocolo de leitura contra o arquivo de
/// dados de cada sonda. Recebe a lista do registro por referência e nunca
/// a modifica.
#[derive(Debug, Default)]
pub struct ProbeReader {
    policy: RetryPolicy,
}

impl ProbeReader {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Lê uma sonda, aguardando o marcador de frescor.
    ///
    /// Retorna `Ok(None)` quando a amostra fresca não traz um valor legível
    /// após `t=`: a sonda é pulada neste ciclo, sem erro. O timestamp é
    /// marcado logo após o parse, já descontada a espera pelo marcador.
    pub fn read<'a>(&self, probe: &'a ProbeIdentity) -> Result<Option<Reading<'a>>, ReadError> {
        let mut attempts: u32 = 0;
        loop {
            let raw =
                std::fs::read_to_string(&probe.source_path).map_err(|source| ReadError::Open {
                    path: probe.source_path.clone(),
                    source,
                })?;

            match SlaveOutput::parse(&raw) {
                SlaveOutput::NotReady => {
                    attempts += 1;
                    if self.policy.max_attempts > 0 && attempts >= self.policy.max_attempts {
                        return Err(ReadError::Timeout {
                            path: probe.source_path.clone(),
                            attempts,
                        });
                    }
                    std::thread::sleep(self.policy.poll_interval);
                }
                SlaveOutput::Missing => {
                    debug!("{}: amostra sem valor t=, leitura pulada", probe.display_name);
                    return Ok(None);
                }
                SlaveOutput::Temperature(milli) => {
                    return Ok(Some(Reading {
                        probe,
                        value_f: millicelsius_to_fahrenheit(milli),
                        observed_at: Local::now(),
                    }));
                }
            }
        }
    }

    /// Lê todas as sondas em ordem de enumeração.
    ///
    /// Uma sonda que falha ou não produz leitura é omitida do resultado e
    /// não interrompe as demais; dentro do ciclo ela não é tentada de novo.
    pub fn read_all<'a>(&self, probes: &'a [ProbeIdentity]) -> Vec<Reading<'a>> {
        let mut readings = Vec::with_capacity(probes.len());
        for probe in probes {
            match self.read(probe) {
                Ok(Some(reading)) => readings.push(reading),
                Ok(None) => {}
                Err(e) => warn!("{}: {e}", probe.display_name),
            }
        }
        readings
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
