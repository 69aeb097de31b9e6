//! # Probe Core
//!
//! Crate compartilhada que define os tipos de dados, o parsing do formato
//! de arquivo das sondas de temperatura 1-Wire, o contrato de upload com
//! ID sequencial e a configuração TOML do sistema Termosonda.
//!
//! ## Módulos
//! - [`types`] – Identidade de sonda e leitura calibrada
//! - [`protocol`] – Parsing do arquivo `w1_slave` e conversão de unidades
//! - [`record`] – Registro de upload e contador de sequência
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod protocol;
pub mod record;
pub mod config;

// Re-exports convenientes
pub use types::{ProbeIdentity, Reading};
pub use protocol::{SlaveOutput, millicelsius_to_fahrenheit};
pub use record::{SEQUENCE_START, SequenceCounter, UploadRecord};
pub use config::{AppConfig, CollectorConfig, UploadConfig};
