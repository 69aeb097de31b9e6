//! Tipos centrais: identidade de sonda e leitura calibrada.

use chrono::{DateTime, Local};
use std::path::PathBuf;

// ──────────────────────────────────────────────
// Sonda
// ──────────────────────────────────────────────

/// Identidade de uma sonda física descoberta no barramento.
///
/// Criada uma única vez na descoberta e imutável até o fim do processo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeIdentity {
    /// Nome de diretório atribuído pelo barramento (ex: `28-000005e2fdc3`).
    /// Estável entre reinícios e único por sonda.
    pub raw_id: String,
    /// Caminho do arquivo de dados: `<bus_root>/<raw_id>/w1_slave`.
    /// Derivado deterministicamente do `raw_id`.
    pub source_path: PathBuf,
    /// Nome amigável na ordem de enumeração ("Sensor 1", "Sensor 2"…).
    /// Pode mudar entre reinícios se a ordem de enumeração mudar.
    pub display_name: String,
}

// ──────────────────────────────────────────────
// Leitura
// ──────────────────────────────────────────────

/// Uma leitura calibrada bem-sucedida de uma sonda.
///
/// Empresta a identidade da sonda em vez de possuí-la: a leitura é
/// consumida pelo upload no mesmo ciclo em que foi produzida.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading<'a> {
    /// Sonda que originou a leitura.
    pub probe: &'a ProbeIdentity,
    /// Temperatura calibrada em graus Fahrenheit.
    pub value_f: f64,
    /// Relógio de parede no momento do parse bem-sucedido (resolução de
    /// segundos no formato enviado). O tempo de espera pelo marcador de
    /// frescor não entra aqui.
    pub observed_at: DateTime<Local>,
}
