//! Descoberta de sondas no barramento 1-Wire.
//!
//! O driver do kernel publica um subdiretório por dispositivo sob a raiz do
//! barramento. Sondas da família suportada têm o prefixo `28-` e expõem o
//! arquivo de dados `w1_slave`; qualquer outra entrada é ignorada.

use probe_core::config::CollectorConfig;
use probe_core::types::ProbeIdentity;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefixo de 3 caracteres da família de sondas suportada.
pub const FAMILY_PREFIX: &str = "28-";

/// Nome do arquivo de dados dentro do diretório de cada sonda.
pub const SLAVE_FILE: &str = "w1_slave";

/// Erro de descoberta. Fatal na inicialização: sem a raiz do barramento
/// não há o que coletar.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Falha ao listar a raiz do barramento {path}: {source}")]
    BusRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Enumera as sondas presentes no barramento.
///
/// Executada uma única vez na inicialização; a lista retornada é congelada
/// pelo resto da vida do processo (hot-plug fica de fora). A descoberta só
/// lista o diretório, sem tocar nos arquivos de dados individuais.
pub fn discover(config: &CollectorConfig) -> Result<Vec<ProbeIdentity>, DiscoveryError> {
    let bus_root = Path::new(&config.bus_root);
    let entries = std::fs::read_dir(bus_root).map_err(|source| DiscoveryError::BusRoot {
        path: bus_root.to_path_buf(),
        source,
    })?;

    let mut probes = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(FAMILY_PREFIX) {
            debug!("Entrada ignorada (família não suportada): {name}");
            continue;
        }

        probes.push(ProbeIdentity {
            raw_id: name.to_string(),
            source_path: bus_root.join(name).join(SLAVE_FILE),
            display_name: format!("Sensor {}", probes.len() + 1),
        });
    }

    Ok(probes)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(root: &Path) -> CollectorConfig {
        CollectorConfig {
            bus_root: root.display().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn discovers_only_the_supported_family() {
        let tmp = tempfile::tempdir().unwrap();
        for dir in ["28-000001", "28-000002", "00-999999"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }

        let probes = discover(&config_for(tmp.path())).unwrap();

        assert_eq!(probes.len(), 2);
        for (i, probe) in probes.iter().enumerate() {
            assert_eq!(probe.display_name, format!("Sensor {}", i + 1));
            assert!(probe.raw_id.starts_with(FAMILY_PREFIX));
            assert_eq!(
                probe.source_path,
                tmp.path().join(&probe.raw_id).join(SLAVE_FILE)
            );
        }
    }

    #[test]
    fn empty_bus_yields_no_probes() {
        let tmp = tempfile::tempdir().unwrap();
        let probes = discover(&config_for(tmp.path())).unwrap();
        assert!(probes.is_empty());
    }

    #[test]
    fn missing_bus_root_is_an_error() {
        let cfg = config_for(Path::new("/definitivamente/nao/existe"));
        assert!(matches!(
            discover(&cfg),
            Err(DiscoveryError::BusRoot { .. })
        ));
    }

    #[test]
    fn discovery_does_not_require_the_data_files() {
        // Só o diretório da sonda precisa existir; o w1_slave é assunto do
        // leitor.
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("28-000abc")).unwrap();

        let probes = discover(&config_for(tmp.path())).unwrap();
        assert_eq!(probes.len(), 1);
        assert!(!probes[0].source_path.exists());
    }
}
