//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável cobre o coletor e o upload.
//! Os padrões reproduzem o comportamento de referência: barramento em
//! `/sys/bus/w1/devices`, ciclo de 5 s, releitura a cada 200 ms sem limite
//! de tentativas.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuração do coletor (descoberta e leitura das sondas).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Raiz do barramento onde o driver publica as sondas
    pub bus_root: String,
    /// Intervalo entre ciclos de leitura (segundos)
    pub interval_secs: f64,
    /// Pausa entre releituras enquanto a amostra não está fresca (ms)
    pub poll_interval_ms: u64,
    /// Máximo de tentativas por leitura (0 = aguardar indefinidamente)
    pub max_poll_attempts: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bus_root: "/sys/bus/w1/devices".into(),
            interval_secs: 5.0,
            poll_interval_ms: 200,
            max_poll_attempts: 0,
        }
    }
}

/// Configuração do envio ao serviço de ingestão.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Habilita o envio (desabilitado, o coletor apenas loga as leituras)
    pub enabled: bool,
    /// Endpoint REST que recebe os registros
    pub endpoint_url: String,
    /// Timeout das requisições HTTP (segundos)
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint_url:
                "http://localhost:8080/EnvironmentDataService/rest/TemperatureRecordService/temperatureRecords"
                    .into(),
            timeout_secs: 10,
        }
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub collector: CollectorConfig,
    pub upload: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collector: CollectorConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.collector.bus_root.is_empty() {
            errors.push("Raiz do barramento não pode ser vazia".into());
        }
        if self.collector.interval_secs < 1.0 || self.collector.interval_secs > 3600.0 {
            errors.push(format!(
                "Intervalo de ciclo inválido: {} (1.0–3600.0)",
                self.collector.interval_secs
            ));
        }
        if self.collector.poll_interval_ms == 0 {
            errors.push("Pausa de releitura não pode ser 0".into());
        }
        if self.upload.enabled && self.upload.endpoint_url.is_empty() {
            errors.push("Endpoint de upload não pode ser vazio com envio habilitado".into());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.collector.bus_root, parsed.collector.bus_root);
        assert_eq!(config.upload.endpoint_url, parsed.upload.endpoint_url);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[collector]
max_poll_attempts = 25
"#;
        let config: AppConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.collector.max_poll_attempts, 25);
        // Outros campos devem ter valor padrão
        assert_eq!(config.collector.interval_secs, 5.0);
        assert_eq!(config.collector.poll_interval_ms, 200);
        assert!(config.upload.enabled);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.collector.poll_interval_ms = 0;
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn empty_endpoint_only_matters_when_enabled() {
        let mut config = AppConfig::default();
        config.upload.endpoint_url = String::new();
        assert!(!config.validate().is_empty());

        config.upload.enabled = false;
        assert!(config.validate().is_empty());
    }
}
