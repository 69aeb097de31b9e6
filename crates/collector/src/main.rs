//! # Termosonda Collector
//!
//! Descobre sondas de temperatura 1-Wire publicadas pelo driver do kernel,
//! lê cada uma em ciclo fixo e envia as leituras ao serviço de ingestão
//! via HTTP.
//!
//! ## Uso
//! ```bash
//! termosonda_collector            # usa o config.toml ao lado do executável
//! RUST_LOG=debug termosonda_collector
//! ```

mod registry;
mod reader;
mod uploader;

use probe_core::config::AppConfig;
use reader::{ProbeReader, RetryPolicy};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use uploader::Uploader;

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    for problem in config.validate() {
        warn!("Config: {problem}");
    }

    let collector_cfg = &config.collector;
    let interval = Duration::from_secs_f64(collector_cfg.interval_secs);

    // ── Descoberta das sondas ──
    let probes = match registry::discover(collector_cfg) {
        Ok(probes) => probes,
        Err(e) => {
            error!("{e}");
            error!("Nada a coletar; confira se o driver do barramento está carregado");
            std::process::exit(1);
        }
    };

    if probes.is_empty() {
        warn!("Nenhuma sonda encontrada em {}", collector_cfg.bus_root);
    }
    for probe in &probes {
        info!(
            "{} → {} ({})",
            probe.display_name,
            probe.raw_id,
            probe.source_path.display()
        );
    }

    let reader = ProbeReader::new(RetryPolicy::from_config(collector_cfg));
    let mut uploader = Uploader::new(&config.upload);

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🌡 TERMOSONDA COLLECTOR – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  Barramento: {}", collector_cfg.bus_root);
    println!("  Sondas:     {}", probes.len());
    println!("  Intervalo:  {:.1}s", collector_cfg.interval_secs);
    if config.upload.enabled {
        println!("  Endpoint:   {}", config.upload.endpoint_url);
    } else {
        println!("  Endpoint:   (upload desabilitado)");
    }
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    loop {
        let cycle_start = Instant::now();

        let readings = reader.read_all(&probes);
        for reading in &readings {
            info!(
                "{} ({}): {:.3} °F",
                reading.probe.display_name, reading.probe.raw_id, reading.value_f
            );

            if config.upload.enabled {
                match uploader.submit(reading) {
                    Ok(id) => debug!("→ registro {id} aceito pelo serviço"),
                    Err(e) => error!("Erro ao enviar leitura: {e}"),
                }
            }
        }

        // Dormir pelo tempo restante do intervalo
        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
}
