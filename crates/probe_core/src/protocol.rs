//! Formato do arquivo de dados das sondas.
//!
//! O driver do barramento publica cada amostra como texto de duas linhas:
//!
//! ```text
//! 4b 01 4b 46 7f ff 0c 10 d8 : crc=d8 YES
//! 4b 01 4b 46 7f ff 0c 10 d8 t=25125
//! ```
//!
//! - A linha 1 termina no marcador `YES` quando o ciclo de conversão do
//!   dispositivo terminou (`NO` enquanto ainda converte)
//! - A linha 2 carrega o token `t=` seguido da temperatura bruta em
//!   mili-graus Celsius
//!
//! O parse aqui é livre de I/O; a releitura do arquivo e a espera pelo
//! marcador ficam no leitor.

/// Marcador de frescor nos 3 caracteres finais da linha 1.
pub const FRESHNESS_MARKER: &str = "YES";

/// Token que precede o valor bruto na linha 2.
pub const TEMP_TOKEN: &str = "t=";

/// Resultado do parse do conteúdo completo do arquivo de uma sonda.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlaveOutput {
    /// O dispositivo ainda não terminou o ciclo de conversão (ou o arquivo
    /// saiu truncado). Reler depois de uma pausa.
    NotReady,
    /// Amostra fresca, mas sem valor legível após `t=` na linha 2.
    /// Descarte silencioso; não é um erro.
    Missing,
    /// Temperatura bruta em mili-graus Celsius.
    Temperature(f64),
}

impl SlaveOutput {
    /// Interpreta o conteúdo completo do arquivo de dados.
    pub fn parse(raw: &str) -> SlaveOutput {
        let mut lines = raw.lines();

        // Linha 1: os 3 caracteres finais (após trim) indicam frescor.
        let fresh = lines
            .next()
            .map(|line| line.trim().ends_with(FRESHNESS_MARKER))
            .unwrap_or(false);
        if !fresh {
            return SlaveOutput::NotReady;
        }

        // Linha 2: tudo após `t=` até o fim da linha (após trim).
        let Some(line) = lines.next() else {
            return SlaveOutput::Missing;
        };
        match line.trim().split_once(TEMP_TOKEN) {
            Some((_, value)) => match value.parse::<f64>() {
                Ok(milli) => SlaveOutput::Temperature(milli),
                Err(_) => SlaveOutput::Missing,
            },
            None => SlaveOutput::Missing,
        }
    }
}

/// Converte mili-graus Celsius para graus Fahrenheit.
///
/// `F = C * 9/5 + 32`, com o valor bruto dividido por 1000 antes.
pub fn millicelsius_to_fahrenheit(milli: f64) -> f64 {
    let celsius = milli / 1000.0;
    celsius * 9.0 / 5.0 + 32.0
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FRESH: &str =
        "4b 01 4b 46 7f ff 0c 10 d8 : crc=d8 YES\n4b 01 4b 46 7f ff 0c 10 d8 t=25125\n";

    #[test]
    fn parses_fresh_sample() {
        assert_eq!(SlaveOutput::parse(FRESH), SlaveOutput::Temperature(25125.0));
    }

    #[test]
    fn converting_sample_is_not_ready() {
        let raw = "4b 01 4b 46 7f ff 0c 10 d8 : crc=d8 NO\n4b 01 4b 46 7f ff 0c 10 d8 t=25125\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::NotReady);
    }

    #[test]
    fn marker_must_close_the_first_line() {
        let raw = "crc=d8 YES lixo\n4b 01 4b 46 7f ff 0c 10 d8 t=25125\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::NotReady);
    }

    #[test]
    fn empty_file_is_not_ready() {
        assert_eq!(SlaveOutput::parse(""), SlaveOutput::NotReady);
    }

    #[test]
    fn fresh_without_token_is_missing() {
        let raw = "4b 01 4b 46 7f ff 0c 10 d8 : crc=d8 YES\n4b 01 4b 46 7f ff 0c 10 d8\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::Missing);
    }

    #[test]
    fn fresh_with_single_line_is_missing() {
        let raw = "4b 01 4b 46 7f ff 0c 10 d8 : crc=d8 YES\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::Missing);
    }

    #[test]
    fn unparseable_value_is_missing() {
        let raw = "crc=d8 YES\n4b 01 t=abc\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::Missing);
    }

    #[test]
    fn negative_temperatures_parse() {
        let raw = "crc=5a YES\nff fe t=-1062\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::Temperature(-1062.0));
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let raw = "4b 01 crc=d8 YES\r\n4b 01 t=25125\r\n";
        assert_eq!(SlaveOutput::parse(raw), SlaveOutput::Temperature(25125.0));
    }

    #[test]
    fn conversion_formula() {
        assert!((millicelsius_to_fahrenheit(25125.0) - 77.225).abs() < 1e-9);
        assert!((millicelsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-9);
        assert!((millicelsius_to_fahrenheit(-40000.0) - (-40.0)).abs() < 1e-9);
        assert!((millicelsius_to_fahrenheit(100_000.0) - 212.0).abs() < 1e-9);
    }
}
