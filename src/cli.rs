//! Interface de linha de comando do tour baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (status, start,
//! resume, pause, skip, place, demo) e flags globais de identidade
//! (--user, --device) e --verbose.

use clap::{Parser, Subcommand};

use shift_tour::geometry::{Rect, Size};

/// shift-tour: tour guiado do rastreador de turnos e pedidos.
#[derive(Debug, Parser)]
#[command(name = "shift-tour", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Usuário autenticado cujo progresso é usado.
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Identificador do dispositivo; gerado e persistido quando omitido.
    #[arg(long, global = true)]
    pub device: Option<String>,

    /// Usa o registro anônimo, ignorando o dispositivo.
    #[arg(long, global = true, default_value_t = false, conflicts_with_all = ["user", "device"])]
    pub anonymous: bool,

    /// Caminho alternativo para o arquivo de configuração.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mostra o registro de progresso da identidade.
    Status,

    /// Reinicia o tour no primeiro passo.
    Start,

    /// Retoma o tour no passo persistido.
    Resume,

    /// Pausa o tour mantendo o passo atual.
    Pause,

    /// Dispensa o tour.
    Skip,

    /// Calcula a posição do tooltip para um alvo.
    Place {
        /// Retângulo do alvo: x,y,largura,altura.
        #[arg(long, value_parser = parse_rect)]
        target: Rect,

        /// Tamanho da viewport: largura,altura.
        #[arg(long, value_parser = parse_size, default_value = "1280,800")]
        viewport: Size,

        /// Tamanho do tooltip: largura,altura.
        #[arg(long, value_parser = parse_size, default_value = "320,160")]
        tooltip: Size,
    },

    /// Executa o tour completo contra um host simulado.
    Demo {
        /// Tempo que cada passo fica visível antes da ação simulada (ms).
        #[arg(long, default_value_t = 600)]
        dwell_ms: u64,
    },
}

fn parse_numbers(raw: &str, expected: usize) -> Result<Vec<f64>, String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number {part:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(format!("expected {expected} comma-separated numbers, got {}", values.len()));
    }
    Ok(values)
}

fn parse_rect(raw: &str) -> Result<Rect, String> {
    let v = parse_numbers(raw, 4)?;
    Ok(Rect::new(v[0], v[1], v[2], v[3]))
}

fn parse_size(raw: &str) -> Result<Size, String> {
    let v = parse_numbers(raw, 2)?;
    Ok(Size::new(v[0], v[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_place_subcommand() {
        let cli = Cli::parse_from([
            "shift-tour",
            "place",
            "--target",
            "10,20,100,40",
            "--viewport",
            "800,600",
        ]);
        match cli.command {
            Command::Place {
                target,
                viewport,
                tooltip,
            } => {
                assert_eq!(target, Rect::new(10.0, 20.0, 100.0, 40.0));
                assert_eq!(viewport, Size::new(800.0, 600.0));
                assert_eq!(tooltip, Size::new(320.0, 160.0));
            }
            _ => panic!("expected Place command"),
        }
    }

    #[test]
    fn cli_parses_identity_flags() {
        let cli = Cli::parse_from(["shift-tour", "--user", "alice", "--verbose", "pause"]);
        assert!(cli.verbose);
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(matches!(cli.command, Command::Pause));
    }

    #[test]
    fn cli_rejects_malformed_rect() {
        let result = Cli::try_parse_from(["shift-tour", "place", "--target", "1,2,3"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
