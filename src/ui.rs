//! Saída de terminal do tour: spinners e mensagens coloridas.
//!
//! Usa as crates `indicatif` para o spinner de espera e `console` para
//! estilização com cores. O [`TourView`] acompanha visualmente a execução do
//! tour na demonstração da CLI e imprime registros de progresso.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::TourStep;
use crate::overlay::OverlayFrame;
use crate::progress::TourProgress;
use crate::state_machine::TourStatus;

/// Indicador visual do tour no terminal.
///
/// Exibe um spinner enquanto o alvo de um passo não aparece e mensagens
/// coloridas para passos exibidos (ciano), conclusão (verde), pausa
/// (amarelo) e dispensa (vermelho).
pub struct TourView {
    // Spinner do indicatif.
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
    cyan: Style,
    dim: Style,
}

impl Default for TourView {
    fn default() -> Self {
        Self::new()
    }
}

impl TourView {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            cyan: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Mostra o spinner enquanto o alvo do passo é procurado.
    pub fn waiting(&self, step: &TourStep) {
        self.pb
            .set_message(format!("waiting for {} ({})", step.target.locator, step.id));
        self.pb.enable_steady_tick(std::time::Duration::from_millis(100));
    }

    /// Imprime o passo exibido com o tooltip e o posicionamento calculado.
    pub fn shown(&self, frame: &OverlayFrame) {
        let content = &frame.content;
        let tip = frame.tooltip.rect;
        self.pb.println(format!(
            "  {} [{}] {}",
            self.cyan.apply_to("▶"),
            content.progress_label(),
            self.cyan.apply_to(&content.title)
        ));
        self.pb.println(format!("      {}", content.body));
        self.pb.println(format!(
            "      {}",
            self.dim.apply_to(format!(
                "tooltip {:?} at ({:.0}, {:.0}) {:.0}x{:.0}; buttons: {}",
                frame.tooltip.placement,
                tip.x,
                tip.y,
                tip.width,
                tip.height,
                content
                    .actions
                    .iter()
                    .map(|a| content.label(*a))
                    .collect::<Vec<_>>()
                    .join(" | ")
            ))
        ));
    }

    /// Registra a ação simulada que completa o passo.
    pub fn acted(&self, description: &str) {
        self.pb
            .println(format!("    {} {description}", self.yellow.apply_to("↳")));
    }

    /// Finaliza o spinner e exibe o estado final do tour.
    pub fn finish(&self, progress: &TourProgress) {
        self.pb.finish_and_clear();
        let (style, mark) = match progress.status {
            TourStatus::Completed => (&self.green, "✓"),
            TourStatus::Skipped => (&self.red, "✗"),
            _ => (&self.yellow, "‖"),
        };
        println!(
            "  {} Tour {} at step {}",
            style.apply_to(mark),
            progress.status,
            progress.step_index + 1
        );
    }

    /// Imprime o registro de progresso formatado em JSON com estilo colorido.
    pub fn print_record(&self, key: &str, progress: &TourProgress) {
        let style = match progress.status {
            TourStatus::Completed => &self.green,
            TourStatus::Skipped => &self.red,
            TourStatus::Active => &self.cyan,
            _ => &self.yellow,
        };
        println!("{}", style.apply_to(format!("─── {key} ───")));
        println!(
            "{}",
            serde_json::to_string_pretty(progress).unwrap_or_default()
        );
    }
}
