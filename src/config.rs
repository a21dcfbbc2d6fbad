//! Configuração do tour carregada a partir de `shift-tour.toml`.
//!
//! A struct [`TourConfig`] contém os intervalos de polling, a geometria do
//! overlay e o local de armazenamento. Valores não presentes no arquivo usam
//! defaults sensíveis. A variável de ambiente `SHIFT_TOUR_STORAGE_DIR` tem
//! precedência sobre o arquivo.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::TourError;

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "shift-tour.toml";

/// Variável de ambiente que sobrescreve `storage_dir`.
pub const STORAGE_DIR_ENV: &str = "SHIFT_TOUR_STORAGE_DIR";

/// Configuração de nível superior carregada de `shift-tour.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TourConfig {
    /// Prefixo versionado das chaves de progresso.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,

    /// Diretório usado pelo `FileStore` da CLI.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Intervalo de polling do alvo de cada passo, em milissegundos.
    #[serde(default = "default_target_poll_ms")]
    pub target_poll_ms: u64,

    /// Intervalo de polling da visibilidade de modais, em milissegundos.
    #[serde(default = "default_modal_poll_ms")]
    pub modal_poll_ms: u64,

    /// Janela do log de diagnóstico quando o alvo não aparece.
    #[serde(default = "default_wait_log_ms")]
    pub wait_log_ms: u64,

    /// Espaçamento entre o alvo e a moldura de destaque.
    #[serde(default = "default_highlight_padding")]
    pub highlight_padding: f64,

    /// Margem mínima entre o tooltip e as bordas da viewport.
    #[serde(default = "default_viewport_margin")]
    pub viewport_margin: f64,
}

// Prefixo padrão: "shift_tour_v1".
fn default_storage_prefix() -> String {
    "shift_tour_v1".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".shift-tour")
}

// 300ms entre tentativas de localizar o alvo.
fn default_target_poll_ms() -> u64 {
    300
}

// 250ms entre verificações de modal.
fn default_modal_poll_ms() -> u64 {
    250
}

fn default_wait_log_ms() -> u64 {
    5000
}

fn default_highlight_padding() -> f64 {
    4.0
}

fn default_viewport_margin() -> f64 {
    10.0
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            storage_prefix: default_storage_prefix(),
            storage_dir: default_storage_dir(),
            target_poll_ms: default_target_poll_ms(),
            modal_poll_ms: default_modal_poll_ms(),
            wait_log_ms: default_wait_log_ms(),
            highlight_padding: default_highlight_padding(),
            viewport_margin: default_viewport_margin(),
        }
    }
}

impl TourConfig {
    /// Carrega a configuração de `shift-tour.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, TourError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Carrega a configuração de um caminho explícito.
    pub fn load_from(path: &Path) -> Result<Self, TourError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<TourConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração.
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV)
            && !dir.is_empty()
        {
            config.storage_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), TourError> {
        if self.storage_prefix.trim().is_empty() {
            return Err(TourError::Config("storage_prefix must not be empty".into()));
        }
        if self.target_poll_ms == 0 || self.modal_poll_ms == 0 {
            return Err(TourError::Config("poll intervals must be positive".into()));
        }
        if self.highlight_padding < 0.0 || self.viewport_margin < 0.0 {
            return Err(TourError::Config(
                "padding and margin must not be negative".into(),
            ));
        }
        Ok(())
    }
}
