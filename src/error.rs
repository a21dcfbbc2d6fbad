use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Corrupt progress record under key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why a step stopped being the current one. Carried into teardown logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The step's trigger fired or the user pressed Next.
    Advanced,
    /// The user deferred the tour.
    Paused,
    /// The user dismissed the tour.
    Skipped,
    /// The last step finished.
    Completed,
    /// `start` or `resume` replaced whatever was running.
    Restarted,
    /// The identity changed underneath the session.
    IdentityChanged,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Advanced => write!(f, "advanced"),
            StopReason::Paused => write!(f, "paused"),
            StopReason::Skipped => write!(f, "skipped"),
            StopReason::Completed => write!(f, "completed"),
            StopReason::Restarted => write!(f, "restarted"),
            StopReason::IdentityChanged => write!(f, "identity-changed"),
        }
    }
}
