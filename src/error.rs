use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("script line {line}: {reason}")]
    Script { line: usize, reason: String },
    #[error("invalid frame delta {0}")]
    InvalidDelta(f64),
}

/// Raised by a single transient effect while it ages. The scheduler drops the
/// offending effect and keeps the rest of the list intact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    #[error("effect `{kind}` has unusable duration {duration}")]
    InvalidDuration { kind: &'static str, duration: f64 },
    #[error("effect `{kind}` clock is no longer finite")]
    NonFinite { kind: &'static str },
}

pub type GameResult<T> = Result<T, GameError>;
