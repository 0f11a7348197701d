use thiserror::Error;

/// Rejected [`SessionConfig`](crate::SessionConfig) fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen height must be positive, got {0}")]
    ScreenHeight(f32),
    #[error("max frequency must be positive and finite, got {0}")]
    MaxFrequency(f32),
    #[error("max volume must be positive and finite, got {0}")]
    MaxVolume(f32),
    #[error("initial {name} {value} is outside [0, {max}]")]
    InitialOutOfRange {
        name: &'static str,
        value: f32,
        max: f32,
    },
    #[error("smoothing window must hold at least one sample")]
    EmptySmoothingWindow,
    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
}

/// Failure reported by an [`AudioSink`](crate::AudioSink) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinkError {
    #[error("audio parameter {param} rejected: {reason}")]
    Param { param: &'static str, reason: String },
    #[error("audio routing failed: {0}")]
    Routing(String),
    #[error("audio backend unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("calibration already started")]
    AlreadyStarted,
    #[error("session has been disposed")]
    Disposed,
}
