//! Ошибки конфигурации guard'а
//!
//! Runtime пути (perception, FSM) не падают: fail-closed вместо ошибок.
//! Единственное место, где что-то может быть невалидным — параметры при создании.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("view distance must be positive and finite, got {0}")]
    NonPositiveViewDistance(f32),

    #[error("view half-angle must be in (0, 180] degrees, got {0}")]
    ViewAngleOutOfRange(f32),

    #[error("target tag must not be empty")]
    EmptyTargetTag,

    #[error("`{name}` must be finite and non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },
}

/// Helper: параметр конечный и ≥ 0
pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeParameter { name, value })
    }
}
