//! Параметры vision cone

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TARGET_TAG: &str = "Player";

/// Vision cone guard'а (immutable после создания сенсора)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Дальность обзора (метры), строго > 0
    pub view_distance: f32,
    /// Полуугол конуса от forward (градусы), (0, 180]
    pub view_half_angle_degrees: f32,
    /// Какой `PerceptionTag` считается целью
    pub target_tag: String,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            view_distance: 20.0,
            view_half_angle_degrees: 45.0,
            target_tag: DEFAULT_TARGET_TAG.to_string(),
        }
    }
}

impl PerceptionConfig {
    pub fn new(
        view_distance: f32,
        view_half_angle_degrees: f32,
        target_tag: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            view_distance,
            view_half_angle_degrees,
            target_tag: target_tag.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.view_distance.is_finite() && self.view_distance > 0.0) {
            return Err(ConfigError::NonPositiveViewDistance(self.view_distance));
        }
        if !(self.view_half_angle_degrees > 0.0 && self.view_half_angle_degrees <= 180.0) {
            return Err(ConfigError::ViewAngleOutOfRange(self.view_half_angle_degrees));
        }
        if self.target_tag.is_empty() {
            return Err(ConfigError::EmptyTargetTag);
        }
        Ok(())
    }
}
