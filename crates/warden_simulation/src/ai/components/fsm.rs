//! Guard FSM components (state, config, brain, vision).

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::behavior::GuardBehavior;
use crate::error::{non_negative, ConfigError};
use crate::navigation::NavAgent;

/// Guard FSM состояния
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum GuardState {
    /// Patrol — случайные точки вокруг последней известной позиции
    #[default]
    Patrol,

    /// Investigate — идём к last_place_seen (потеряли цель или услышали шум)
    Investigate,

    /// Chase — цель видна, разворачиваемся и идём прямо
    Chase,
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuardState::Patrol => "Patrol",
            GuardState::Investigate => "Investigate",
            GuardState::Chase => "Chase",
        };
        f.write_str(name)
    }
}

/// Смена состояния за тик (old → new)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct StateTransition {
    pub from: GuardState,
    pub to: GuardState,
}

/// Параметры guard'а (Chase / Patrol / Investigate)
///
/// Копия живёт внутри GuardBehavior — отдельным компонентом не храним.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Chase: скорость движения вперёд (m/s)
    pub chasing_speed: f32,
    /// Chase: скорость slerp-поворота к цели (доля за секунду)
    pub chasing_rot_speed: f32,
    /// Chase: ближе этой дистанции не подходим
    pub chasing_accuracy: f32,
    /// Patrol: максимальный offset точки по X и Z (метры)
    pub patrol_distance: f32,
    /// Patrol: пауза между точками (секунды)
    pub patrol_wait_seconds: f32,
    /// Investigate: запас к stopping_distance навигации
    pub arrival_slack: f32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            chasing_speed: 2.0,
            chasing_rot_speed: 2.0,
            chasing_accuracy: 5.0,
            patrol_distance: 10.0,
            patrol_wait_seconds: 5.0,
            arrival_slack: 0.5,
        }
    }
}

impl GuardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("chasing_speed", self.chasing_speed)?;
        non_negative("chasing_rot_speed", self.chasing_rot_speed)?;
        non_negative("chasing_accuracy", self.chasing_accuracy)?;
        non_negative("patrol_distance", self.patrol_distance)?;
        non_negative("patrol_wait_seconds", self.patrol_wait_seconds)?;
        non_negative("arrival_slack", self.arrival_slack)
    }
}

/// Guard marker: всё, без чего FSM системы не работают, подтягивается через Required Components
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, GuardVision, NavAgent, crate::components::GuardTarget)]
pub struct Guard;

/// Состояние FSM guard'а (state, memory point, patrol timer, свой RNG)
///
/// Не Reflect: внутри ChaCha8Rng.
#[derive(Component, Debug)]
pub struct GuardBrain(pub GuardBehavior);

impl std::ops::Deref for GuardBrain {
    type Target = GuardBehavior;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for GuardBrain {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Результат vision за текущий тик (пишет evaluate_guard_vision)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GuardVision {
    /// Позиция цели если видна в этот тик
    pub sighting: Option<Vec3>,
}

impl GuardVision {
    pub fn is_visible(&self) -> bool {
        self.sighting.is_some()
    }
}
