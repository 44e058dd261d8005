//! Guard Events — шум, адресные disturbance'ы, смены состояния
//!
//! NoiseEvent (мир) → broadcast_noise (radius filter) → GuardAlert (конкретному guard'у)
//! → apply_guard_alerts → GuardBehavior::report_disturbance.

use bevy::prelude::*;

use crate::ai::components::GuardState;

/// Радиус knock'а по умолчанию (метры)
pub const DEFAULT_KNOCK_RADIUS: f32 = 20.0;

/// Шум в мире (knock игрока, упавший предмет)
///
/// Guard'ы с distance ≤ radius получают GuardAlert на origin.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NoiseEvent {
    pub origin: Vec3,
    pub radius: f32,
}

impl NoiseEvent {
    pub fn knock(origin: Vec3) -> Self {
        Self {
            origin,
            radius: DEFAULT_KNOCK_RADIUS,
        }
    }
}

/// Disturbance для конкретного guard'а (ReportDisturbance)
///
/// Точка принимается безусловно — достижимость проверяет навигация.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GuardAlert {
    pub guard: Entity,
    pub point: Vec3,
}

/// Guard сменил состояние (old → new), для debug overlay / логов
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GuardStateChanged {
    pub guard: Entity,
    pub from: GuardState,
    pub to: GuardState,
}
