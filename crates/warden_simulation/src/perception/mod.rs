//! Perception — vision cone + line-of-sight
//!
//! Guard видит цель iff:
//! 1. первый hit луча от guard'а к цели несёт `target_tag` (ничего не заслоняет),
//! 2. distance < view_distance,
//! 3. angle(direction, forward) < view_half_angle_degrees (полный полуугол).
//!
//! Всё fail-closed: нет цели / нет hit'а → не видим, без ошибок.
//! Raycast абстрагирован через `WorldQuery` (Rapier в ECS, fake в тестах).

use bevy::prelude::*;

use crate::components::Pose;
use crate::error::ConfigError;

pub mod config;
pub mod rapier_world;

#[cfg(test)]
mod sensor_tests;

pub use config::{PerceptionConfig, DEFAULT_TARGET_TAG};
pub use rapier_world::rapier_raycast;

/// Результат raycast'а: первый объект на пути луча
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    /// Тег объекта (None — геометрия без тега, стены и т.п.)
    pub tag: Option<String>,
}

impl RayHit {
    pub fn new(distance: f32, tag: Option<String>) -> Self {
        Self { distance, tag }
    }

    pub fn tagged(distance: f32, tag: impl Into<String>) -> Self {
        Self::new(distance, Some(tag.into()))
    }

    pub fn untagged(distance: f32) -> Self {
        Self::new(distance, None)
    }
}

/// World/physics query collaborator
///
/// `direction` не нормализован (длина = расстояние до цели), луч бесконечный.
pub trait WorldQuery {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

impl<F> WorldQuery for F
where
    F: Fn(Vec3, Vec3) -> Option<RayHit>,
{
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self(origin, direction)
    }
}

/// Vision сенсор guard'а (stateless, pure query)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PerceptionSensor {
    config: PerceptionConfig,
}

impl PerceptionSensor {
    pub fn new(config: PerceptionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Видит ли observer цель в этот тик
    pub fn can_see<W>(&self, observer: &Pose, target: Option<&Pose>, world: &W) -> bool
    where
        W: WorldQuery + ?Sized,
    {
        let Some(target) = target else {
            return false;
        };

        let direction = target.position - observer.position;
        let distance = direction.length();
        let angle = view_angle_degrees(direction, observer.forward());

        // Дешёвые проверки до raycast'а (результат тот же, запрос pure). NaN → не видим.
        let in_cone =
            distance < self.config.view_distance && angle < self.config.view_half_angle_degrees;
        if !in_cone {
            return false;
        }

        match world.raycast(observer.position, direction) {
            Some(hit) => hit.tag.as_deref() == Some(self.config.target_tag.as_str()),
            None => false,
        }
    }
}

/// Угол между направлением на цель и forward (градусы, [0, 180])
///
/// Нулевой `direction` (цель в точке observer'а) → 0, т.е. прямо перед собой.
pub fn view_angle_degrees(direction: Vec3, forward: Vec3) -> f32 {
    if direction.length_squared() <= f32::EPSILON * f32::EPSILON {
        return 0.0;
    }
    direction.angle_between(forward).to_degrees()
}
