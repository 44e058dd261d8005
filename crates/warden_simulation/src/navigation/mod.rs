//! Navigation domain — интерфейс к path-finding движку
//!
//! ECS пишет high-level intent (destination / stop), движок (NavMesh агент)
//! сам строит траекторию. FSM видит только `Navigation` trait.
//!
//! Содержит:
//! - Navigation (collaborator trait: set_destination, stop_and_clear_path, stopping_distance)
//! - NavAgent (ECS компонент, реализует Navigation)
//! - HeadlessNavigationPlugin (straight-line движение без NavMesh, для headless/тестов)

use bevy::prelude::*;

use crate::ai::GuardSet;

pub trait Navigation {
    /// Маршрут к точке (достижимость — забота навигации, не FSM)
    fn set_destination(&mut self, point: Vec3);
    /// Остановиться и сбросить текущий путь
    fn stop_and_clear_path(&mut self);
    /// Собственный допуск прибытия навигации
    fn stopping_distance(&self) -> f32;
}

/// Состояние навигационного агента актора
///
/// - FSM пишет destination / is_stopped через `Navigation`
/// - движок (или drive_nav_agents в headless) двигает Transform
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    pub is_stopped: bool,
    pub stopping_distance: f32,
    /// Скорость движения по пути (m/s)
    pub speed: f32,
    /// Сколько раз выставлялся destination (диагностика)
    pub requests_issued: u32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            is_stopped: false,
            stopping_distance: 0.0,
            speed: 3.5,
            requests_issued: 0,
        }
    }
}

impl NavAgent {
    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl Navigation for NavAgent {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
        self.is_stopped = false;
        self.requests_issued += 1;
    }

    fn stop_and_clear_path(&mut self) {
        self.destination = None;
        self.is_stopped = true;
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }
}

/// Headless Navigation Plugin
///
/// Заменяет NavMesh агента когда движка нет: идём по прямой к destination.
/// Работает после guard FSM в том же FixedUpdate тике.
pub struct HeadlessNavigationPlugin;

impl Plugin for HeadlessNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, drive_nav_agents.after(GuardSet));
    }
}

/// Система: straight-line движение NavAgent → Transform
///
/// Остановка на stopping_distance, разворот по направлению движения (только yaw).
pub fn drive_nav_agents(mut agents: Query<(&mut Transform, &mut NavAgent)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        if agent.is_stopped {
            continue;
        }
        let Some(destination) = agent.destination else {
            continue;
        };

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();
        let remaining = distance - agent.stopping_distance;

        if remaining <= f32::EPSILON {
            // Прибыли — путь закончен
            agent.destination = None;
            continue;
        }

        let step = (agent.speed * delta).min(remaining);
        let direction = to_destination / distance;
        transform.translation += direction * step;

        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() > f32::EPSILON {
            transform.look_to(flat, Vec3::Y);
        }
    }
}
