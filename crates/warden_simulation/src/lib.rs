//! Warden Simulation Core
//!
//! Guard AI на Bevy 0.16 ECS: vision cone + line-of-sight, FSM Patrol/Investigate/Chase,
//! реакция на шум. Движок (рендер, NavMesh, ввод игрока) — внешние collaborator'ы:
//! - perception: raycast через `WorldQuery` (Rapier backend в ECS)
//! - navigation: `Navigation` trait (NavAgent компонент / HeadlessNavigationPlugin)
//! - clock: FixedUpdate 60Hz

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod error;
pub mod logger;
pub mod navigation;
pub mod perception;

// Re-export базовых типов для удобства
pub use ai::{
    guard_bundle, spawn_guard, Guard, GuardAgent, GuardAlert, GuardBehavior, GuardBrain, GuardCommand,
    GuardConfig, GuardPlugin, GuardSet, GuardSpawn, GuardState, GuardStateChanged, GuardVision, NoiseEvent,
    StateTransition, TickInput, TickReport,
};
pub use components::*;
pub use error::ConfigError;
pub use logger::{log, log_error, log_info, log_warning};
pub use navigation::{HeadlessNavigationPlugin, NavAgent, Navigation};
pub use perception::{PerceptionConfig, PerceptionSensor, RayHit, WorldQuery};

/// Частота simulation tick
pub const FIXED_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed от create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .add_plugins(GuardPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Guard'ы не делят RNG: каждый получает свой поток через `fork()` при спавне.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Новый независимый поток (детерминирован порядком вызовов)
    pub fn fork(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.next_u64())
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную ровно на один fixed step за `update()`
/// (первый update — нулевой delta, FixedUpdate в нём не запускается).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_is_deterministic_and_independent() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);

        let mut first_a = a.fork();
        let mut first_b = b.fork();
        assert_eq!(first_a.next_u64(), first_b.next_u64());

        // Второй форк — другой поток
        let mut second_a = a.fork();
        assert_ne!(first_a.next_u64(), second_a.next_u64());
    }

    #[test]
    fn test_simulation_plugin_keeps_existing_seed() {
        let mut app = create_headless_app(1234);
        app.add_plugins(SimulationPlugin);
        assert_eq!(app.world().resource::<DeterministicRng>().seed, 1234);
    }
}
