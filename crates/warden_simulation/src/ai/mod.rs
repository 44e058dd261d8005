//! Guard AI module
//!
//! Perception-driven FSM: Patrol → (шум) Investigate → (видим) Chase → (потеряли) Investigate → Patrol.
//! Ядро (`GuardBehavior`) — обычная структура с `tick(dt)`, ECS только прокидывает данные.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

pub mod agent;
pub mod behavior;
pub mod components;
pub mod events;
pub mod inbox;
pub mod patrol;
pub mod systems;


// Re-export основных типов
pub use agent::GuardAgent;
pub use behavior::{GuardBehavior, GuardCommand, TickInput, TickReport};
pub use components::{Guard, GuardBrain, GuardConfig, GuardState, GuardVision, StateTransition};
pub use events::{GuardAlert, GuardStateChanged, NoiseEvent, DEFAULT_KNOCK_RADIUS};
pub use inbox::DisturbanceInbox;
pub use patrol::patrol_point;

use crate::components::{GuardTarget, Pose};
use crate::error::ConfigError;
use crate::navigation::NavAgent;
use crate::perception::{PerceptionConfig, PerceptionSensor};
use crate::DeterministicRng;

/// Все guard системы (для ordering других плагинов, напр. навигации)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuardSet;

/// Guard AI Plugin
///
/// Регистрирует guard системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. broadcast_noise — NoiseEvent → GuardAlert (radius filter)
/// 2. apply_guard_alerts — disturbance'ы до vision шага
/// 3. evaluate_guard_vision — Rapier raycast → GuardVision
/// 4. tick_guards — FSM тик, Chase движение, GuardStateChanged
pub struct GuardPlugin;

impl Plugin for GuardPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NoiseEvent>()
            .add_event::<GuardAlert>()
            .add_event::<GuardStateChanged>();

        app.add_systems(
            FixedUpdate,
            (
                systems::broadcast_noise,
                systems::apply_guard_alerts,
                systems::evaluate_guard_vision,
                systems::tick_guards,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(GuardSet),
        );
    }
}

/// Параметры спавна guard'а
#[derive(Debug, Clone)]
pub struct GuardSpawn {
    pub position: Vec3,
    pub facing: Vec3,
    pub perception: PerceptionConfig,
    pub config: GuardConfig,
    pub target: Option<Entity>,
    pub nav: NavAgent,
}

impl GuardSpawn {
    pub fn new(position: Vec3, facing: Vec3) -> Self {
        Self {
            position,
            facing,
            perception: PerceptionConfig::default(),
            config: GuardConfig::default(),
            target: None,
            nav: NavAgent::default(),
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_perception(mut self, perception: PerceptionConfig) -> Self {
        self.perception = perception;
        self
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_nav(mut self, nav: NavAgent) -> Self {
        self.nav = nav;
        self
    }
}

/// Bundle guard'а: валидирует конфиги, RNG — отдельный поток на guard'а
pub fn guard_bundle(spawn: GuardSpawn, rng: ChaCha8Rng) -> Result<impl Bundle, ConfigError> {
    let sensor = PerceptionSensor::new(spawn.perception)?;
    let behavior = GuardBehavior::new(spawn.config, spawn.position, rng)?;
    let transform: Transform = Pose::looking_to(spawn.position, spawn.facing).into();

    Ok((
        Guard,
        transform,
        GuardBrain(behavior),
        sensor,
        GuardTarget(spawn.target),
        spawn.nav,
    ))
}

/// Спавн guard'а в World (RNG форкается из DeterministicRng)
pub fn spawn_guard(world: &mut World, spawn: GuardSpawn) -> Result<Entity, ConfigError> {
    let rng = world
        .get_resource_or_insert_with(|| DeterministicRng::new(42))
        .fork();

    match guard_bundle(spawn, rng) {
        Ok(bundle) => Ok(world.spawn(bundle).id()),
        Err(error) => {
            crate::logger::log_error(&format!("Guard spawn rejected: {}", error));
            Err(error)
        }
    }
}
