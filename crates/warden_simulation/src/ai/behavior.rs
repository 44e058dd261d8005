//! Guard FSM: Patrol ↔ Investigate ↔ Chase
//!
//! Порядок внутри тика (важен для детерминизма):
//! 1. vision: видим цель → Chase, last_place_seen = цель
//! 2. не видим и были в Chase → Investigate
//! 3. behavior итогового состояния (Investigate может перейти в Patrol — на следующий тик)
//!
//! Disturbance (`report_disturbance`) меняет state сразу; если в том же тике
//! цель видна, шаг 1 всё равно переводит в Chase.
//!
//! Transition в `TickReport` — разница с концом прошлого тика, не с промежуточными
//! состояниями: disturbance + прибытие за один тик transition не дают.

use std::fmt;

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::components::{GuardConfig, GuardState, StateTransition};
use crate::ai::patrol::patrol_point;
use crate::components::{look_rotation, ChaseMotion, Pose};
use crate::error::ConfigError;
use crate::navigation::Navigation;

/// Входные данные тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Текущая pose guard'а
    pub pose: Pose,
    /// Позиция цели, если сенсор видит её в этот тик
    pub sighting: Option<Vec3>,
    /// Секунды с прошлого тика (≥ 0)
    pub dt: f32,
}

/// Что guard делает в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuardCommand {
    /// Нет активного destination (ещё не выбрана patrol точка / после Chase)
    Hold,
    /// Навигация ведёт к `destination`; `issued` — запрос отправлен в этом тике
    Navigate { destination: Vec3, issued: bool },
    /// Прямое движение (навигация остановлена)
    Chase(ChaseMotion),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: GuardState,
    /// Some, если state отличается от прошлого тика
    pub transition: Option<StateTransition>,
    pub command: GuardCommand,
}

pub struct GuardBehavior<R = ChaCha8Rng> {
    config: GuardConfig,
    state: GuardState,
    /// State на конец прошлого тика (для StateTransition)
    ///
    /// Disturbance между тиками + прибытие в том же тике: state вернулся в Patrol,
    /// transition = None и GuardStateChanged не пишется.
    reported_state: GuardState,
    last_place_seen: Vec3,
    patrol_timer: f32,
    active_destination: Option<Vec3>,
    rng: R,
}

impl GuardBehavior<ChaCha8Rng> {
    pub fn seeded(config: GuardConfig, spawn_position: Vec3, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, spawn_position, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GuardBehavior<R> {
    /// Guard стартует в Patrol, memory point = точка спавна, timer = 0
    pub fn new(config: GuardConfig, spawn_position: Vec3, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GuardState::Patrol,
            reported_state: GuardState::Patrol,
            last_place_seen: spawn_position,
            patrol_timer: 0.0,
            active_destination: None,
            rng,
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn last_place_seen(&self) -> Vec3 {
        self.last_place_seen
    }

    pub fn patrol_timer(&self) -> f32 {
        self.patrol_timer
    }

    pub fn active_destination(&self) -> Option<Vec3> {
        self.active_destination
    }

    /// Внешний point of interest (шум, knock): → Investigate
    ///
    /// Достижимость не проверяем; повторный вызов с той же точкой ничего не меняет.
    pub fn report_disturbance(&mut self, point: Vec3) {
        self.last_place_seen = point;
        self.state = GuardState::Investigate;
    }

    pub fn tick<N>(&mut self, input: TickInput, nav: &mut N) -> TickReport
    where
        N: Navigation + ?Sized,
    {
        let dt = input.dt.max(0.0);

        let command = match input.sighting {
            Some(target) => {
                self.state = GuardState::Chase;
                self.last_place_seen = target;
                GuardCommand::Chase(self.chase(&input.pose, target, dt, nav))
            }
            None => {
                if self.state == GuardState::Chase {
                    self.state = GuardState::Investigate;
                }
                match self.state {
                    GuardState::Investigate => self.investigate(&input.pose, nav),
                    // Chase без sighting сюда не доходит (переведён в Investigate выше)
                    GuardState::Patrol | GuardState::Chase => self.patrol(dt, nav),
                }
            }
        };

        let transition = (self.state != self.reported_state).then_some(StateTransition {
            from: self.reported_state,
            to: self.state,
        });
        self.reported_state = self.state;

        TickReport {
            state: self.state,
            transition,
            command,
        }
    }

    /// Chase: slerp к цели + шаг вперёд по своему forward (без strafe)
    fn chase<N>(&mut self, pose: &Pose, target: Vec3, dt: f32, nav: &mut N) -> ChaseMotion
    where
        N: Navigation + ?Sized,
    {
        nav.stop_and_clear_path();
        self.active_destination = None;

        let direction = target - pose.position;

        // t ≤ 1: за один тик не перелетаем за направление на цель
        let step = (self.config.chasing_rot_speed * dt).clamp(0.0, 1.0);
        let facing = match look_rotation(direction) {
            Some(look) => pose.rotation.slerp(look, step).normalize(),
            None => pose.rotation,
        };

        let translation = if direction.length() > self.config.chasing_accuracy {
            (facing * Vec3::NEG_Z) * (self.config.chasing_speed * dt)
        } else {
            Vec3::ZERO
        };

        ChaseMotion { facing, translation }
    }

    /// Investigate: идём к last_place_seen, по прибытии → Patrol
    fn investigate<N>(&mut self, pose: &Pose, nav: &mut N) -> GuardCommand
    where
        N: Navigation + ?Sized,
    {
        let arrival = nav.stopping_distance() + self.config.arrival_slack;

        if pose.distance_to(self.last_place_seen) < arrival {
            self.state = GuardState::Patrol;
            return self.current_command();
        }

        nav.set_destination(self.last_place_seen);
        self.active_destination = Some(self.last_place_seen);
        GuardCommand::Navigate {
            destination: self.last_place_seen,
            issued: true,
        }
    }

    /// Patrol: раз в patrol_wait_seconds новая точка вокруг last_place_seen
    fn patrol<N>(&mut self, dt: f32, nav: &mut N) -> GuardCommand
    where
        N: Navigation + ?Sized,
    {
        self.patrol_timer += dt;
        // Срабатываем на >= wait: при dt = 1, wait = 5 запрос уходит ровно на 5-м тике
        if self.patrol_timer < self.config.patrol_wait_seconds {
            return self.current_command();
        }

        self.patrol_timer = 0.0;
        let point = patrol_point(self.last_place_seen, self.config.patrol_distance, &mut self.rng);
        self.last_place_seen = point;

        nav.set_destination(point);
        self.active_destination = Some(point);
        GuardCommand::Navigate {
            destination: point,
            issued: true,
        }
    }

    /// Предыдущий destination остаётся активным, новых запросов нет
    fn current_command(&self) -> GuardCommand {
        match self.active_destination {
            Some(destination) => GuardCommand::Navigate {
                destination,
                issued: false,
            },
            None => GuardCommand::Hold,
        }
    }
}

// RNG в Debug не печатаем: snapshot'ы сравнивают только FSM
impl<R> fmt::Debug for GuardBehavior<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardBehavior")
            .field("state", &self.state)
            .field("last_place_seen", &self.last_place_seen)
            .field("patrol_timer", &self.patrol_timer)
            .field("active_destination", &self.active_destination)
            .finish_non_exhaustive()
    }
}
