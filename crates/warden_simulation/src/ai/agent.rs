//! GuardAgent — guard без ECS: pose + сенсор + FSM + inbox
//!
//! Для host'ов со своим scheduler'ом: один `tick` на кадр,
//! navigation и world query передаются снаружи.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::behavior::{GuardBehavior, GuardCommand, TickInput, TickReport};
use crate::ai::components::{GuardConfig, GuardState};
use crate::ai::inbox::DisturbanceInbox;
use crate::components::Pose;
use crate::error::ConfigError;
use crate::navigation::Navigation;
use crate::perception::{PerceptionConfig, PerceptionSensor, WorldQuery};

pub struct GuardAgent<R = ChaCha8Rng> {
    name: String,
    pose: Pose,
    sensor: PerceptionSensor,
    behavior: GuardBehavior<R>,
    inbox: DisturbanceInbox,
}

impl<R: Rng> GuardAgent<R> {
    pub fn new(
        name: impl Into<String>,
        pose: Pose,
        perception: PerceptionConfig,
        config: GuardConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.into(),
            pose,
            sensor: PerceptionSensor::new(perception)?,
            behavior: GuardBehavior::new(config, pose.position, rng)?,
            inbox: DisturbanceInbox::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Навигация двигает guard'а между тиками
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn state(&self) -> GuardState {
        self.behavior.state()
    }

    pub fn last_place_seen(&self) -> Vec3 {
        self.behavior.last_place_seen()
    }

    pub fn behavior(&self) -> &GuardBehavior<R> {
        &self.behavior
    }

    pub fn sensor(&self) -> &PerceptionSensor {
        &self.sensor
    }

    /// Handle для disturbance'ов из других потоков (применяются в начале тика)
    pub fn inbox(&self) -> DisturbanceInbox {
        self.inbox.clone()
    }

    pub fn report_disturbance(&mut self, point: Vec3) {
        self.behavior.report_disturbance(point);
    }

    /// Тик: inbox → vision → FSM → Chase движение применяется к своей pose
    pub fn tick<W, N>(&mut self, dt: f32, target: Option<&Pose>, world: &W, nav: &mut N) -> TickReport
    where
        W: WorldQuery + ?Sized,
        N: Navigation + ?Sized,
    {
        for point in self.inbox.drain() {
            self.behavior.report_disturbance(point);
        }

        let visible = self.sensor.can_see(&self.pose, target, world);
        let sighting = target.filter(|_| visible).map(|pose| pose.position);

        let report = self.behavior.tick(
            TickInput {
                pose: self.pose,
                sighting,
                dt,
            },
            nav,
        );

        if let GuardCommand::Chase(motion) = report.command {
            self.pose.apply_motion(motion);
        }

        if let Some(transition) = report.transition {
            crate::logger::log_info(&format!(
                "Guard {}: {} → {}",
                self.name, transition.from, transition.to
            ));
        }

        report
    }
}
