//! Guard FSM system (tick + применение Chase движения).

use bevy::prelude::*;

use crate::ai::behavior::{GuardCommand, TickInput};
use crate::ai::components::{Guard, GuardBrain, GuardState, GuardVision};
use crate::ai::events::GuardStateChanged;
use crate::components::Pose;
use crate::navigation::NavAgent;

/// Система: один тик FSM на guard'а
///
/// Читает GuardVision (заполнен evaluate_guard_vision в этом же тике),
/// Chase двигает Transform напрямую, Patrol/Investigate — через NavAgent.
pub fn tick_guards(
    mut guards: Query<
        (Entity, &mut Transform, &mut GuardBrain, &GuardVision, &mut NavAgent),
        With<Guard>,
    >,
    time: Res<Time<Fixed>>,
    mut state_events: EventWriter<GuardStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut brain, vision, mut nav) in guards.iter_mut() {
        let input = TickInput {
            pose: Pose::from(&*transform),
            sighting: vision.sighting,
            dt: delta,
        };

        let report = brain.tick(input, &mut *nav);

        match report.command {
            GuardCommand::Chase(motion) => {
                transform.rotation = motion.facing;
                transform.translation += motion.translation;
            }
            GuardCommand::Navigate { destination, issued: true }
                if report.state == GuardState::Investigate =>
            {
                crate::logger::log(&format!(
                    "Guard {:?}: investigating point {:?}",
                    entity, destination
                ));
            }
            _ => {}
        }

        if let Some(transition) = report.transition {
            crate::logger::log_info(&format!(
                "Guard {:?}: {} → {}",
                entity, transition.from, transition.to
            ));
            state_events.write(GuardStateChanged {
                guard: entity,
                from: transition.from,
                to: transition.to,
            });
        }
    }
}
