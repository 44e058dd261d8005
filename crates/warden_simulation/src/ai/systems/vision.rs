//! Guard vision system (Rapier raycast → GuardVision).

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use crate::ai::components::{Guard, GuardVision};
use crate::components::{GuardTarget, PerceptionTag, Pose};
use crate::perception::{rapier_raycast, PerceptionSensor};

/// Система: PerceptionSensor + Rapier → GuardVision
///
/// Без Rapier контекста (headless без физики) ничего не пишем:
/// GuardVision остаётся тем, что выставил host.
pub fn evaluate_guard_vision(
    mut guards: Query<
        (Entity, &Transform, &PerceptionSensor, &GuardTarget, &mut GuardVision),
        With<Guard>,
    >,
    targets: Query<&Transform>,
    tags: Query<&PerceptionTag>,
    rapier: ReadRapierContext,
) {
    let Ok(context) = rapier.single() else {
        return;
    };

    for (entity, transform, sensor, target, mut vision) in guards.iter_mut() {
        let observer = Pose::from(transform);
        let target_pose = target
            .0
            .and_then(|target| targets.get(target).ok())
            .map(Pose::from);

        let world = |origin: Vec3, direction: Vec3| {
            rapier_raycast(&context, &tags, entity, origin, direction)
        };

        let visible = sensor.can_see(&observer, target_pose.as_ref(), &world);
        vision.sighting = target_pose.filter(|_| visible).map(|pose| pose.position);
    }
}
