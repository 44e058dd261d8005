//! Guard reaction systems (шум → disturbance).

use bevy::prelude::*;

use crate::ai::components::{Guard, GuardBrain};
use crate::ai::events::{GuardAlert, NoiseEvent};

/// Система: NoiseEvent → GuardAlert для guard'ов в радиусе
///
/// Radius filter — ответственность источника шума, FSM его не знает.
/// Граница включительно (distance ≤ radius).
pub fn broadcast_noise(
    mut noises: EventReader<NoiseEvent>,
    guards: Query<(Entity, &Transform), With<Guard>>,
    mut alerts: EventWriter<GuardAlert>,
) {
    for noise in noises.read() {
        for (guard, transform) in guards.iter() {
            let distance = transform.translation.distance(noise.origin);
            if distance > noise.radius {
                continue;
            }

            crate::logger::log(&format!(
                "🔊 Guard {:?} heard noise at {:?} (distance {:.1}m, radius {:.1}m)",
                guard, noise.origin, distance, noise.radius
            ));
            alerts.write(GuardAlert {
                guard,
                point: noise.origin,
            });
        }
    }
}

/// Система: GuardAlert → report_disturbance
///
/// Первая в цепочке тика: disturbance применяется до vision,
/// поэтому видимая цель в этом же тике всё равно переводит в Chase.
pub fn apply_guard_alerts(mut alerts: EventReader<GuardAlert>, mut brains: Query<&mut GuardBrain>) {
    for alert in alerts.read() {
        let Ok(mut brain) = brains.get_mut(alert.guard) else {
            continue;
        };

        brain.report_disturbance(alert.point);
        crate::logger::log(&format!(
            "Guard {:?}: disturbance at {:?} → Investigate",
            alert.guard, alert.point
        ));
    }
}
