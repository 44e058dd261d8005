//! Tests for PerceptionSensor (vision cone + LOS).

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use bevy::prelude::*;

    use super::super::*;
    use crate::components::Pose;

    /// Open field: луч всегда упирается в цель
    fn open_field(_origin: Vec3, direction: Vec3) -> Option<RayHit> {
        Some(RayHit::tagged(direction.length(), DEFAULT_TARGET_TAG))
    }

    /// Стена перед целью
    fn walled(_origin: Vec3, direction: Vec3) -> Option<RayHit> {
        Some(RayHit::untagged(direction.length() * 0.5))
    }

    fn empty_world(_origin: Vec3, _direction: Vec3) -> Option<RayHit> {
        None
    }

    fn guard_facing_z() -> Pose {
        Pose::looking_to(Vec3::ZERO, Vec3::Z)
    }

    fn target_at(x: f32, y: f32, z: f32) -> Pose {
        Pose::new(Vec3::new(x, y, z), Quat::IDENTITY)
    }

    #[test]
    fn test_target_ahead_is_visible() {
        let sensor = PerceptionSensor::default();
        let target = target_at(0.0, 0.0, 10.0);

        assert!(sensor.can_see(&guard_facing_z(), Some(&target), &open_field));
    }

    #[test]
    fn test_target_far_off_axis_is_not_visible() {
        let sensor = PerceptionSensor::default();
        let target = target_at(15.0, 0.0, 1.0);

        let angle = view_angle_degrees(target.position, guard_facing_z().forward());
        assert!((angle - 86.19).abs() < 0.1, "angle = {}", angle);
        assert!(!sensor.can_see(&guard_facing_z(), Some(&target), &open_field));
    }

    #[test]
    fn test_distance_gate_is_strict() {
        let sensor = PerceptionSensor::default();
        let guard = guard_facing_z();

        assert!(sensor.can_see(&guard, Some(&target_at(0.0, 0.0, 19.9)), &open_field));
        assert!(!sensor.can_see(&guard, Some(&target_at(0.0, 0.0, 20.0)), &open_field));
        assert!(!sensor.can_see(&guard, Some(&target_at(0.0, 0.0, 25.0)), &open_field));
    }

    #[test]
    fn test_full_half_angle_is_used() {
        let sensor = PerceptionSensor::default();
        let guard = guard_facing_z();

        // ~44.7° — внутри конуса 45° (не 22.5°)
        assert!(sensor.can_see(&guard, Some(&target_at(9.9, 0.0, 10.0)), &open_field));
        // ~45.3° — снаружи
        assert!(!sensor.can_see(&guard, Some(&target_at(10.0, 0.0, 9.9)), &open_field));
    }

    #[test]
    fn test_occluded_target_is_not_visible() {
        let sensor = PerceptionSensor::default();
        let target = target_at(0.0, 0.0, 10.0);

        assert!(!sensor.can_see(&guard_facing_z(), Some(&target), &walled));
    }

    #[test]
    fn test_wrong_tag_is_not_visible() {
        let sensor = PerceptionSensor::default();
        let target = target_at(0.0, 0.0, 10.0);
        let decoy = |_: Vec3, direction: Vec3| Some(RayHit::tagged(direction.length(), "Crate"));

        assert!(!sensor.can_see(&guard_facing_z(), Some(&target), &decoy));
    }

    #[test]
    fn test_no_hit_fails_closed() {
        let sensor = PerceptionSensor::default();
        let target = target_at(0.0, 0.0, 10.0);

        assert!(!sensor.can_see(&guard_facing_z(), Some(&target), &empty_world));
    }

    #[test]
    fn test_missing_target_fails_closed() {
        let sensor = PerceptionSensor::default();
        assert!(!sensor.can_see(&guard_facing_z(), None, &open_field));
    }

    #[test]
    fn test_coincident_target_counts_as_straight_ahead() {
        let sensor = PerceptionSensor::default();
        let target = target_at(0.0, 0.0, 0.0);

        assert_eq!(view_angle_degrees(Vec3::ZERO, Vec3::Z), 0.0);
        assert!(sensor.can_see(&guard_facing_z(), Some(&target), &open_field));
    }

    #[test]
    fn test_raycast_uses_observer_origin_and_target_direction() {
        let sensor = PerceptionSensor::default();
        let guard = Pose::looking_to(Vec3::new(1.0, 0.0, 1.0), Vec3::Z);
        let target = target_at(1.0, 0.0, 6.0);

        let seen = Cell::new(None);
        let recording = |origin: Vec3, direction: Vec3| {
            seen.set(Some((origin, direction)));
            Some(RayHit::tagged(direction.length(), DEFAULT_TARGET_TAG))
        };

        assert!(sensor.can_see(&guard, Some(&target), &recording));
        assert_eq!(seen.get(), Some((Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 5.0))));
    }

    #[test]
    fn test_out_of_cone_skips_raycast() {
        let sensor = PerceptionSensor::default();
        let calls = Cell::new(0);
        let counting = |_: Vec3, _: Vec3| {
            calls.set(calls.get() + 1);
            None
        };

        sensor.can_see(&guard_facing_z(), Some(&target_at(0.0, 0.0, -5.0)), &counting);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_perception_config_validation() {
        assert!(PerceptionConfig::new(20.0, 45.0, "Player").is_ok());
        assert_eq!(
            PerceptionConfig::new(0.0, 45.0, "Player"),
            Err(ConfigError::NonPositiveViewDistance(0.0))
        );
        assert_eq!(
            PerceptionConfig::new(20.0, 0.0, "Player"),
            Err(ConfigError::ViewAngleOutOfRange(0.0))
        );
        assert_eq!(
            PerceptionConfig::new(20.0, 181.0, "Player"),
            Err(ConfigError::ViewAngleOutOfRange(181.0))
        );
        assert_eq!(PerceptionConfig::new(20.0, 45.0, ""), Err(ConfigError::EmptyTargetTag));
    }

    #[test]
    fn test_perception_config_defaults() {
        let config = PerceptionConfig::default();
        assert_eq!(config.view_distance, 20.0);
        assert_eq!(config.view_half_angle_degrees, 45.0);
        assert_eq!(config.target_tag, "Player");
        assert!(PerceptionSensor::new(config).is_ok());
    }
}
