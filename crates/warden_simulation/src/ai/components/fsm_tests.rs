//! Tests for guard FSM components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::{GuardConfig, GuardState, GuardVision};
    use crate::error::ConfigError;

    #[test]
    fn test_guard_state_default() {
        assert_eq!(GuardState::default(), GuardState::Patrol);
    }

    #[test]
    fn test_guard_state_display() {
        assert_eq!(GuardState::Patrol.to_string(), "Patrol");
        assert_eq!(GuardState::Investigate.to_string(), "Investigate");
        assert_eq!(GuardState::Chase.to_string(), "Chase");
    }

    #[test]
    fn test_guard_config_default() {
        let config = GuardConfig::default();
        assert_eq!(config.chasing_speed, 2.0);
        assert_eq!(config.chasing_rot_speed, 2.0);
        assert_eq!(config.chasing_accuracy, 5.0);
        assert_eq!(config.patrol_distance, 10.0);
        assert_eq!(config.patrol_wait_seconds, 5.0);
        assert_eq!(config.arrival_slack, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_guard_config_rejects_negative_and_nan() {
        let negative = GuardConfig { chasing_speed: -2.0, ..Default::default() };
        assert_eq!(
            negative.validate(),
            Err(ConfigError::NegativeParameter { name: "chasing_speed", value: -2.0 })
        );

        let nan = GuardConfig { patrol_distance: f32::NAN, ..Default::default() };
        assert!(nan.validate().is_err());

        let zero_wait = GuardConfig { patrol_wait_seconds: 0.0, ..Default::default() };
        assert!(zero_wait.validate().is_ok());
    }

    #[test]
    fn test_guard_vision_visibility() {
        assert!(!GuardVision::default().is_visible());
        let vision = GuardVision { sighting: Some(Vec3::Z) };
        assert!(vision.is_visible());
    }
}
