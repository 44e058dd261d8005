//! Pose: позиция + ориентация актора
//!
//! Forward = -Z (Bevy convention, как `Transform::forward`).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose в `position`, смотрящая вдоль `direction` (нулевой вектор → identity)
    pub fn looking_to(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            rotation: look_rotation(direction).unwrap_or(Quat::IDENTITY),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Применить Chase-движение: новая ориентация + сдвиг
    pub fn apply_motion(&mut self, motion: ChaseMotion) {
        self.rotation = motion.facing;
        self.position += motion.translation;
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}

impl From<Transform> for Pose {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform::from_translation(pose.position).with_rotation(pose.rotation)
    }
}

/// Прямое движение guard'а в Chase (без NavMesh)
///
/// `facing` — абсолютная ориентация после поворота за тик,
/// `translation` — сдвиг вдоль нового forward (не к цели напрямую).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ChaseMotion {
    pub facing: Quat,
    pub translation: Vec3,
}

/// Rotation, у которой forward (-Z) смотрит вдоль `direction`, up = +Y.
///
/// `None` для нулевого/невалидного вектора.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let direction = Dir3::new(direction).ok()?;
    Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_looking_to_positive_z() {
        let pose = Pose::looking_to(Vec3::ZERO, Vec3::Z);
        assert!(pose.forward().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_look_rotation_zero_vector() {
        assert!(look_rotation(Vec3::ZERO).is_none());
        let pose = Pose::looking_to(Vec3::ONE, Vec3::ZERO);
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_transform_round_trip_keeps_forward() {
        let transform = Transform::from_xyz(1.0, 0.0, 2.0).looking_to(Vec3::X, Vec3::Y);
        let pose = Pose::from(&transform);
        assert!(pose.forward().abs_diff_eq(transform.forward().as_vec3(), EPS));

        let back: Transform = pose.into();
        assert_eq!(back.translation, transform.translation);
    }

    #[test]
    fn test_apply_motion() {
        let mut pose = Pose::default();
        let facing = look_rotation(Vec3::X).unwrap();
        pose.apply_motion(ChaseMotion {
            facing,
            translation: Vec3::new(0.5, 0.0, 0.0),
        });
        assert_eq!(pose.position, Vec3::new(0.5, 0.0, 0.0));
        assert!(pose.forward().abs_diff_eq(Vec3::X, EPS));
    }
}
