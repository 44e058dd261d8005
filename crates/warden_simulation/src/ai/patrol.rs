//! Генерация patrol точек
//!
//! Точка = center + uniform offset по X и Z в [-max_offset, max_offset], Y не трогаем.
//! RNG передаётся снаружи: seeded ChaCha8Rng → точные точки в тестах.

use bevy::prelude::*;
use rand::Rng;

pub fn patrol_point<R: Rng + ?Sized>(center: Vec3, max_offset: f32, rng: &mut R) -> Vec3 {
    if !max_offset.is_finite() || max_offset <= 0.0 {
        return center;
    }

    let dx = rng.gen_range(-max_offset..=max_offset);
    let dz = rng.gen_range(-max_offset..=max_offset);
    center + Vec3::new(dx, 0.0, dz)
}
