//! Rapier backend для `WorldQuery`
//!
//! Первый коллайдер на луче (solid, сенсоры игнорируются); коллайдер самого
//! observer'а исключаем, иначе луч упрётся в собственную капсулу.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, RapierContext};

use super::RayHit;
use crate::components::PerceptionTag;

pub fn rapier_raycast(
    context: &RapierContext,
    tags: &Query<&PerceptionTag>,
    observer: Entity,
    origin: Vec3,
    direction: Vec3,
) -> Option<RayHit> {
    let filter = QueryFilter::default()
        .exclude_collider(observer)
        .exclude_sensors();

    // max_toi в единицах `direction`; луч неограничен
    let (entity, toi) = context.cast_ray(origin, direction, f32::MAX, true, filter)?;

    let tag = tags.get(entity).ok().map(|tag| tag.0.clone());
    Some(RayHit::new(toi * direction.length(), tag))
}
