//! Компоненты акторов для perception: теги и ссылка на цель

use bevy::prelude::*;

/// Тег сущности для vision raycast (аналог tag'а коллайдера)
///
/// Guard видит цель только если первый hit луча несёт его `target_tag`.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PerceptionTag(pub String);

impl PerceptionTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn player() -> Self {
        Self::new(crate::perception::DEFAULT_TARGET_TAG)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Кого guard пытается увидеть (None → vision fail-closed)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GuardTarget(pub Option<Entity>);
