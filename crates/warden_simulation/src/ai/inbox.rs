//! Очередь disturbance'ов для guard'а, тикаемого в другом потоке
//!
//! Producer (шум, скрипт уровня) кладёт точки в любой момент,
//! guard забирает их в начале своего тика — до vision шага.
//! Так disturbance и visibility-переход никогда не перемешиваются.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct DisturbanceInbox {
    pending: Arc<Mutex<Vec<Vec3>>>,
}

impl DisturbanceInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, point: Vec3) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(point);
    }

    /// Забрать все точки в порядке поступления
    pub fn drain(&self) -> Vec<Vec3> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }
}
