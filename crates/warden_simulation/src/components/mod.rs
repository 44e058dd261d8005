//! ECS Components общие для доменов
//!
//! - pose: Pose + ChaseMotion (ориентация, прямое движение)
//! - actor: PerceptionTag, GuardTarget

pub mod actor;
pub mod pose;

pub use actor::*;
pub use pose::*;
