//! Guard systems (FixedUpdate, порядок задаёт GuardPlugin)

pub mod fsm;
pub mod reactions;
pub mod vision;

pub use fsm::*;
pub use reactions::*;
pub use vision::*;
