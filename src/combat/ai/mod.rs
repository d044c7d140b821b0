//! Combat domain: behavior for common enemies and bosses.

pub mod boss;
pub mod enemy;

pub use boss::{BossBrain, BossVariant, MAX_MINIONS, mirror_multiplier};
