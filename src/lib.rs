//! Real-time combat and behavior core for a 2D side-scrolling brawler.

pub mod combat;
pub mod content;
pub mod core;
pub mod player;
pub mod signals;
pub mod world;
