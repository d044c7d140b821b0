//! World domain: where boss phases put their platforms.

use bevy::prelude::*;

use crate::combat::PlatformLayout;
use crate::world::components::SkyDrift;

pub const LEDGE_SIZE: Vec2 = Vec2::new(80.0, 12.0);

const STATIC_LEDGES: [(f32, f32); 5] = [
    (-240.0, 60.0),
    (-120.0, 130.0),
    (0.0, 200.0),
    (120.0, 130.0),
    (240.0, 60.0),
];

const SKY_LEDGES: [(f32, f32); 6] = [
    (-300.0, 120.0),
    (-180.0, 200.0),
    (-60.0, 120.0),
    (60.0, 200.0),
    (180.0, 120.0),
    (300.0, 200.0),
];

const SKY_DRIFT_AMPLITUDE: f32 = 40.0;
const SKY_DRIFT_PERIOD_MS: f32 = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformPlacement {
    pub position: Vec2,
    pub size: Vec2,
    pub drift: Option<SkyDrift>,
}

pub fn platform_placements(layout: PlatformLayout, center: Vec2) -> Vec<PlatformPlacement> {
    match layout {
        PlatformLayout::Static => STATIC_LEDGES
            .iter()
            .map(|&(x, y)| PlatformPlacement {
                position: center + Vec2::new(x, y),
                size: LEDGE_SIZE,
                drift: None,
            })
            .collect(),
        PlatformLayout::Sky => SKY_LEDGES
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| PlatformPlacement {
                position: center + Vec2::new(x, y),
                size: LEDGE_SIZE,
                // Neighbours drift out of step with each other
                drift: Some(SkyDrift::new(
                    SKY_DRIFT_AMPLITUDE,
                    SKY_DRIFT_PERIOD_MS,
                    (i % 2) as f32 * SKY_DRIFT_PERIOD_MS * 0.5,
                )),
            })
            .collect(),
    }
}
