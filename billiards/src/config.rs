//! Fixed constants of the billiards table.
//!
//! None of these are runtime-configurable, they mirror the reference table.

use glam::Vec2;

use crate::Rgb;

pub const FIELD_WIDTH: f32 = 800.;
pub const FIELD_HEIGHT: f32 = 400.;

pub const BORDER_WIDTH: f32 = 10.;
pub const BORDER_COLOR: Rgb = Rgb::new(0x2c, 0x3e, 0x50);
pub const BALL_COLOR: Rgb = Rgb::new(0xe7, 0x4c, 0x3c);
pub const BACKGROUND_COLOR: Rgb = Rgb::new(0xec, 0xf0, 0xf1);

pub const BALL_RADIUS: f32 = 10.;
pub const BALL_MASS: f32 = 1.;

/// Factor applied to the reflected velocity component on a wall bounce
pub const WALL_DAMPING: f32 = 0.99;

/// One frame is one unit of simulated time
pub const FRAME_DT: f32 = 1.;

/// Initial (position, velocity) of the reference balls
pub const REFERENCE_BALLS: [(Vec2, Vec2); 2] = [
    (Vec2::new(200., 200.), Vec2::new(2., 1.)),
    (Vec2::new(400., 200.), Vec2::new(-1., 1.)),
];
