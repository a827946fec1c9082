use crate::{ config, WorldState };

use std::fmt;

use glam::f32::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected a `#rrggbb` colour, got {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a CSS-style `#rrggbb` colour
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let malformed = || ColorError::Malformed(hex.to_owned());

        let digits = hex.strip_prefix('#').ok_or_else(malformed)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(malformed());
        }
        let channel = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16)
            .map_err(|_| malformed());

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 2D drawing context the scene is rendered onto
pub trait Surface {
    /// Pixel dimensions of the drawable area
    fn size(&self) -> Vec2;

    fn clear(&mut self, color: Rgb);

    /// Strokes the outline of a rectangle, the line is centered on the
    /// rectangle's edges
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, line_width: f32, color: Rgb);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background: Rgb,
    pub border_color: Rgb,
    pub border_width: f32,
    pub ball_color: Rgb,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: config::BACKGROUND_COLOR,
            border_color: config::BORDER_COLOR,
            border_width: config::BORDER_WIDTH,
            ball_color: config::BALL_COLOR,
        }
    }
}

/// Draws a snapshot of the world: cleared background, table border, then
/// every ball in order
pub fn render_frame(surface: &mut impl Surface, world: &WorldState, style: &Style) {
    surface.clear(style.background);
    surface.stroke_rect(Vec2::ZERO, world.size(), style.border_width, style.border_color);

    for ball in world.balls() {
        surface.fill_circle(ball.pos, ball.radius(), style.ball_color);
    }
}
