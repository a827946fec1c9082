use crate::{ config, default };

use glam::f32::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BallError {
    #[error("ball radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("ball mass must be finite and positive, got {0}")]
    InvalidMass(f32),
    #[error("ball position and velocity must be finite (pos {pos}, vel {vel})")]
    NonFiniteState { pos: Vec2, vel: Vec2 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum WorldError {
    #[error("field dimensions must be finite and positive, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },
}

/// A circular body moving inside the field.
///
/// Radius and mass are fixed at creation, only position and velocity change
/// from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    mass: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Result<Self, BallError> {
        if !(radius.is_finite() && radius > 0.) {
            return Err(BallError::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass > 0.) {
            return Err(BallError::InvalidMass(mass));
        }
        if !(pos.is_finite() && vel.is_finite()) {
            return Err(BallError::NonFiniteState { pos, vel });
        }

        Ok(Self { pos, vel, radius, mass })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) balls: Vec<Ball>,
}

impl WorldState {
    pub fn new(width: f32, height: f32) -> Result<Self, WorldError> {
        let valid = |side: f32| side.is_finite() && side > 0.;
        if !(valid(width) && valid(height)) {
            return Err(WorldError::InvalidField { width, height });
        }

        Ok(Self {
            width,
            height,
            balls: default(),
        })
    }

    /// The two-ball table the visualisation opens with
    pub fn reference() -> Self {
        let balls = config::REFERENCE_BALLS.iter()
            .map(|&(pos, vel)| Ball { pos, vel, radius: config::BALL_RADIUS, mass: config::BALL_MASS })
            .collect();

        Self {
            width: config::FIELD_WIDTH,
            height: config::FIELD_HEIGHT,
            balls,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Radius and mass stay private on [Ball], so this only exposes position
    /// and velocity for modification.
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn push_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    pub fn with_ball(mut self, ball: Ball) -> Self {
        self.push_ball(ball);
        self
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.balls.iter().map(Ball::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }
}
