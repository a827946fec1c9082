use billiards::{ self as bl, config, Vec2 };
use rand::{ Rng, SeedableRng };
use thiserror::Error;

/// Attempts at placing a random ball before giving up on it
const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Ball(#[from] bl::BallError),
    #[error(transparent)]
    World(#[from] bl::WorldError),
}

pub trait Scene {
    fn name(&self) -> &'static str;
    fn create_world_state(&self) -> Result<bl::WorldState, SceneError>;
}

fn table() -> Result<bl::WorldState, SceneError> {
    Ok(bl::WorldState::new(config::FIELD_WIDTH, config::FIELD_HEIGHT)?)
}

fn standard_ball(pos: Vec2, vel: Vec2) -> Result<bl::Ball, SceneError> {
    Ok(bl::Ball::new(pos, vel, config::BALL_RADIUS, config::BALL_MASS)?)
}

pub struct ReferenceBreak;

impl Scene for ReferenceBreak {
    fn name(&self) -> &'static str {
        "Reference break"
    }

    fn create_world_state(&self) -> Result<bl::WorldState, SceneError> {
        Ok(bl::WorldState::reference())
    }
}

/// Two equal balls overlapping on the X axis, heading at each other
pub struct HeadOn;

impl Scene for HeadOn {
    fn name(&self) -> &'static str {
        "Head-on swap"
    }

    fn create_world_state(&self) -> Result<bl::WorldState, SceneError> {
        Ok(table()?
            .with_ball(standard_ball(Vec2::new(392.5, 200.), Vec2::new(1., 0.))?)
            .with_ball(standard_ball(Vec2::new(407.5, 200.), Vec2::new(-1., 0.))?))
    }
}

/// A single ball grazing the left wall
pub struct WallTouch;

impl Scene for WallTouch {
    fn name(&self) -> &'static str {
        "Wall touch"
    }

    fn create_world_state(&self) -> Result<bl::WorldState, SceneError> {
        Ok(table()?
            .with_ball(standard_ball(Vec2::new(config::BALL_RADIUS + 2., 200.), Vec2::new(-2., 0.5))?))
    }
}

/// Seeded rack of non-overlapping balls of random size and heading
pub struct RandomRack {
    pub seed: u64,
    pub count: usize,
    pub name: &'static str,
}

impl Scene for RandomRack {
    fn name(&self) -> &'static str {
        self.name
    }

    fn create_world_state(&self) -> Result<bl::WorldState, SceneError> {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(self.seed);
        let mut world = table()?;

        let mut attempts = 0;
        while world.balls().len() < self.count && attempts < self.count * MAX_PLACEMENT_ATTEMPTS {
            attempts += 1;

            let radius: f32 = rng.random_range(5. ..15.);
            let pos = Vec2::new(
                rng.random_range(radius..(world.width() - radius)),
                rng.random_range(radius..(world.height() - radius)),
            );
            let vel = Vec2::from_angle(rng.random_range(0. ..std::f32::consts::TAU))
                * rng.random_range(0.5f32..3.);

            let overlaps = world.balls().iter()
                .any(|other| other.pos.distance(pos) <= other.radius() + radius);
            if overlaps {
                continue;
            }

            // Mass grows with the area of the ball
            let mass = config::BALL_MASS * (radius / config::BALL_RADIUS).powi(2);
            world.push_ball(bl::Ball::new(pos, vel, radius, mass)?);
        }

        if world.balls().len() < self.count {
            log::warn!("{}: only placed {}/{} balls", self.name, world.balls().len(), self.count);
        }
        Ok(world)
    }
}

pub fn get_all_scenes() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(ReferenceBreak),
        Box::new(HeadOn),
        Box::new(WallTouch),
        Box::new(RandomRack {
            seed: 4444,
            count: 12,
            name: "Random rack 1",
        }),
        Box::new(RandomRack {
            seed: 4445,
            count: 40,
            name: "Random rack 2",
        }),
    ]
}

/// Scene catalogue with a cursor on the scene being played
pub struct SceneCycle {
    scenes: Vec<Box<dyn Scene>>,
    current: usize,
}

impl SceneCycle {
    pub fn new(scenes: Vec<Box<dyn Scene>>) -> Option<Self> {
        if scenes.is_empty() {
            return None;
        }
        Some(Self { scenes, current: 0 })
    }

    pub fn current(&self) -> &dyn Scene {
        self.scenes[self.current].as_ref()
    }

    /// Moves to the next scene, wrapping around
    pub fn advance(&mut self) -> &dyn Scene {
        self.current = (self.current + 1) % self.scenes.len();
        self.current()
    }
}
