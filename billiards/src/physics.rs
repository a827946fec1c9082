use crate::{ config, default, Ball, WorldState };

use glam::f32::Vec2;
use itertools::Itertools;
use log::{ debug, trace };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Multiplier applied to a velocity component reflected off a wall
    pub wall_damping: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            wall_damping: config::WALL_DAMPING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallBounce {
    pub ball_idx: usize,
    pub axis: Axis,
}

/// What happened during a single step
#[derive(Default, Debug, Clone, PartialEq)]
pub struct StepReport {
    pub wall_bounces: Vec<WallBounce>,
    /// Pairs `(i, j)`, `i < j`, whose velocities were exchanged
    pub collisions: Vec<(usize, usize)>,
    /// Overlapping pairs sharing the same center, left untouched
    pub degenerate_pairs: Vec<(usize, usize)>,
    pub pairs_checked: usize,
}

/// Elastic collision of two disks along the line joining their centers.
///
/// Only the normal component of the relative velocity is exchanged, the
/// tangential part is left as is. Returns None when both centers coincide as
/// there is no normal to push along.
pub fn resolve_elastic_collision(
    pos1: Vec2,
    vel1: Vec2,
    mass1: f32,
    pos2: Vec2,
    vel2: Vec2,
    mass2: f32,
) -> Option<(Vec2, Vec2)> {
    let normal = (pos2 - pos1).try_normalize()?;

    let impulse = 2. * (vel2 - vel1).dot(normal) / (mass1 + mass2);

    Some((
        vel1 + impulse * mass2 * normal,
        vel2 - impulse * mass1 * normal,
    ))
}

/// Reflects `vel` if the `[pos - radius, pos + radius]` span touches or
/// crosses `0` or `limit`.
///
/// Positions are not clamped, so a ball that stays past a wall gets reflected
/// (and damped) again on every step until it is clear of it.
// FIXME: repeated damping while a ball sits on the wall is kept as is, it
// could be intended energy loss or a missing position correction
fn reflect_on_walls(pos: f32, vel: &mut f32, radius: f32, limit: f32, damping: f32) -> bool {
    if pos - radius <= 0. || pos + radius >= limit {
        *vel *= -damping;
        true
    }
    else {
        false
    }
}

fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert!(i < j);
    let (head, tail) = balls.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

impl WorldState {
    /// Advances every ball by `dt` then resolves overlapping pairs
    pub fn advance(&mut self, params: &StepParams, dt: f32) -> StepReport {
        let mut report = StepReport::default();
        let (width, height) = (self.width, self.height);

        for (ball_idx, ball) in self.balls.iter_mut().enumerate() {
            ball.pos += ball.vel * dt;

            let radius = ball.radius();
            if reflect_on_walls(ball.pos.x, &mut ball.vel.x, radius, width, params.wall_damping) {
                report.wall_bounces.push(WallBounce { ball_idx, axis: Axis::X });
            }
            if reflect_on_walls(ball.pos.y, &mut ball.vel.y, radius, height, params.wall_damping) {
                report.wall_bounces.push(WallBounce { ball_idx, axis: Axis::Y });
            }
        }

        for [i, j] in (0..self.balls.len()).array_combinations::<2>() {
            report.pairs_checked += 1;

            let (a, b) = pair_mut(&mut self.balls, i, j);
            if a.pos.distance(b.pos) >= a.radius() + b.radius() {
                continue;
            }

            match resolve_elastic_collision(a.pos, a.vel, a.mass(), b.pos, b.vel, b.mass()) {
                Some((vel_a, vel_b)) => {
                    debug!("collision {i}<->{j}: {} {} -> {vel_a} {vel_b}", a.vel, b.vel);
                    a.vel = vel_a;
                    b.vel = vel_b;
                    report.collisions.push((i, j));
                }
                None => {
                    debug!("balls {i} and {j} share the same center, skipping resolution");
                    report.degenerate_pairs.push((i, j));
                }
            }
        }

        for bounce in &report.wall_bounces {
            debug!("ball {} bounced on {:?} wall", bounce.ball_idx, bounce.axis);
        }
        trace!(
            "step dt={dt}: {} bounces, {} collisions, {} pairs checked",
            report.wall_bounces.len(), report.collisions.len(), report.pairs_checked,
        );

        report
    }
}

/// Pure version of [WorldState::advance]
pub fn step(state: &WorldState, params: &StepParams, dt: f32) -> (WorldState, StepReport) {
    let mut next = state.clone();
    let report = next.advance(params, dt);
    (next, report)
}

/// Applies [step] `frames` times with the reference frame step
pub fn simulate_frames(state: &WorldState, params: &StepParams, frames: usize) -> WorldState {
    let mut state = state.clone();
    for _ in 0..frames {
        state.advance(params, config::FRAME_DT);
    }
    state
}

impl StepReport {
    pub fn is_quiet(&self) -> bool {
        *self == Self { pairs_checked: self.pairs_checked, ..default() }
    }
}
