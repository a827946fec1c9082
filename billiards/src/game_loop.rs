use crate::{ config, render_frame, StepParams, StepReport, Style, Surface, WorldState };

use std::sync::{ atomic::{ AtomicBool, Ordering }, Arc };

use log::{ info, trace };
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
    #[error("no drawing surface is available")]
    SurfaceUnavailable,
}

/// Host primitive running the continuation before the next repaint
pub trait FrameScheduler {
    fn next_frame(&mut self) -> impl Future<Output = ()>;
}

/// Owned handle on a running [GameLoop].
///
/// Dropping the handle stops the loop, no frame is rendered after that.
#[derive(Debug)]
#[must_use = "dropping the handle stops the loop immediately"]
pub struct LoopHandle {
    active: Arc<AtomicBool>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            info!("game loop cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

pub struct GameLoop {
    state: WorldState,
    params: StepParams,
    style: Style,
    active: Arc<AtomicBool>,
    paused: bool,
    /// Steps to run even though the loop is paused
    pending_steps: usize,
    frame: u64,
    last_report: StepReport,
}

impl GameLoop {
    /// Creates the loop and its handle, refusing to start without a surface
    /// to draw on.
    pub fn start<S: Surface>(
        state: WorldState,
        params: StepParams,
        style: Style,
        surface: Option<&S>,
    ) -> Result<(Self, LoopHandle), LoopError> {
        let size = surface.ok_or(LoopError::SurfaceUnavailable)?.size();
        if !(size.x > 0. && size.y > 0.) {
            return Err(LoopError::SurfaceUnavailable);
        }

        let active = Arc::new(AtomicBool::new(true));
        let game_loop = Self {
            state,
            params,
            style,
            active: active.clone(),
            paused: false,
            pending_steps: 0,
            frame: 0,
            last_report: StepReport::default(),
        };
        info!("game loop started with {} balls on a {}x{} surface", game_loop.state.balls().len(), size.x, size.y);
        Ok((game_loop, LoopHandle { active }))
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Same as [LoopHandle::cancel], from inside the loop
    pub fn stop(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.pending_steps = 0;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused { self.resume() } else { self.pause() }
    }

    /// Runs a single step on the next tick, only meaningful while paused
    pub fn step_once(&mut self) {
        if self.paused {
            self.pending_steps += 1;
        }
    }

    pub fn reset(&mut self, state: WorldState) {
        info!("game loop reset with {} balls", state.balls().len());
        self.state = state;
        self.frame = 0;
        self.pending_steps = 0;
        self.last_report = StepReport::default();
    }

    /// Runs one frame: advances the simulation (unless paused) then redraws
    /// it.
    ///
    /// Collisions only change velocities, so drawing once the whole step is
    /// done gives the same picture as drawing each ball right after it moved.
    pub fn tick(&mut self, surface: &mut impl Surface) -> FrameStatus {
        if !self.is_active() {
            return FrameStatus::Stopped;
        }

        if !self.paused || self.pending_steps > 0 {
            self.pending_steps = self.pending_steps.saturating_sub(1);
            self.last_report = self.state.advance(&self.params, config::FRAME_DT);
            self.frame += 1;
            trace!("frame {}", self.frame);
        }

        render_frame(surface, &self.state, &self.style);
        FrameStatus::Continue
    }

    /// Ticks every frame until the loop is stopped, calling `on_frame` after
    /// each rendered frame. Returns the last simulated state.
    pub async fn run(
        mut self,
        surface: &mut impl Surface,
        scheduler: &mut impl FrameScheduler,
        mut on_frame: impl FnMut(&mut Self),
    ) -> WorldState {
        while self.tick(surface) == FrameStatus::Continue {
            on_frame(&mut self);
            scheduler.next_frame().await;
        }
        info!("game loop stopped after {} frames", self.frame);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ render::tests::{ DrawCall, RecordingSurface }, Ball };

    use std::{ pin::pin, task::{ Context, Poll, Waker } };

    use glam::Vec2;

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Vec2::new(800., 400.))
    }

    fn start(state: WorldState, surface: &RecordingSurface) -> (GameLoop, LoopHandle) {
        GameLoop::start(state, StepParams::default(), Style::default(), Some(surface)).unwrap()
    }

    /// Scheduler dropping the loop handle after a number of frames
    struct CountingScheduler {
        frames: usize,
        stop_after: usize,
        handle: Option<LoopHandle>,
    }

    impl FrameScheduler for CountingScheduler {
        async fn next_frame(&mut self) {
            self.frames += 1;
            if self.frames == self.stop_after {
                self.handle = None;
            }
        }
    }

    fn fill_circle_count(surface: &RecordingSurface) -> usize {
        surface.calls.iter()
            .filter(|call| matches!(call, DrawCall::FillCircle { .. }))
            .count()
    }

    #[test]
    fn test_missing_surface_does_not_start() {
        let result = GameLoop::start::<RecordingSurface>(
            WorldState::reference(), StepParams::default(), Style::default(), None,
        );
        assert_eq!(result.err(), Some(LoopError::SurfaceUnavailable));
    }

    #[test]
    fn test_empty_surface_does_not_start() {
        let empty = RecordingSurface::new(Vec2::new(0., 400.));
        let result = GameLoop::start(WorldState::reference(), StepParams::default(), Style::default(), Some(&empty));
        assert_eq!(result.err(), Some(LoopError::SurfaceUnavailable));
    }

    #[test]
    fn test_tick_advances_then_draws() {
        let mut surface = surface();
        let (mut game_loop, _handle) = start(WorldState::reference(), &surface);

        assert_eq!(game_loop.tick(&mut surface), FrameStatus::Continue);
        assert_eq!(game_loop.frame(), 1);
        assert!(matches!(surface.calls[0], DrawCall::Clear(_)));
        assert!(matches!(surface.calls[1], DrawCall::StrokeRect { .. }));
        assert_eq!(surface.calls[2], DrawCall::FillCircle {
            center: Vec2::new(202., 201.),
            radius: 10.,
            color: config::BALL_COLOR,
        });
        assert_eq!(surface.calls[3], DrawCall::FillCircle {
            center: Vec2::new(399., 201.),
            radius: 10.,
            color: config::BALL_COLOR,
        });
    }

    #[test]
    fn test_dropped_handle_stops_ticks() {
        let mut surface = surface();
        let (mut game_loop, handle) = start(WorldState::reference(), &surface);

        game_loop.tick(&mut surface);
        drop(handle);

        let calls = surface.calls.len();
        assert_eq!(game_loop.tick(&mut surface), FrameStatus::Stopped);
        assert_eq!(surface.calls.len(), calls);
        assert!(!game_loop.is_active());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let surface = surface();
        let (game_loop, handle) = start(WorldState::reference(), &surface);
        handle.cancel();
        handle.cancel();
        assert!(!handle.is_active());
        assert!(!game_loop.is_active());
    }

    #[test]
    fn test_run_until_handle_dropped() {
        let mut surface = surface();
        let (game_loop, handle) = start(WorldState::reference(), &surface);
        let mut scheduler = CountingScheduler { frames: 0, stop_after: 3, handle: Some(handle) };

        let mut seen = vec![];
        let state = block_on(game_loop.run(&mut surface, &mut scheduler, |game_loop| seen.push(game_loop.frame())));

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(scheduler.frames, 3);
        assert_eq!(fill_circle_count(&surface), 6);
        assert_eq!(state.balls()[0].pos, Vec2::new(206., 203.));
    }

    #[test]
    fn test_stop_from_inside_the_loop() {
        let mut surface = surface();
        let (game_loop, handle) = start(WorldState::reference(), &surface);
        let mut scheduler = CountingScheduler { frames: 0, stop_after: usize::MAX, handle: None };

        let state = block_on(game_loop.run(&mut surface, &mut scheduler, |game_loop| {
            if game_loop.frame() == 2 {
                game_loop.stop();
            }
        }));

        assert!(!handle.is_active());
        assert_eq!(scheduler.frames, 2);
        assert_eq!(state.balls()[0].pos, Vec2::new(204., 202.));
    }

    #[test]
    fn test_pause_redraws_without_advancing() {
        let mut surface = surface();
        let (mut game_loop, _handle) = start(WorldState::reference(), &surface);

        game_loop.pause();
        game_loop.tick(&mut surface);
        game_loop.tick(&mut surface);
        assert_eq!(game_loop.frame(), 0);
        assert_eq!(game_loop.state(), &WorldState::reference());
        assert_eq!(fill_circle_count(&surface), 4);

        game_loop.step_once();
        game_loop.tick(&mut surface);
        game_loop.tick(&mut surface);
        assert_eq!(game_loop.frame(), 1);

        game_loop.resume();
        game_loop.tick(&mut surface);
        assert_eq!(game_loop.frame(), 2);
    }

    #[test]
    fn test_step_once_ignored_while_running() {
        let mut surface = surface();
        let (mut game_loop, _handle) = start(WorldState::reference(), &surface);

        game_loop.step_once();
        game_loop.tick(&mut surface);
        game_loop.pause();
        game_loop.tick(&mut surface);
        assert_eq!(game_loop.frame(), 1);
    }

    #[test]
    fn test_reset_and_report() {
        let mut surface = surface();
        let head_on = WorldState::new(800., 400.).unwrap()
            .with_ball(Ball::new(Vec2::new(100., 200.), Vec2::new(1., 0.), 10., 1.).unwrap())
            .with_ball(Ball::new(Vec2::new(115., 200.), Vec2::new(-1., 0.), 10., 1.).unwrap());
        let (mut game_loop, _handle) = start(WorldState::reference(), &surface);

        game_loop.tick(&mut surface);
        game_loop.reset(head_on.clone());
        assert_eq!(game_loop.frame(), 0);
        assert_eq!(game_loop.state(), &head_on);

        game_loop.tick(&mut surface);
        assert_eq!(game_loop.last_report().collisions, vec![(0, 1)]);
    }
}
