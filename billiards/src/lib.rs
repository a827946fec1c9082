pub mod config;

pub use glam::Vec2;

mod world_state;
pub use world_state::*;
mod physics;
pub use physics::*;
mod render;
pub use render::*;
mod game_loop;
pub use game_loop::*;

pub(crate) fn default<T: Default>() -> T {
    T::default()
}
