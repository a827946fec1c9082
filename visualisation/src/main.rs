mod controls;
mod logging;
mod scenes;
mod simulation_renderer;

use controls::Action;
use scenes::SceneCycle;
use simulation_renderer::*;

use billiards::{ self as bl, config };
use log::{ error, info, warn };
use macroquad::prelude::*;

fn window_conf() -> Conf {
    Conf {
        window_title: "Billiards".to_owned(),
        window_width: config::FIELD_WIDTH as i32,
        window_height: config::FIELD_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn apply_action(action: Action, game_loop: &mut bl::GameLoop, scenes: &mut SceneCycle) {
    match action {
        Action::TogglePause => game_loop.toggle_pause(),
        Action::Step => game_loop.step_once(),
        Action::Reset => match scenes.current().create_world_state() {
            Ok(state) => game_loop.reset(state),
            Err(err) => error!("could not reset {}: {err}", scenes.current().name()),
        },
        Action::NextScene => {
            let scene = scenes.advance();
            info!("switching to scene {}", scene.name());
            match scene.create_world_state() {
                Ok(state) => game_loop.reset(state),
                Err(err) => error!("could not build {}: {err}", scene.name()),
            }
        }
        Action::Quit => game_loop.stop(),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err}");
    }

    let Some(mut scenes) = SceneCycle::new(scenes::get_all_scenes())
    else { return };
    let initial_state = match scenes.current().create_world_state() {
        Ok(state) => state,
        Err(err) => {
            error!("could not build {}: {err}", scenes.current().name());
            return;
        }
    };

    let surface = MacroquadSurface::acquire();
    let (game_loop, handle) = match bl::GameLoop::start(
        initial_state,
        bl::StepParams::default(),
        bl::Style::default(),
        surface.as_ref(),
    ) {
        Ok(started) => started,
        Err(err) => {
            warn!("not starting: {err}");
            return;
        }
    };
    let Some(mut surface) = surface
    else { return };

    prevent_quit();
    setup_overlay_skin();

    let final_state = game_loop.run(&mut surface, &mut MacroquadScheduler, |game_loop| {
        for action in controls::pressed_actions() {
            apply_action(action, game_loop, &mut scenes);
        }
        if is_quit_requested() {
            game_loop.stop();
        }
        draw_overlay(game_loop, scenes.current().name());
    }).await;

    // Teardown: releases the loop handle
    drop(handle);
    info!(
        "exiting with {} balls, energy {:.03}",
        final_state.balls().len(),
        final_state.kinetic_energy(),
    );
}
