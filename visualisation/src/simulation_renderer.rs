use billiards::{ self as bl, FrameScheduler, Rgb, Surface };
use macroquad::{ prelude::*, ui::{ self, root_ui } };

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// The macroquad window, drawn in screen coordinates
pub struct MacroquadSurface(());

impl MacroquadSurface {
    /// None if the window has no drawable area (yet)
    pub fn acquire() -> Option<Self> {
        let drawable = screen_width() > 0. && screen_height() > 0.;
        drawable.then_some(Self(()))
    }
}

impl Surface for MacroquadSurface {
    fn size(&self) -> bl::Vec2 {
        bl::Vec2::new(screen_width(), screen_height())
    }

    fn clear(&mut self, color: Rgb) {
        clear_background(to_color(color));
    }

    fn stroke_rect(&mut self, origin: bl::Vec2, size: bl::Vec2, line_width: f32, color: Rgb) {
        // macroquad draws the lines inside the rectangle, grow it so they end
        // up centered on the edges
        let h = line_width / 2.;
        draw_rectangle_lines(origin.x - h, origin.y - h, size.x + line_width, size.y + line_width, line_width, to_color(color));
    }

    fn fill_circle(&mut self, center: bl::Vec2, radius: f32, color: Rgb) {
        draw_circle(center.x, center.y, radius, to_color(color));
    }
}

pub struct MacroquadScheduler;

impl FrameScheduler for MacroquadScheduler {
    async fn next_frame(&mut self) {
        macroquad::window::next_frame().await
    }
}

pub fn setup_overlay_skin() {
    let label_style = root_ui().style_builder()
        .font_size(16)
        .text_color(DARKGRAY)
        .build();
    let skin = ui::Skin {
        label_style,
        ..root_ui().default_skin()
    };
    root_ui().push_skin(&skin);
}

pub fn draw_overlay(game_loop: &bl::GameLoop, scene_name: &str) {
    let state = game_loop.state();
    let momentum = state.total_momentum();

    root_ui().label(None, &format!("fps: {}", get_fps()));
    root_ui().label(None, &format!("scene: {scene_name} ({} balls)", state.balls().len()));
    root_ui().label(None, &format!("frame: {}", game_loop.frame()));
    root_ui().label(None, &format!("momentum: ({:.03}, {:.03})", momentum.x, momentum.y));
    root_ui().label(None, &format!("energy: {:.03}", state.kinetic_energy()));
    if game_loop.is_paused() {
        root_ui().label(None, "PAUSED (N: step)");
    }
}
