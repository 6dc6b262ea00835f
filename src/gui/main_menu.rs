//! Title screen: game name plus a pulsing "press any key" prompt.

use crate::text::{draw_simple_text, text_width};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

pub struct MainMenuScreen {
    elapsed: f32,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        MainMenuScreen { elapsed: 0.0 }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let (screen_width, screen_height) = canvas.logical_size();
        let center_x = screen_width as i32 / 2;
        let center_y = screen_height as i32 / 2;

        canvas.set_draw_color(Color::RGB(24, 24, 34));
        canvas.clear();

        let title = "CRYSTAL CAVERNS";
        draw_simple_text(
            canvas,
            title,
            center_x - text_width(title, 6) as i32 / 2,
            center_y - 140,
            Color::RGB(120, 190, 255),
            6,
        )?;

        // Prompt pulses between dim and bright at about 1 Hz.
        let pulse = (self.elapsed * std::f32::consts::TAU).sin() * 0.5 + 0.5;
        let level = 140 + (pulse * 115.0) as u8;
        let prompt = "PRESS ANY KEY TO START";
        draw_simple_text(
            canvas,
            prompt,
            center_x - text_width(prompt, 2) as i32 / 2,
            center_y + 20,
            Color::RGB(level, level, level),
            2,
        )?;

        let hint = "ARROWS MOVE - SPACE MINES AND ATTACKS";
        draw_simple_text(
            canvas,
            hint,
            center_x - text_width(hint, 1) as i32 / 2,
            screen_height as i32 - 60,
            Color::RGB(130, 130, 145),
            1,
        )?;

        Ok(())
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}
