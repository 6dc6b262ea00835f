//! Game-over overlay, shown for both endings: all crystals banked (victory)
//! or the player killed by bugs (defeat).

use crate::crystal::CrystalColor;
use crate::tally::CrystalTally;
use crate::text::{draw_simple_text, text_width};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

pub struct GameOverScreen {
    victory: bool,
}

impl GameOverScreen {
    pub fn new(victory: bool) -> Self {
        GameOverScreen { victory }
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    /// Darkens the frozen scene and prints the ending, the final tallies and
    /// the restart prompt.
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        tally: &CrystalTally,
    ) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 180));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_width, screen_height) = canvas.logical_size();
        let center_x = screen_width as i32 / 2;
        let center_y = screen_height as i32 / 2;

        let (title, title_color) = if self.victory {
            ("GAME OVER", Color::RGB(255, 255, 255))
        } else {
            ("YOU DIED", Color::RGB(255, 60, 60))
        };
        draw_simple_text(
            canvas,
            title,
            center_x - text_width(title, 5) as i32 / 2,
            center_y - 120,
            title_color,
            5,
        )?;

        for (i, color) in CrystalColor::ALL.iter().enumerate() {
            let line = format!("{}: {}", color.label(), tally.count(*color));
            draw_simple_text(
                canvas,
                &line,
                center_x - text_width(&line, 2) as i32 / 2,
                center_y - 20 + i as i32 * 24,
                color.tint(),
                2,
            )?;
        }

        let prompt = "SPACE TO RESTART - ESC TO QUIT";
        draw_simple_text(
            canvas,
            prompt,
            center_x - text_width(prompt, 2) as i32 / 2,
            screen_height as i32 - 100,
            Color::RGB(200, 200, 210),
            2,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_flavor_is_tracked() {
        assert!(GameOverScreen::new(true).is_victory());
        assert!(!GameOverScreen::new(false).is_victory());
    }
}
