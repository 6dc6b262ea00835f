//! Health bar rendered above entities.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Visual configuration for a health bar. Different entity classes get
/// different styles (green for the player, purple for bugs).
#[derive(Debug, Clone)]
pub struct HealthBarStyle {
    pub width: u32,
    pub height: u32,
    /// Vertical offset from the entity's top edge (negative = above).
    pub offset_y: i32,
    pub background_color: Color,
    pub fill_color: Color,
    /// Fill color once health drops under 30%.
    pub low_fill_color: Color,
    pub border_color: Color,
    /// Hide the bar at full health when false.
    pub show_when_full: bool,
}

impl Default for HealthBarStyle {
    fn default() -> Self {
        HealthBarStyle {
            width: 40,
            height: 6,
            offset_y: -10,
            background_color: Color::RGB(40, 40, 40),
            fill_color: Color::RGB(0, 200, 0),
            low_fill_color: Color::RGB(200, 0, 0),
            border_color: Color::RGB(0, 0, 0),
            show_when_full: false,
        }
    }
}

/// Stateless health bar renderer.
///
/// # Example
///
/// ```rust
/// let enemy_bar = HealthBar::with_style(HealthBarStyle {
///     fill_color: Color::RGB(150, 0, 150),
///     ..Default::default()
/// });
/// enemy_bar.render(&mut canvas, bounds.x(), bounds.y(), bounds.width(), health.fraction())?;
/// ```
pub struct HealthBar {
    style: HealthBarStyle,
}

impl HealthBar {
    pub fn new() -> Self {
        HealthBar {
            style: HealthBarStyle::default(),
        }
    }

    pub fn with_style(style: HealthBarStyle) -> Self {
        HealthBar { style }
    }

    pub fn style(&self) -> &HealthBarStyle {
        &self.style
    }

    /// Draws the bar centered over an entity footprint.
    ///
    /// `fraction` is current health over max, 0.0..=1.0 (out-of-range input
    /// is clamped).
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        entity_x: i32,
        entity_y: i32,
        entity_width: u32,
        fraction: f32,
    ) -> Result<(), String> {
        let fraction = fraction.clamp(0.0, 1.0);
        if !self.style.show_when_full && fraction >= 1.0 {
            return Ok(());
        }

        let bar_x = entity_x + entity_width as i32 / 2 - self.style.width as i32 / 2;
        let bar_y = entity_y + self.style.offset_y;

        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(Rect::new(bar_x, bar_y, self.style.width, self.style.height))?;

        let fill_width = (self.style.width as f32 * fraction) as u32;
        if fill_width > 0 {
            let fill_color = if fraction < 0.3 {
                self.style.low_fill_color
            } else {
                self.style.fill_color
            };
            canvas.set_draw_color(fill_color);
            canvas.fill_rect(Rect::new(bar_x, bar_y, fill_width, self.style.height))?;
        }

        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(Rect::new(bar_x, bar_y, self.style.width, self.style.height))?;

        Ok(())
    }
}

impl Default for HealthBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_hides_full_bars() {
        let style = HealthBarStyle::default();
        assert!(!style.show_when_full);
        assert_eq!(style.width, 40);
    }

    #[test]
    fn custom_style_is_kept() {
        let bar = HealthBar::with_style(HealthBarStyle {
            width: 80,
            show_when_full: true,
            ..Default::default()
        });
        assert_eq!(bar.style().width, 80);
        assert!(bar.style().show_when_full);
    }
}
