use crate::animation::{AnimationMode, Direction};
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;
use std::time::Duration;

/// A single animation frame: where it lives on the sheet and how long it holds.
#[derive(Debug, Clone)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub duration: Duration,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: u32, height: u32, duration_ms: u64) -> Self {
        Frame {
            x,
            y,
            width,
            height,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// An animated strip of frames on a shared texture.
///
/// Frame advancement is driven by delta time (`update(dt)`), which keeps the
/// animation system deterministic and testable without a wall clock.
/// Directional sprites stack one row per facing in the sheet; the row is
/// selected at render time from the entity's current `Direction`.
pub struct SpriteSheet<'a> {
    texture: &'a Texture<'a>,
    frames: Vec<Frame>,
    current_frame: usize,
    frame_elapsed: f32,
    is_playing: bool,
    mode: AnimationMode,
}

impl<'a> SpriteSheet<'a> {
    pub fn new(texture: &'a Texture<'a>, frames: Vec<Frame>) -> Self {
        SpriteSheet {
            texture,
            frames,
            current_frame: 0,
            frame_elapsed: 0.0,
            is_playing: true,
            mode: AnimationMode::Loop,
        }
    }

    pub fn set_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
    }

    /// Rewinds to the first frame and starts playing.
    pub fn restart(&mut self) {
        self.current_frame = 0;
        self.frame_elapsed = 0.0;
        self.is_playing = true;
    }

    /// Advances the animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.is_playing || self.frames.is_empty() {
            return;
        }

        self.frame_elapsed += dt;
        let hold = self.frames[self.current_frame].duration.as_secs_f32();

        if self.frame_elapsed >= hold {
            self.frame_elapsed -= hold;
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
            return;
        }

        match self.mode {
            AnimationMode::Loop => self.current_frame = 0,
            AnimationMode::Once => self.is_playing = false,
        }
    }

    /// True once a one-shot animation has played through its last frame.
    pub fn is_finished(&self) -> bool {
        self.mode == AnimationMode::Once
            && !self.is_playing
            && self.current_frame + 1 == self.frames.len()
    }

    /// Renders the current frame, picking the sheet row that matches
    /// `direction` (row 0 = south, per the facing layout in `Direction`).
    pub fn render_directional(
        &self,
        canvas: &mut Canvas<Window>,
        dest_rect: Rect,
        direction: Direction,
    ) -> Result<(), String> {
        if self.frames.is_empty() {
            return Err("sprite sheet has no frames".to_string());
        }

        let frame = &self.frames[self.current_frame];
        let src_rect = Rect::new(
            frame.x,
            frame.y + direction.sheet_row() * frame.height as i32,
            frame.width,
            frame.height,
        );

        canvas
            .copy(self.texture, Some(src_rect), Some(dest_rect))
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructing a SpriteSheet needs a Texture, which needs a live SDL
    // context, so only the bare frame data is exercised here. Frame stepping
    // itself is covered through AnimationController's config-driven tests.

    #[test]
    fn frame_holds_requested_duration() {
        let frame = Frame::new(0, 0, 32, 32, 100);
        assert_eq!(frame.duration, Duration::from_millis(100));
        assert_eq!(frame.width, 32);
        assert_eq!(frame.height, 32);
    }
}
