use crate::sprite::{Frame, SpriteSheet};
use sdl2::render::Texture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Four-way facing, matching the walk animation rows in the sprite sheets.
///
/// Row layout is fixed across all sheets: south, west, east, north. Facing
/// doubles as the gate for the combat facing check, so it is always the
/// direction of the last-played movement animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    South,
    West,
    East,
    North,
}

impl Direction {
    /// Row index of this facing in a directional sprite sheet.
    pub fn sheet_row(&self) -> i32 {
        match self {
            Direction::South => 0,
            Direction::West => 1,
            Direction::East => 2,
            Direction::North => 3,
        }
    }

    /// Picks a facing from a movement vector, favoring the dominant axis.
    /// Returns `None` for a zero vector so callers keep the previous facing.
    pub fn from_heading(dx: f32, dy: f32) -> Option<Direction> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::East
            } else {
                Direction::West
            })
        } else {
            Some(if dy > 0.0 {
                Direction::South
            } else {
                Direction::North
            })
        }
    }

    /// Unit offset pointing the way this facing looks.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
        }
    }
}

/// How a sprite sheet plays through its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationMode {
    Loop,
    Once,
}

/// Sheet geometry plus the set of named animations it carries.
///
/// Loaded from JSON under `assets/config/`, e.g.:
///
/// ```json
/// {
///   "frame_width": 38,
///   "frame_height": 55,
///   "animations": {
///     "walk": { "frames": [ { "x": 0, "y": 0, "duration_ms": 100 } ], "mode": "Loop" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    pub animations: HashMap<String, AnimationData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationData {
    pub frames: Vec<FrameData>,
    pub mode: AnimationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub x: i32,
    pub y: i32,
    pub duration_ms: u64,
}

impl FrameData {
    fn to_frame(&self, width: u32, height: u32) -> Frame {
        Frame::new(self.x, self.y, width, height, self.duration_ms)
    }
}

impl AnimationConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: AnimationConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Factory: builds a controller with one sprite sheet per requested
    /// animation name, all sharing `texture`.
    ///
    /// Errors if a requested name is missing from the config, which catches
    /// config/code drift at startup instead of mid-game.
    pub fn create_controller<'a>(
        &self,
        texture: &'a Texture<'a>,
        animation_names: &[&str],
    ) -> Result<AnimationController<'a>, String> {
        let mut controller = AnimationController::new();

        for &name in animation_names {
            let data = self
                .animations
                .get(name)
                .ok_or_else(|| format!("animation '{}' not found in config", name))?;

            let frames: Vec<Frame> = data
                .frames
                .iter()
                .map(|f| f.to_frame(self.frame_width, self.frame_height))
                .collect();

            let mut sheet = SpriteSheet::new(texture, frames);
            sheet.set_mode(data.mode);
            controller.add_animation(name, sheet);
        }

        Ok(controller)
    }
}

/// Switches between named sprite sheets as an entity's state changes.
///
/// Setting the same state twice is a no-op; setting a new state restarts the
/// new sheet from frame zero on the next update.
pub struct AnimationController<'a> {
    current_state: String,
    sprite_sheets: HashMap<String, SpriteSheet<'a>>,
    state_changed: bool,
}

impl<'a> AnimationController<'a> {
    pub fn new() -> Self {
        AnimationController {
            current_state: String::new(),
            sprite_sheets: HashMap::new(),
            state_changed: false,
        }
    }

    pub fn add_animation(&mut self, name: &str, sprite_sheet: SpriteSheet<'a>) {
        self.sprite_sheets.insert(name.to_string(), sprite_sheet);
    }

    pub fn set_state(&mut self, new_state: &str) {
        if new_state != self.current_state {
            self.current_state = new_state.to_string();
            self.state_changed = true;
        }
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn update(&mut self, dt: f32) {
        if self.state_changed {
            if let Some(sheet) = self.sprite_sheets.get_mut(&self.current_state) {
                sheet.restart();
            }
            self.state_changed = false;
        }

        if let Some(sheet) = self.sprite_sheets.get_mut(&self.current_state) {
            sheet.update(dt);
        }
    }

    pub fn current_sprite_sheet(&self) -> Option<&SpriteSheet<'a>> {
        self.sprite_sheets.get(&self.current_state)
    }

    pub fn is_animation_finished(&self) -> bool {
        self.sprite_sheets
            .get(&self.current_state)
            .map(|sheet| sheet.is_finished())
            .unwrap_or(false)
    }
}

impl<'a> Default for AnimationController<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_picks_dominant_axis() {
        assert_eq!(Direction::from_heading(5.0, 2.0), Some(Direction::East));
        assert_eq!(Direction::from_heading(-5.0, 2.0), Some(Direction::West));
        assert_eq!(Direction::from_heading(1.0, 4.0), Some(Direction::South));
        assert_eq!(Direction::from_heading(1.0, -4.0), Some(Direction::North));
    }

    #[test]
    fn zero_heading_keeps_previous_facing() {
        assert_eq!(Direction::from_heading(0.0, 0.0), None);
    }

    #[test]
    fn vertical_wins_ties() {
        // Equal magnitudes resolve to the vertical axis, matching the
        // else-branch ordering in from_heading.
        assert_eq!(Direction::from_heading(3.0, 3.0), Some(Direction::South));
    }

    #[test]
    fn sheet_rows_are_distinct() {
        let rows: Vec<i32> = [
            Direction::South,
            Direction::West,
            Direction::East,
            Direction::North,
        ]
        .iter()
        .map(|d| d.sheet_row())
        .collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn config_parses_from_json() {
        let json = r#"{
            "frame_width": 38,
            "frame_height": 55,
            "animations": {
                "walk": {
                    "frames": [
                        { "x": 0, "y": 0, "duration_ms": 100 },
                        { "x": 38, "y": 0, "duration_ms": 100 }
                    ],
                    "mode": "Loop"
                },
                "idle": {
                    "frames": [ { "x": 0, "y": 0, "duration_ms": 200 } ],
                    "mode": "Once"
                }
            }
        }"#;

        let config: AnimationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.frame_width, 38);
        assert_eq!(config.animations["walk"].frames.len(), 2);
        assert_eq!(config.animations["idle"].mode, AnimationMode::Once);
    }

    #[test]
    fn missing_animation_name_is_reported() {
        let json = r#"{ "frame_width": 16, "frame_height": 16, "animations": {} }"#;
        let config: AnimationConfig = serde_json::from_str(json).unwrap();
        assert!(config.animations.get("walk").is_none());
    }
}
