//! Ore crystals and their mining state machine.
//!
//! A crystal moves forward through three states and never backward:
//!
//! ```text
//! OreRock --mine x2--> RawOre --cast--> CastBar
//! ```
//!
//! An ore rock is solid (the player collides with it) and takes two pick hits;
//! the first cracks it, the second breaks it into raw ore, which drops the
//! collision and becomes collectable. Casting happens when a collected raw
//! ore is banked into the tally. The first pick hit on a rock also scatters
//! up to [`MAX_COPIES`] duplicate crystals onto a ring around it.

use crate::collision::Collidable;
use crate::placement;
use crate::tween::{Ease, Tween};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Source frame size on the crystal sheet.
pub const CRYSTAL_FRAME: u32 = 30;
/// Rendering scale; the collision footprint matches the scaled sprite.
pub const CRYSTAL_SCALE: u32 = 2;
/// Ring radius for scattered duplicate copies.
pub const SCATTER_RADIUS: f32 = 100.0;
/// Hard cap on duplicates a single crystal may spawn, however often it is
/// mined.
pub const MAX_COPIES: u32 = 2;

const SCATTER_DURATION: f32 = 0.2;
const COLLECT_DURATION: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrystalColor {
    Blue,
    Green,
    Orange,
}

impl CrystalColor {
    pub const ALL: [CrystalColor; 3] = [
        CrystalColor::Blue,
        CrystalColor::Green,
        CrystalColor::Orange,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CrystalColor::Blue => "BLUE",
            CrystalColor::Green => "GREEN",
            CrystalColor::Orange => "ORANGE",
        }
    }

    /// HUD/fallback tint for this color.
    pub fn tint(&self) -> Color {
        match self {
            CrystalColor::Blue => Color::RGB(80, 120, 255),
            CrystalColor::Green => Color::RGB(60, 220, 90),
            CrystalColor::Orange => Color::RGB(255, 165, 0),
        }
    }

    fn sheet_row(&self) -> i32 {
        match self {
            CrystalColor::Blue => 0,
            CrystalColor::Green => 1,
            CrystalColor::Orange => 2,
        }
    }
}

/// Mining progression. Transitions only ever move rightward; there is no API
/// that goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrystalState {
    OreRock,
    RawOre,
    CastBar,
}

/// What a single `mine` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// First hit on an ore rock: cracked, still solid.
    Cracked,
    /// Second hit: broke into raw ore, collision dropped.
    BecameRaw,
    /// The crystal was not an ore rock; nothing happened.
    NoEffect,
}

pub struct Crystal<'a> {
    /// Center position, in screen pixels.
    pub x: i32,
    pub y: i32,
    pub color: CrystalColor,
    state: CrystalState,
    hit_count: u32,
    spawned_copies: u32,
    collected: bool,
    texture: Option<&'a Texture<'a>>,
    motion: Option<Tween>,
}

impl<'a> Crystal<'a> {
    pub fn new(x: i32, y: i32, color: CrystalColor, texture: Option<&'a Texture<'a>>) -> Self {
        Crystal {
            x,
            y,
            color,
            state: CrystalState::OreRock,
            hit_count: 0,
            spawned_copies: 0,
            collected: false,
            texture,
            motion: None,
        }
    }

    /// A duplicate spawned by mining: starts life as raw ore and tweens from
    /// its parent's position to `rest` with a bouncing settle.
    pub fn spawned_copy(
        parent: (i32, i32),
        rest: (i32, i32),
        color: CrystalColor,
        texture: Option<&'a Texture<'a>>,
    ) -> Self {
        let mut crystal = Crystal::new(parent.0, parent.1, color, texture);
        crystal.state = CrystalState::RawOre;
        crystal.motion = Some(Tween::new(parent, rest, SCATTER_DURATION, Ease::BounceOut));
        crystal
    }

    pub fn state(&self) -> CrystalState {
        self.state
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Solid crystals block the player; only unmined rock is solid.
    pub fn is_solid(&self) -> bool {
        self.state == CrystalState::OreRock
    }

    pub fn is_collectable(&self) -> bool {
        self.state != CrystalState::OreRock && !self.collected
    }

    /// Applies one pick hit. Only ore rock reacts; two hits break it.
    pub fn mine(&mut self) -> MineOutcome {
        if self.state != CrystalState::OreRock {
            return MineOutcome::NoEffect;
        }

        self.hit_count += 1;
        if self.hit_count >= 2 {
            self.state = CrystalState::RawOre;
            MineOutcome::BecameRaw
        } else {
            MineOutcome::Cracked
        }
    }

    /// Advances raw ore to its terminal cast-bar state. Returns false (and
    /// does nothing) from any other state.
    pub fn cast(&mut self) -> bool {
        if self.state == CrystalState::RawOre {
            self.state = CrystalState::CastBar;
            true
        } else {
            false
        }
    }

    pub fn can_spawn_more_copies(&self) -> bool {
        self.spawned_copies < MAX_COPIES
    }

    pub fn record_spawned_copy(&mut self) {
        self.spawned_copies += 1;
    }

    /// Marks the crystal collected and starts the pull toward the player.
    /// Idempotent: returns false if already collected or not collectable.
    pub fn begin_collection(&mut self, player_center: (i32, i32)) -> bool {
        if !self.is_collectable() {
            return false;
        }
        self.collected = true;
        self.motion = Some(Tween::new(
            (self.x, self.y),
            player_center,
            COLLECT_DURATION,
            Ease::QuadOut,
        ));
        true
    }

    /// True once a collected crystal has finished its pull and can be banked.
    pub fn ready_to_bank(&self) -> bool {
        self.collected && self.motion.is_none()
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(motion) = &mut self.motion {
            motion.advance(dt);
            let (x, y) = motion.position();
            self.x = x;
            self.y = y;
            if motion.is_finished() {
                let (tx, ty) = motion.target();
                self.x = tx;
                self.y = ty;
                self.motion = None;
            }
        }
    }

    fn sheet_column(&self) -> i32 {
        match self.state {
            CrystalState::OreRock => {
                if self.hit_count > 0 {
                    1
                } else {
                    0
                }
            }
            CrystalState::RawOre => 2,
            CrystalState::CastBar => 3,
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let size = CRYSTAL_FRAME * CRYSTAL_SCALE;
        let dest = Rect::new(
            self.x - size as i32 / 2,
            self.y - size as i32 / 2,
            size,
            size,
        );

        match self.texture {
            Some(texture) => {
                let src = Rect::new(
                    self.sheet_column() * CRYSTAL_FRAME as i32,
                    self.color.sheet_row() * CRYSTAL_FRAME as i32,
                    CRYSTAL_FRAME,
                    CRYSTAL_FRAME,
                );
                canvas
                    .copy(texture, Some(src), Some(dest))
                    .map_err(|e| e.to_string())
            }
            None => {
                canvas.set_draw_color(self.color.tint());
                canvas.fill_rect(dest).map_err(|e| e.to_string())
            }
        }
    }
}

impl<'a> Collidable for Crystal<'a> {
    fn bounds(&self) -> Rect {
        placement::footprint((self.x, self.y), CRYSTAL_FRAME * CRYSTAL_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crystal() -> Crystal<'static> {
        Crystal::new(200, 200, CrystalColor::Blue, None)
    }

    #[test]
    fn two_hits_break_an_ore_rock() {
        let mut c = crystal();
        assert!(c.is_solid());

        assert_eq!(c.mine(), MineOutcome::Cracked);
        assert_eq!(c.state(), CrystalState::OreRock);
        assert!(c.is_solid());

        assert_eq!(c.mine(), MineOutcome::BecameRaw);
        assert_eq!(c.state(), CrystalState::RawOre);
        assert!(!c.is_solid());
        assert!(c.is_collectable());
    }

    #[test]
    fn mining_raw_ore_is_a_no_op() {
        let mut c = crystal();
        c.mine();
        c.mine();
        assert_eq!(c.mine(), MineOutcome::NoEffect);
        assert_eq!(c.state(), CrystalState::RawOre);
    }

    #[test]
    fn state_only_advances_forward() {
        let mut c = crystal();

        // cast() on an unmined rock must not skip ahead.
        assert!(!c.cast());
        assert_eq!(c.state(), CrystalState::OreRock);

        c.mine();
        c.mine();
        assert!(c.cast());
        assert_eq!(c.state(), CrystalState::CastBar);

        // No path leads back; mine and cast are both dead ends now.
        assert_eq!(c.mine(), MineOutcome::NoEffect);
        assert!(!c.cast());
        assert_eq!(c.state(), CrystalState::CastBar);
    }

    #[test]
    fn copy_budget_caps_at_two() {
        let mut c = crystal();
        assert!(c.can_spawn_more_copies());
        c.record_spawned_copy();
        c.record_spawned_copy();
        assert!(!c.can_spawn_more_copies());
    }

    #[test]
    fn collection_is_idempotent() {
        let mut c = crystal();
        c.mine();
        c.mine();

        assert!(c.begin_collection((100, 100)));
        // Second overlap on the same crystal must not double-collect.
        assert!(!c.begin_collection((100, 100)));
        assert!(c.is_collected());
    }

    #[test]
    fn ore_rock_cannot_be_collected() {
        let mut c = crystal();
        assert!(!c.begin_collection((100, 100)));
        assert!(!c.is_collected());
    }

    #[test]
    fn collection_pull_reaches_the_player() {
        let mut c = crystal();
        c.mine();
        c.mine();
        c.begin_collection((100, 100));
        assert!(!c.ready_to_bank());

        for _ in 0..30 {
            c.update(1.0 / 60.0);
        }
        assert!(c.ready_to_bank());
        assert_eq!((c.x, c.y), (100, 100));
    }

    #[test]
    fn spawned_copy_starts_raw_and_settles_at_rest() {
        let mut c = Crystal::spawned_copy((200, 200), (290, 230), CrystalColor::Green, None);
        assert_eq!(c.state(), CrystalState::RawOre);
        assert!(c.is_collectable());

        for _ in 0..30 {
            c.update(1.0 / 60.0);
        }
        assert_eq!((c.x, c.y), (290, 230));
    }

    #[test]
    fn bounds_center_on_position() {
        let c = crystal();
        let bounds = c.bounds();
        assert_eq!(bounds.x(), 200 - 30);
        assert_eq!(bounds.y(), 200 - 30);
        assert_eq!(bounds.width(), 60);
    }
}
