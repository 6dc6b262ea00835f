//! Depth-sorted rendering (painter's algorithm).
//!
//! Entities are gathered with their ground anchor Y, sorted ascending, and
//! drawn back to front so the player walks "behind" crystals lower on the
//! screen and in front of those above.

use crate::bug::Bug;
use crate::collision::Collidable;
use crate::crystal::Crystal;
use crate::player::Player;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Entities that take part in depth-sorted rendering.
pub trait DepthSortable {
    /// Y coordinate of the entity's ground anchor (bottom of the sprite).
    fn depth_y(&self) -> i32;

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String>;
}

impl<'a> DepthSortable for Player<'a> {
    fn depth_y(&self) -> i32 {
        let (_, y) = self.position();
        y + self.height as i32
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        Player::render(self, canvas)
    }
}

impl<'a> DepthSortable for Bug<'a> {
    fn depth_y(&self) -> i32 {
        self.bounds().bottom()
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        Bug::render(self, canvas)
    }
}

impl<'a> DepthSortable for Crystal<'a> {
    fn depth_y(&self) -> i32 {
        self.bounds().bottom()
    }

    fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        Crystal::render(self, canvas)
    }
}

/// Draws the whole scene in depth order.
pub fn render_scene(
    canvas: &mut Canvas<Window>,
    player: &Player,
    bugs: &[Bug],
    crystals: &[Crystal],
) -> Result<(), String> {
    let mut layers: Vec<(i32, &dyn DepthSortable)> =
        Vec::with_capacity(1 + bugs.len() + crystals.len());

    layers.push((player.depth_y(), player));
    for bug in bugs {
        layers.push((bug.depth_y(), bug));
    }
    for crystal in crystals {
        layers.push((crystal.depth_y(), crystal));
    }

    // Stable sort keeps insertion order for entities on the same scanline.
    layers.sort_by_key(|(y, _)| *y);

    for (_, entity) in layers {
        entity.render(canvas)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_sort_back_to_front() {
        let player = Player::new(100, 100, 38, 55); // bottom at 155
        let bug = Bug::new(300, 60); // centered, bottom at 96
        let crystal = Crystal::new(500, 400, crate::crystal::CrystalColor::Blue, None);

        let mut depths = vec![
            (player.depth_y(), "player"),
            (bug.depth_y(), "bug"),
            (crystal.depth_y(), "crystal"),
        ];
        depths.sort_by_key(|(y, _)| *y);

        assert_eq!(depths[0].1, "bug");
        assert_eq!(depths[1].1, "player");
        assert_eq!(depths[2].1, "crystal");
    }
}
