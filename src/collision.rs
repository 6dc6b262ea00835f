//! AABB collision detection.
//!
//! Everything here is a pure function over `sdl2::rect::Rect`, shared by the
//! solid-crystal collision response, the attack hitbox tests, the crystal
//! pickup overlap, and the bug attack cadence (which works on padded boxes).

use sdl2::rect::Rect;

/// Implemented by entities that occupy space in the scene.
///
/// The returned rect must match the entity's on-screen footprint, scale
/// included, so that what the player sees is what collides.
pub trait Collidable {
    fn bounds(&self) -> Rect;
}

/// Axis-aligned bounding box intersection. Touching edges do not count as an
/// intersection.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();
    x_overlap && y_overlap
}

/// Per-axis penetration depth of two intersecting rects.
///
/// Signs encode which way `a` should move to separate: positive means `a`
/// sits left/above `b` and should be pushed further left/up. Values are
/// meaningless when the rects do not intersect.
pub fn penetration(a: &Rect, b: &Rect) -> (i32, i32) {
    let a_right = a.x() + a.width() as i32;
    let b_right = b.x() + b.width() as i32;
    let a_bottom = a.y() + a.height() as i32;
    let b_bottom = b.y() + b.height() as i32;

    let depth_x = if a.x() <= b.x() {
        a_right - b.x()
    } else {
        a.x() - b_right
    };

    let depth_y = if a.y() <= b.y() {
        a_bottom - b.y()
    } else {
        a.y() - b_bottom
    };

    (depth_x, depth_y)
}

/// Grows a rect outward by `pad` pixels on every side.
///
/// The bug attack cadence engages on padded boxes so the bug keeps swinging
/// while brushing against the player instead of flickering on pixel-exact
/// contact.
pub fn inflate(rect: &Rect, pad: i32) -> Rect {
    Rect::new(
        rect.x() - pad,
        rect.y() - pad,
        (rect.width() as i32 + pad * 2).max(1) as u32,
        (rect.height() as i32 + pad * 2).max(1) as u32,
    )
}

/// Indices of every entity in `entities` whose bounds intersect `entity`.
pub fn colliding_indices<T: Collidable>(entity: &impl Collidable, entities: &[T]) -> Vec<usize> {
    let entity_bounds = entity.bounds();
    entities
        .iter()
        .enumerate()
        .filter(|(_, other)| aabb_intersect(&entity_bounds, &other.bounds()))
        .map(|(index, _)| index)
        .collect()
}
