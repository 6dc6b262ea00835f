//! Spawn-position search for crystals.
//!
//! Two variants of the same rejection-sampling idea: seeding the initial
//! crystal field across the whole screen, and scattering freshly mined
//! copies on a ring around their parent. Both are bounded: after a fixed
//! number of random attempts they fall back to a deterministic sweep, so a
//! crowded screen degrades placement quality instead of hanging the frame.

use crate::collision::aabb_intersect;
use rand::Rng;
use sdl2::rect::Rect;

/// Random attempts before the deterministic fallback kicks in.
pub const MAX_ATTEMPTS: usize = 64;

/// Fallback ring sweep granularity, in equal angle steps.
const SWEEP_STEPS: usize = 16;

/// Centered square footprint of a crystal at `center`.
pub fn footprint(center: (i32, i32), size: u32) -> Rect {
    Rect::new(
        center.0 - size as i32 / 2,
        center.1 - size as i32 / 2,
        size,
        size,
    )
}

fn in_bounds(center: (i32, i32), size: u32, screen: (u32, u32)) -> bool {
    let half = size as i32 / 2;
    center.0 >= half
        && center.0 <= screen.0 as i32 - half
        && center.1 >= half
        && center.1 <= screen.1 as i32 - half
}

fn is_clear(center: (i32, i32), size: u32, screen: (u32, u32), occupied: &[Rect]) -> bool {
    if !in_bounds(center, size, screen) {
        return false;
    }
    let candidate = footprint(center, size);
    occupied.iter().all(|r| !aabb_intersect(&candidate, r))
}

fn ring_point(origin: (i32, i32), radius: f32, angle: f32) -> (i32, i32) {
    (
        origin.0 + (radius * angle.cos()).round() as i32,
        origin.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Finds a resting spot for a mined crystal copy on a ring around `origin`.
///
/// Samples random angles at the fixed `radius`, rejecting spots that leave
/// the screen or overlap an existing footprint. After [`MAX_ATTEMPTS`]
/// rejections, sweeps [`SWEEP_STEPS`] evenly spaced angles at the radius,
/// then at half and double radius, and takes the first clear spot. As a last
/// resort the origin itself is clamped into bounds, accepting the overlap.
pub fn scatter_position(
    rng: &mut impl Rng,
    origin: (i32, i32),
    radius: f32,
    size: u32,
    screen: (u32, u32),
    occupied: &[Rect],
) -> (i32, i32) {
    for _ in 0..MAX_ATTEMPTS {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let candidate = ring_point(origin, radius, angle);
        if is_clear(candidate, size, screen, occupied) {
            return candidate;
        }
    }

    for ring in [radius, radius * 0.5, radius * 2.0] {
        for step in 0..SWEEP_STEPS {
            let angle = step as f32 / SWEEP_STEPS as f32 * std::f32::consts::TAU;
            let candidate = ring_point(origin, ring, angle);
            if is_clear(candidate, size, screen, occupied) {
                return candidate;
            }
        }
    }

    clamp_into_bounds(origin, size, screen)
}

/// Picks a position for an initial crystal, uniformly over the screen.
///
/// Rejects positions inside any `keep_out` rect (the padded player spawn
/// area) or overlapping an existing footprint. Falls back to a deterministic
/// grid scan after [`MAX_ATTEMPTS`]; returns `None` only when the screen has
/// no room left at all.
pub fn seed_position(
    rng: &mut impl Rng,
    size: u32,
    screen: (u32, u32),
    keep_out: &[Rect],
    occupied: &[Rect],
) -> Option<(i32, i32)> {
    let half = size as i32 / 2;
    let max_x = screen.0 as i32 - half;
    let max_y = screen.1 as i32 - half;
    if max_x < half || max_y < half {
        return None;
    }

    let blocked = |center: (i32, i32)| {
        keep_out.iter().any(|r| r.contains_point((center.0, center.1)))
            || !is_clear(center, size, screen, occupied)
    };

    for _ in 0..MAX_ATTEMPTS {
        let candidate = (rng.gen_range(half..=max_x), rng.gen_range(half..=max_y));
        if !blocked(candidate) {
            return Some(candidate);
        }
    }

    // Grid scan at footprint pitch, top-left to bottom-right.
    let pitch = size as i32;
    let mut y = half;
    while y <= max_y {
        let mut x = half;
        while x <= max_x {
            if !blocked((x, y)) {
                return Some((x, y));
            }
            x += pitch;
        }
        y += pitch;
    }

    None
}

fn clamp_into_bounds(center: (i32, i32), size: u32, screen: (u32, u32)) -> (i32, i32) {
    let half = size as i32 / 2;
    (
        center.0.clamp(half, (screen.0 as i32 - half).max(half)),
        center.1.clamp(half, (screen.1 as i32 - half).max(half)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCREEN: (u32, u32) = (1024, 768);
    const SIZE: u32 = 30;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn scatter_lands_on_the_ring_when_clear() {
        let origin = (512, 384);
        let spot = scatter_position(&mut rng(), origin, 100.0, SIZE, SCREEN, &[]);

        let dx = (spot.0 - origin.0) as f32;
        let dy = (spot.1 - origin.1) as f32;
        let dist = (dx * dx + dy * dy).sqrt();
        assert!((dist - 100.0).abs() < 2.0, "distance was {}", dist);
    }

    #[test]
    fn scatter_stays_in_bounds_near_the_edge() {
        // Origin in the corner: most of the ring is off-screen.
        let spot = scatter_position(&mut rng(), (10, 10), 100.0, SIZE, SCREEN, &[]);
        assert!(in_bounds(spot, SIZE, SCREEN));
    }

    #[test]
    fn scatter_avoids_occupied_footprints() {
        let origin = (512, 384);
        let occupied: Vec<Rect> = (0..200)
            .map(|i| {
                let angle = i as f32 / 200.0 * std::f32::consts::TAU;
                footprint(ring_point(origin, 100.0, angle), SIZE)
            })
            .collect();

        // Ring fully occupied: fallback must still produce a clear spot
        // (half/double radius sweep) without spinning forever.
        let spot = scatter_position(&mut rng(), origin, 100.0, SIZE, SCREEN, &occupied);
        assert!(in_bounds(spot, SIZE, SCREEN));
        let spot_rect = footprint(spot, SIZE);
        assert!(occupied.iter().all(|r| !aabb_intersect(&spot_rect, r)));
    }

    #[test]
    fn scatter_fallback_is_deterministic() {
        // Everything blocked except what the sweep can find; two different
        // seeds must agree because the fallback ignores the RNG.
        let origin = (512, 384);
        let occupied: Vec<Rect> = (0..400)
            .map(|i| {
                let angle = i as f32 / 400.0 * std::f32::consts::TAU;
                footprint(ring_point(origin, 100.0, angle), SIZE)
            })
            .collect();

        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(999);
        let spot_a = scatter_position(&mut a, origin, 100.0, SIZE, SCREEN, &occupied);
        let spot_b = scatter_position(&mut b, origin, 100.0, SIZE, SCREEN, &occupied);
        assert_eq!(spot_a, spot_b);
    }

    #[test]
    fn two_scatters_do_not_overlap_each_other() {
        // The mining flow: place the first copy, add its footprint, place the
        // second. Both must land in bounds and apart from each other.
        let mut rng = rng();
        let origin = (512, 384);
        let mut occupied = vec![footprint(origin, SIZE)];

        let first = scatter_position(&mut rng, origin, 100.0, SIZE, SCREEN, &occupied);
        occupied.push(footprint(first, SIZE));
        let second = scatter_position(&mut rng, origin, 100.0, SIZE, SCREEN, &occupied);

        assert!(in_bounds(first, SIZE, SCREEN));
        assert!(in_bounds(second, SIZE, SCREEN));
        assert!(!aabb_intersect(
            &footprint(first, SIZE),
            &footprint(second, SIZE)
        ));
    }

    #[test]
    fn seed_respects_keep_out_area() {
        let keep_out = vec![Rect::new(0, 0, 1024, 768 - 40)];
        // Only a strip at the bottom is allowed.
        for _ in 0..20 {
            let spot = seed_position(&mut rng(), SIZE, SCREEN, &keep_out, &[]).unwrap();
            assert!(spot.1 >= 768 - 40);
        }
    }

    #[test]
    fn seed_returns_none_when_screen_is_full() {
        let keep_out = vec![Rect::new(0, 0, 1024, 768)];
        assert!(seed_position(&mut rng(), SIZE, SCREEN, &keep_out, &[]).is_none());
    }

    #[test]
    fn seed_fallback_scan_finds_the_last_gap() {
        // Block everything except one known cell; random attempts will almost
        // surely miss it, the grid scan must not.
        let gap = Rect::new(0, 0, 64, 64);
        let keep_out = vec![
            Rect::new(64, 0, SCREEN.0 - 64, SCREEN.1),
            Rect::new(0, 64, 64, SCREEN.1 - 64),
        ];
        let spot = seed_position(&mut rng(), SIZE, SCREEN, &keep_out, &[]).unwrap();
        assert!(gap.contains_point((spot.0, spot.1)));
    }
}
