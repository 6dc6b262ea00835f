//! Small positional tween helper.
//!
//! Covers the three motion effects in the game: the bounce-back nudge after a
//! landed hit (yoyo), the scatter of freshly mined crystal copies (bounce
//! ease), and the pickup pull of a collected crystal toward the player
//! (quadratic ease-out). Tweens are advanced with delta time and read back as
//! integer positions.

/// Easing curves, mapping progress `t` in 0..=1 to an eased fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Decelerating quadratic, fast start then settle.
    QuadOut,
    /// Settles with two diminishing bounces at the end.
    BounceOut,
}

impl Ease {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::BounceOut => {
                // Standard piecewise bounce-out (Robert Penner's constants).
                let n1 = 7.5625;
                let d1 = 2.75;
                if t < 1.0 / d1 {
                    n1 * t * t
                } else if t < 2.0 / d1 {
                    let t = t - 1.5 / d1;
                    n1 * t * t + 0.75
                } else if t < 2.5 / d1 {
                    let t = t - 2.25 / d1;
                    n1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / d1;
                    n1 * t * t + 0.984375
                }
            }
        }
    }
}

/// A fixed-duration move from one point to another.
///
/// With `yoyo` set, the tween plays out and back in `2 * duration`, ending at
/// its start point; used for the bounce-back nudge.
#[derive(Debug, Clone)]
pub struct Tween {
    from: (f32, f32),
    to: (f32, f32),
    duration: f32,
    elapsed: f32,
    ease: Ease,
    yoyo: bool,
}

impl Tween {
    pub fn new(from: (i32, i32), to: (i32, i32), duration_secs: f32, ease: Ease) -> Self {
        Tween {
            from: (from.0 as f32, from.1 as f32),
            to: (to.0 as f32, to.1 as f32),
            duration: duration_secs.max(f32::EPSILON),
            elapsed: 0.0,
            ease,
            yoyo: false,
        }
    }

    /// Out-and-back variant; total play time is twice the duration.
    pub fn yoyo(from: (i32, i32), to: (i32, i32), duration_secs: f32, ease: Ease) -> Self {
        let mut tween = Tween::new(from, to, duration_secs, ease);
        tween.yoyo = true;
        tween
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        let total = if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        };
        self.elapsed >= total
    }

    /// Current interpolated position, rounded to pixels.
    pub fn position(&self) -> (i32, i32) {
        let t = if self.yoyo {
            let phase = (self.elapsed / self.duration).clamp(0.0, 2.0);
            if phase <= 1.0 {
                phase
            } else {
                2.0 - phase
            }
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };

        let eased = self.ease.apply(t);
        let x = self.from.0 + (self.to.0 - self.from.0) * eased;
        let y = self.from.1 + (self.to.1 - self.from.1) * eased;
        (x.round() as i32, y.round() as i32)
    }

    pub fn target(&self) -> (i32, i32) {
        (self.to.0.round() as i32, self.to.1.round() as i32)
    }
}

/// Endpoint of a 10 px nudge pushing `target` directly away from `source`.
///
/// Overlapping centers nudge southward so the effect is never silently lost.
pub fn bounce_away(target: (i32, i32), source: (i32, i32), distance: f32) -> (i32, i32) {
    let dx = (target.0 - source.0) as f32;
    let dy = (target.1 - source.1) as f32;
    let len = (dx * dx + dy * dy).sqrt();

    let (nx, ny) = if len == 0.0 {
        (0.0, 1.0)
    } else {
        (dx / len, dy / len)
    };

    (
        target.0 + (nx * distance).round() as i32,
        target.1 + (ny * distance).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_tween_reaches_target() {
        let mut tween = Tween::new((0, 0), (100, 50), 1.0, Ease::Linear);
        tween.advance(0.5);
        assert_eq!(tween.position(), (50, 25));
        tween.advance(0.5);
        assert!(tween.is_finished());
        assert_eq!(tween.position(), (100, 50));
    }

    #[test]
    fn overshooting_clamps_to_target() {
        let mut tween = Tween::new((0, 0), (40, 0), 0.2, Ease::QuadOut);
        tween.advance(10.0);
        assert_eq!(tween.position(), (40, 0));
    }

    #[test]
    fn quad_out_front_loads_motion() {
        assert!(Ease::QuadOut.apply(0.5) > 0.5);
        assert_eq!(Ease::QuadOut.apply(1.0), 1.0);
    }

    #[test]
    fn bounce_out_ends_settled() {
        assert!((Ease::BounceOut.apply(1.0) - 1.0).abs() < 1e-4);
        // Monotone on the first segment.
        assert!(Ease::BounceOut.apply(0.2) < Ease::BounceOut.apply(0.3));
    }

    #[test]
    fn yoyo_returns_to_start() {
        let mut tween = Tween::yoyo((100, 100), (110, 100), 0.05, Ease::QuadOut);
        tween.advance(0.05);
        assert_eq!(tween.position(), (110, 100));
        tween.advance(0.05);
        assert!(tween.is_finished());
        assert_eq!(tween.position(), (100, 100));
    }

    #[test]
    fn bounce_away_points_from_source() {
        let nudged = bounce_away((100, 100), (60, 100), 10.0);
        assert_eq!(nudged, (110, 100));

        let nudged = bounce_away((100, 100), (100, 140), 10.0);
        assert_eq!(nudged, (100, 90));
    }

    #[test]
    fn bounce_away_handles_coincident_centers() {
        let nudged = bounce_away((50, 50), (50, 50), 10.0);
        assert_eq!(nudged, (50, 60));
    }
}
