//! Combat rules shared by the player and the bugs.
//!
//! Covers the whole hit pipeline: clamped health pools, the directional
//! facing check that gates every melee swing, the player's manual attack
//! cooldown, and the repeating cadence timer autonomous attackers use while
//! they stay in contact with their target.

use crate::animation::Direction;

/// A clamped integer health pool.
///
/// Current health can never leave `[0, max]`, no matter what sequence of
/// `damage` and `set` calls is applied. A fatal hit is reported exactly once;
/// damaging an already-empty pool yields a zero, non-fatal outcome.
///
/// # Example
///
/// ```
/// let mut health = Health::new(100);
/// assert_eq!(health.damage(30).dealt, 30);
/// let fatal = health.damage(80);
/// assert!(fatal.fatal);
/// assert_eq!(health.current(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Health { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Current health as a 0.0..=1.0 fraction, for health bar fills.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, clamping at zero.
    pub fn damage(&mut self, amount: i32) -> DamageOutcome {
        let amount = amount.max(0);
        let before = self.current;
        self.current = (self.current - amount).max(0);

        DamageOutcome {
            dealt: before - self.current,
            fatal: before > 0 && self.current == 0,
        }
    }

    /// Sets health directly, clamped into `[0, max]`.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }
}

/// What a single application of damage did.
#[derive(Debug, Clone, Copy)]
pub struct DamageOutcome {
    /// Damage actually removed (less than requested when the pool ran out).
    pub dealt: i32,
    /// True only for the hit that emptied the pool.
    pub fatal: bool,
}

/// Directional melee gate.
///
/// A swing only lands when the target's center sits on the side the
/// attacker's last movement animation faces, within `lateral_tolerance`
/// pixels on the cross axis. Walking right means the target must be to the
/// right and roughly level; walking up means above and roughly centered.
pub fn facing_allows_hit(
    facing: Direction,
    attacker_center: (i32, i32),
    target_center: (i32, i32),
    lateral_tolerance: i32,
) -> bool {
    let dx = target_center.0 - attacker_center.0;
    let dy = target_center.1 - attacker_center.1;

    match facing {
        Direction::East => dx > 0 && dy.abs() <= lateral_tolerance,
        Direction::West => dx < 0 && dy.abs() <= lateral_tolerance,
        Direction::South => dy > 0 && dx.abs() <= lateral_tolerance,
        Direction::North => dy < 0 && dx.abs() <= lateral_tolerance,
    }
}

/// Cooldown gate for player-initiated swings (space key).
///
/// Delta-time driven so it stays deterministic in tests; the main loop ticks
/// it once per frame.
#[derive(Debug, Clone)]
pub struct AttackCooldown {
    interval: f32,
    remaining: f32,
}

impl AttackCooldown {
    pub fn new(interval_secs: f32) -> Self {
        AttackCooldown {
            interval: interval_secs,
            remaining: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Starts a swing if the cooldown has elapsed. Returns false while still
    /// cooling down.
    pub fn try_start(&mut self) -> bool {
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = self.interval;
        true
    }
}

/// Repeating attack timer for autonomous attackers.
///
/// While the attacker's padded bounding box overlaps the target's, the timer
/// runs and yields one strike per interval. The caller reports the overlap
/// every frame; the moment it breaks, the timer cancels and the next
/// engagement starts a fresh interval. The first strike lands a full interval
/// after engagement, not immediately on contact.
#[derive(Debug, Clone)]
pub struct CadenceTimer {
    interval: f32,
    elapsed: Option<f32>,
}

impl CadenceTimer {
    pub fn new(interval_secs: f32) -> Self {
        CadenceTimer {
            interval: interval_secs,
            elapsed: None,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Advances the timer. Returns true each time a strike is due.
    pub fn tick(&mut self, in_contact: bool, dt: f32) -> bool {
        if !in_contact {
            self.elapsed = None;
            return false;
        }

        let elapsed = self.elapsed.get_or_insert(0.0);
        *elapsed += dt;

        if *elapsed >= self.interval {
            *elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_at_zero() {
        let mut health = Health::new(100);
        health.damage(250);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn set_clamps_both_ends() {
        let mut health = Health::new(100);
        health.set(-40);
        assert_eq!(health.current(), 0);
        health.set(500);
        assert_eq!(health.current(), 100);
        health.set(62);
        assert_eq!(health.current(), 62);
    }

    #[test]
    fn damage_sequence_floors_at_zero() {
        // 100 HP, damage 30 -> 70, damage 80 -> 0 with death exactly once.
        let mut health = Health::new(100);

        let first = health.damage(30);
        assert_eq!(health.current(), 70);
        assert!(!first.fatal);

        let second = health.damage(80);
        assert_eq!(health.current(), 0);
        assert_eq!(second.dealt, 70);
        assert!(second.fatal);

        let third = health.damage(10);
        assert_eq!(third.dealt, 0);
        assert!(!third.fatal, "death must not trigger twice");
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut health = Health::new(50);
        health.damage(-20);
        assert_eq!(health.current(), 50);
    }

    #[test]
    fn facing_east_requires_target_to_the_right() {
        let attacker = (100, 100);
        assert!(facing_allows_hit(Direction::East, attacker, (140, 105), 20));
        assert!(!facing_allows_hit(Direction::East, attacker, (60, 100), 20));
        // Too far off the lateral axis.
        assert!(!facing_allows_hit(Direction::East, attacker, (140, 150), 20));
    }

    #[test]
    fn facing_north_requires_target_above() {
        let attacker = (100, 100);
        assert!(facing_allows_hit(Direction::North, attacker, (95, 40), 20));
        assert!(!facing_allows_hit(Direction::North, attacker, (95, 160), 20));
    }

    #[test]
    fn facing_tolerance_is_inclusive() {
        let attacker = (0, 0);
        assert!(facing_allows_hit(Direction::West, attacker, (-30, 20), 20));
        assert!(!facing_allows_hit(Direction::West, attacker, (-30, 21), 20));
    }

    #[test]
    fn cooldown_blocks_until_interval_elapses() {
        let mut cooldown = AttackCooldown::new(0.5);
        assert!(cooldown.try_start());
        assert!(!cooldown.try_start());

        cooldown.tick(0.3);
        assert!(!cooldown.try_start());

        cooldown.tick(0.2);
        assert!(cooldown.try_start());
    }

    #[test]
    fn cadence_fires_once_per_interval_while_in_contact() {
        let mut cadence = CadenceTimer::new(1.0);
        let dt = 0.1;
        let mut strikes = 0;

        // 2.5 simulated seconds of continuous contact.
        for _ in 0..25 {
            if cadence.tick(true, dt) {
                strikes += 1;
            }
        }
        assert_eq!(strikes, 2);
    }

    #[test]
    fn cadence_cancels_when_contact_breaks() {
        let mut cadence = CadenceTimer::new(1.0);

        for _ in 0..9 {
            assert!(!cadence.tick(true, 0.1));
        }
        assert!(cadence.is_engaged());

        // Target steps away just before the strike lands.
        assert!(!cadence.tick(false, 0.1));
        assert!(!cadence.is_engaged());

        // Re-engagement starts a fresh interval, no credit carried over.
        assert!(!cadence.tick(true, 0.1));
        for _ in 0..8 {
            assert!(!cadence.tick(true, 0.1));
        }
        assert!(cadence.tick(true, 0.1));
    }
}
