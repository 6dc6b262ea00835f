use crate::animation::{AnimationController, Direction};
use crate::collision::Collidable;
use crate::combat::{AttackCooldown, DamageOutcome, Health};
use crate::tween::{bounce_away, Ease, Tween};
use sdl2::keyboard::Scancode;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const PLAYER_SPEED: f32 = 200.0;
const SWING_COOLDOWN: f32 = 0.5;
const SWING_RANGE: i32 = 48;
const BOUNCE_DISTANCE: f32 = 10.0;
const BOUNCE_DURATION: f32 = 0.05;

pub struct Player<'a> {
    x: f32,
    y: f32,
    pub width: u32,
    pub height: u32,
    pub direction: Direction,
    pub health: Health,
    pub attack_damage: i32,
    swing_cooldown: AttackCooldown,
    bounce: Option<Tween>,
    moving: bool,
    animation_controller: AnimationController<'a>,
}

impl<'a> Player<'a> {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Player {
            x: x as f32,
            y: y as f32,
            width,
            height,
            direction: Direction::South,
            health: Health::new(100),
            attack_damage: 12,
            swing_cooldown: AttackCooldown::new(SWING_COOLDOWN),
            bounce: None,
            moving: false,
            animation_controller: AnimationController::new(),
        }
    }

    pub fn set_animation_controller(&mut self, controller: AnimationController<'a>) {
        self.animation_controller = controller;
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn center(&self) -> (i32, i32) {
        let (x, y) = self.position();
        (x + self.width as i32 / 2, y + self.height as i32 / 2)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }

    /// Movement, facing and animation for one frame. Input is ignored while a
    /// bounce-back nudge is playing out (it lasts a tenth of a second).
    pub fn update(
        &mut self,
        keyboard_state: &sdl2::keyboard::KeyboardState,
        dt: f32,
        screen: (u32, u32),
    ) {
        if let Some(bounce) = &mut self.bounce {
            bounce.advance(dt);
            let (x, y) = bounce.position();
            self.x = x as f32;
            self.y = y as f32;
            if bounce.is_finished() {
                self.bounce = None;
            }
        } else if !self.is_dead() {
            // One direction at a time, matching the four walk animations.
            let step = PLAYER_SPEED * dt;
            self.moving = true;
            if keyboard_state.is_scancode_pressed(Scancode::Down) {
                self.y += step;
                self.direction = Direction::South;
            } else if keyboard_state.is_scancode_pressed(Scancode::Left) {
                self.x -= step;
                self.direction = Direction::West;
            } else if keyboard_state.is_scancode_pressed(Scancode::Right) {
                self.x += step;
                self.direction = Direction::East;
            } else if keyboard_state.is_scancode_pressed(Scancode::Up) {
                self.y -= step;
                self.direction = Direction::North;
            } else {
                self.moving = false;
            }
        } else {
            self.moving = false;
        }

        self.keep_in_bounds(screen);
        self.swing_cooldown.tick(dt);

        let state = if self.moving { "walk" } else { "idle" };
        self.animation_controller.set_state(state);
        self.animation_controller.update(dt);
    }

    fn keep_in_bounds(&mut self, screen: (u32, u32)) {
        let max_x = (screen.0 - self.width) as f32;
        let max_y = (screen.1 - self.height) as f32;
        self.x = self.x.clamp(0.0, max_x.max(0.0));
        self.y = self.y.clamp(0.0, max_y.max(0.0));
    }

    /// Nudges the player out of a solid obstacle by the given deltas.
    pub fn push_out(&mut self, dx: i32, dy: i32) {
        self.x += dx as f32;
        self.y += dy as f32;
    }

    /// Attempts to start a swing (mine or attack). False while the 500 ms
    /// cooldown is still running.
    pub fn try_swing(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.swing_cooldown.try_start()
    }

    /// Square hitbox directly in front of the current facing.
    pub fn swing_hitbox(&self) -> Rect {
        let (cx, cy) = self.center();
        let (ox, oy) = self.direction.offset();
        let reach_x = ox * (self.width as i32 / 2 + SWING_RANGE / 2);
        let reach_y = oy * (self.height as i32 / 2 + SWING_RANGE / 2);

        Rect::new(
            cx + reach_x - SWING_RANGE / 2,
            cy + reach_y - SWING_RANGE / 2,
            SWING_RANGE as u32,
            SWING_RANGE as u32,
        )
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        self.health.damage(amount)
    }

    /// Kicks off the post-hit yoyo nudge away from `source`.
    pub fn start_bounce(&mut self, source: (i32, i32)) {
        let from = self.position();
        let source_rel = (
            source.0 - self.width as i32 / 2,
            source.1 - self.height as i32 / 2,
        );
        let to = bounce_away(from, source_rel, BOUNCE_DISTANCE);
        self.bounce = Some(Tween::yoyo(from, to, BOUNCE_DURATION, Ease::QuadOut));
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let (x, y) = self.position();
        let dest_rect = Rect::new(x, y, self.width, self.height);

        if let Some(sheet) = self.animation_controller.current_sprite_sheet() {
            sheet.render_directional(canvas, dest_rect, self.direction)
        } else {
            canvas.set_draw_color(sdl2::pixels::Color::RGB(200, 170, 60));
            canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
        }
    }
}

impl<'a> Collidable for Player<'a> {
    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        Rect::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::aabb_intersect;

    fn player() -> Player<'static> {
        Player::new(100, 100, 38, 55)
    }

    #[test]
    fn swing_hitbox_sits_in_front_of_facing() {
        let mut p = player();
        let center = p.center();

        p.direction = Direction::East;
        let east = p.swing_hitbox();
        assert!(east.x() > center.0 - east.width() as i32);
        assert!(east.x() + (east.width() as i32) / 2 > center.0);

        p.direction = Direction::West;
        let west = p.swing_hitbox();
        assert!(west.x() + (west.width() as i32) / 2 < center.0);

        p.direction = Direction::North;
        let north = p.swing_hitbox();
        assert!(north.y() + (north.height() as i32) / 2 < center.1);

        p.direction = Direction::South;
        let south = p.swing_hitbox();
        assert!(south.y() + (south.height() as i32) / 2 > center.1);
    }

    #[test]
    fn swing_hitbox_reaches_past_the_body() {
        let mut p = player();
        p.direction = Direction::East;
        let body = p.bounds();
        let swing = p.swing_hitbox();
        assert!(swing.x() + swing.width() as i32 > body.x() + body.width() as i32);
        // Still adjacent, not detached.
        assert!(aabb_intersect(&body, &swing) || swing.x() <= body.x() + body.width() as i32);
    }

    #[test]
    fn death_fires_once_and_blocks_swings() {
        let mut p = player();
        assert!(!p.take_damage(30).fatal);
        assert_eq!(p.health.current(), 70);

        assert!(p.take_damage(80).fatal);
        assert!(p.is_dead());
        assert!(!p.take_damage(5).fatal);
        assert!(!p.try_swing());
    }

    #[test]
    fn bounce_moves_away_and_returns() {
        let mut p = player();
        let start = p.position();
        // Hit from the west: nudge east.
        let (cx, cy) = p.center();
        p.start_bounce((cx - 40, cy));

        let bounce = p.bounce.as_mut().unwrap();
        bounce.advance(BOUNCE_DURATION);
        let (mid_x, _) = bounce.position();
        assert!(mid_x > start.0);

        bounce.advance(BOUNCE_DURATION);
        assert!(bounce.is_finished());
        assert_eq!(bounce.position(), start);
    }
}
