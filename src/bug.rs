use crate::animation::{AnimationController, Direction};
use crate::collision::{aabb_intersect, inflate, Collidable};
use crate::combat::{facing_allows_hit, CadenceTimer, DamageOutcome, Health};
use crate::tween::{bounce_away, Ease, Tween};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Source frame size on the bug sheet.
pub const BUG_FRAME: u32 = 36;
const BUG_SCALE: u32 = 2;

const BUG_SPEED: f32 = 100.0;
/// Pursuit stops inside this center distance so the bug doesn't climb onto
/// the player.
const STANDOFF: f32 = 50.0;
/// Padding around both bounding boxes for attack-range checks.
const ATTACK_PAD: i32 = 12;
const ATTACK_INTERVAL: f32 = 1.0;
const FACING_TOLERANCE: i32 = 48;
/// Seconds from death to removal, spent fading out.
const DEATH_FADE: f32 = 1.0;

const BOUNCE_DISTANCE: f32 = 10.0;
const BOUNCE_DURATION: f32 = 0.05;

/// A landed bug attack, handed back to the caller to apply to the player.
#[derive(Debug, Clone, Copy)]
pub struct BugStrike {
    pub damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BugLife {
    Alive,
    Dying { elapsed: f32 },
}

/// A hostile bug: pursues the player, swings on a 1-second cadence while its
/// padded bounding box overlaps the player's, fades out on death.
pub struct Bug<'a> {
    x: f32,
    y: f32,
    pub direction: Direction,
    pub health: Health,
    pub attack: i32,
    life: BugLife,
    cadence: CadenceTimer,
    bounce: Option<Tween>,
    animation_controller: AnimationController<'a>,
}

impl<'a> Bug<'a> {
    pub fn new(x: i32, y: i32) -> Self {
        Bug {
            x: x as f32,
            y: y as f32,
            direction: Direction::South,
            health: Health::new(30),
            attack: 5,
            life: BugLife::Alive,
            cadence: CadenceTimer::new(ATTACK_INTERVAL),
            bounce: None,
            animation_controller: AnimationController::new(),
        }
    }

    pub fn set_animation_controller(&mut self, controller: AnimationController<'a>) {
        self.animation_controller = controller;
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn is_alive(&self) -> bool {
        self.life == BugLife::Alive
    }

    /// True once the death fade has run its course and the bug can be
    /// dropped from the scene.
    pub fn is_gone(&self) -> bool {
        matches!(self.life, BugLife::Dying { elapsed } if elapsed >= DEATH_FADE)
    }

    /// One frame of bug behavior. Returns a strike when the attack cadence
    /// fires and the facing check lets the hit land.
    pub fn update(
        &mut self,
        dt: f32,
        player_center: (i32, i32),
        player_bounds: &Rect,
    ) -> Option<BugStrike> {
        if let BugLife::Dying { elapsed } = &mut self.life {
            *elapsed += dt;
            self.animation_controller.update(dt);
            return None;
        }

        if let Some(bounce) = &mut self.bounce {
            bounce.advance(dt);
            let (x, y) = bounce.position();
            self.x = x as f32;
            self.y = y as f32;
            if bounce.is_finished() {
                self.bounce = None;
            }
            self.animation_controller.update(dt);
            return None;
        }

        let dx = player_center.0 as f32 - self.x;
        let dy = player_center.1 as f32 - self.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance > STANDOFF {
            let step = BUG_SPEED * dt;
            self.x += dx / distance * step;
            self.y += dy / distance * step;
            if let Some(direction) = Direction::from_heading(dx, dy) {
                self.direction = direction;
            }
            self.animation_controller.set_state("walk");
        } else {
            self.animation_controller.set_state("idle");
        }

        // Attack cadence runs on padded boxes and re-validates contact every
        // tick; leaving the padded overlap cancels it.
        let in_contact = aabb_intersect(&inflate(&self.bounds(), ATTACK_PAD), player_bounds);
        let strike_due = self.cadence.tick(in_contact, dt);

        self.animation_controller.update(dt);

        if strike_due
            && facing_allows_hit(
                self.direction,
                self.center(),
                player_center,
                FACING_TOLERANCE,
            )
        {
            Some(BugStrike {
                damage: self.attack,
            })
        } else {
            None
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome {
                dealt: 0,
                fatal: false,
            };
        }
        let outcome = self.health.damage(amount);
        if outcome.fatal {
            self.life = BugLife::Dying { elapsed: 0.0 };
        }
        outcome
    }

    pub fn start_bounce(&mut self, source: (i32, i32)) {
        if !self.is_alive() {
            return;
        }
        let from = self.center();
        let to = bounce_away(from, source, BOUNCE_DISTANCE);
        self.bounce = Some(Tween::yoyo(from, to, BOUNCE_DURATION, Ease::QuadOut));
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        // Death fade: flicker out rather than alpha-mod the shared texture.
        if let BugLife::Dying { elapsed } = self.life {
            if (elapsed * 10.0) as i32 % 2 == 1 {
                return Ok(());
            }
        }

        let size = BUG_FRAME * BUG_SCALE;
        let (cx, cy) = self.center();
        let dest_rect = Rect::new(cx - size as i32 / 2, cy - size as i32 / 2, size, size);

        if let Some(sheet) = self.animation_controller.current_sprite_sheet() {
            sheet.render_directional(canvas, dest_rect, self.direction)
        } else {
            canvas.set_draw_color(sdl2::pixels::Color::RGB(160, 40, 160));
            canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
        }
    }
}

impl<'a> Collidable for Bug<'a> {
    fn bounds(&self) -> Rect {
        let size = BUG_FRAME * BUG_SCALE;
        let (cx, cy) = self.center();
        Rect::new(cx - size as i32 / 2, cy - size as i32 / 2, size, size)
    }
}
