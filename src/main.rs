use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Texture;

mod animation;
mod bug;
mod collision;
mod combat;
mod crystal;
mod gui;
mod placement;
mod player;
mod render;
mod sprite;
mod tally;
mod text;
mod tween;
mod ui;

use animation::AnimationConfig;
use bug::Bug;
use collision::{aabb_intersect, colliding_indices, inflate, penetration, Collidable};
use crystal::{Crystal, CrystalColor, CrystalState, MineOutcome};
use gui::{GameOverScreen, MainMenuScreen};
use player::Player;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use render::render_scene;
use tally::CrystalTally;
use ui::{HealthBar, HealthBarStyle};

const GAME_WIDTH: u32 = 1024;
const GAME_HEIGHT: u32 = 768;
const SCREEN: (u32, u32) = (GAME_WIDTH, GAME_HEIGHT);

const PLAYER_WIDTH: u32 = 38;
const PLAYER_HEIGHT: u32 = 55;

const CRYSTAL_SIZE: u32 = crystal::CRYSTAL_FRAME * crystal::CRYSTAL_SCALE;
/// Clearance around the player spawn that seeding must leave empty.
const SPAWN_CLEARANCE: i32 = 100;

/// Pause between banking the last crystal and the game-over screen, so the
/// final pickup is visible before the overlay drops.
const ENDING_DELAY: f32 = 0.6;

// Fixed timestep; the loop sleeps to ~60 FPS.
const DT: f32 = 1.0 / 60.0;

const BUG_SPAWNS: [(i32, i32); 3] = [
    (120, 120),
    (GAME_WIDTH as i32 - 120, 120),
    (GAME_WIDTH as i32 / 2, GAME_HEIGHT as i32 - 120),
];

/// One explicit state per screen the game can be on. All transitions happen
/// in the main loop, so there is a single place to read the flow.
enum Scene {
    Menu,
    Playing,
    /// Last crystal banked; hold the scene briefly before game over.
    Ending {
        elapsed: f32,
    },
    GameOver(GameOverScreen),
}

fn load_texture_optional<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Option<Texture<'a>> {
    match texture_creator.load_texture(path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            // Missing art is survivable: entities fall back to tinted rects.
            eprintln!("Warning: could not load {}: {}", path, e);
            None
        }
    }
}

fn spawn_bug<'a>(
    x: i32,
    y: i32,
    bug_config: &AnimationConfig,
    bug_texture: Option<&'a Texture<'a>>,
) -> Result<Bug<'a>, String> {
    let mut bug = Bug::new(x, y);
    if let Some(texture) = bug_texture {
        bug.set_animation_controller(bug_config.create_controller(texture, &["idle", "walk"])?);
    }
    Ok(bug)
}

/// Builds a fresh run: player at center, bugs at their fixed spawns, and a
/// random crystal field seeded away from the player.
fn new_session<'a>(
    rng: &mut StdRng,
    player_config: &AnimationConfig,
    bug_config: &AnimationConfig,
    player_texture: Option<&'a Texture<'a>>,
    bug_texture: Option<&'a Texture<'a>>,
    crystal_texture: Option<&'a Texture<'a>>,
) -> Result<(Player<'a>, Vec<Bug<'a>>, Vec<Crystal<'a>>, CrystalTally), String> {
    let mut player = Player::new(
        (GAME_WIDTH - PLAYER_WIDTH) as i32 / 2,
        (GAME_HEIGHT - PLAYER_HEIGHT) as i32 / 2,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    );
    if let Some(texture) = player_texture {
        player
            .set_animation_controller(player_config.create_controller(texture, &["idle", "walk"])?);
    }

    let mut bugs = Vec::with_capacity(BUG_SPAWNS.len());
    for (x, y) in BUG_SPAWNS {
        bugs.push(spawn_bug(x, y, bug_config, bug_texture)?);
    }

    let crystal_count = rng.gen_range(4..=10);
    let keep_out = vec![inflate(&player.bounds(), SPAWN_CLEARANCE)];
    let mut occupied: Vec<Rect> = Vec::new();
    let mut crystals = Vec::with_capacity(crystal_count);

    for _ in 0..crystal_count {
        let color = CrystalColor::ALL[rng.gen_range(0..CrystalColor::ALL.len())];
        match placement::seed_position(rng, CRYSTAL_SIZE, SCREEN, &keep_out, &occupied) {
            Some(center) => {
                occupied.push(placement::footprint(center, CRYSTAL_SIZE));
                crystals.push(Crystal::new(center.0, center.1, color, crystal_texture));
            }
            None => {
                eprintln!("Warning: ran out of room while seeding crystals");
                break;
            }
        }
    }

    println!(
        "New run: {} crystals, {} bugs",
        crystals.len(),
        bugs.len()
    );

    Ok((player, bugs, crystals, CrystalTally::new()))
}

/// Resolves the player's swing: mines the first ore rock in reach, otherwise
/// hits every bug the swing box touches. Mining the rock open also scatters
/// its duplicate copies.
fn resolve_swing<'a>(
    player: &mut Player<'a>,
    bugs: &mut [Bug<'a>],
    crystals: &mut Vec<Crystal<'a>>,
    crystal_texture: Option<&'a Texture<'a>>,
    rng: &mut StdRng,
) {
    if !player.try_swing() {
        return;
    }
    let hitbox = player.swing_hitbox();

    let target = crystals
        .iter()
        .position(|c| c.is_solid() && aabb_intersect(&hitbox, &c.bounds()));

    if let Some(index) = target {
        let parent_center = (crystals[index].x, crystals[index].y);
        // Recoil off the rock face.
        player.start_bounce(parent_center);

        if crystals[index].mine() == MineOutcome::BecameRaw {
            println!("Crystal broke open!");
        }

        // The first pick hit on a rock scatters its duplicates; the lifetime
        // cap makes later hits no-ops here. Resting footprints accumulate so
        // the copies avoid each other, not just the crystals already placed.
        let color = crystals[index].color;
        let mut occupied: Vec<Rect> = crystals.iter().map(|c| c.bounds()).collect();
        while crystals[index].can_spawn_more_copies() {
            let rest = placement::scatter_position(
                rng,
                parent_center,
                crystal::SCATTER_RADIUS,
                CRYSTAL_SIZE,
                SCREEN,
                &occupied,
            );
            occupied.push(placement::footprint(rest, CRYSTAL_SIZE));
            crystals[index].record_spawned_copy();
            crystals.push(Crystal::spawned_copy(
                parent_center,
                rest,
                color,
                crystal_texture,
            ));
        }
        return;
    }

    let player_center = player.center();
    for bug in bugs.iter_mut() {
        if bug.is_alive() && aabb_intersect(&hitbox, &bug.bounds()) {
            let bug_center = bug.center();
            if bug.take_damage(player.attack_damage).fatal {
                println!("Bug squashed!");
            }
            // Both sides take the nudge.
            bug.start_bounce(player_center);
            player.start_bounce(bug_center);
        }
    }
}

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window("Crystal Caverns", GAME_WIDTH, GAME_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let player_config = AnimationConfig::load_from_file("assets/config/player_animations.json")
        .map_err(|e| format!("Failed to load player animation config: {}", e))?;
    let bug_config = AnimationConfig::load_from_file("assets/config/bug_animations.json")
        .map_err(|e| format!("Failed to load bug animation config: {}", e))?;

    let player_texture = load_texture_optional(&texture_creator, "assets/sprites/dwarf.png");
    let bug_texture = load_texture_optional(&texture_creator, "assets/sprites/bug.png");
    let crystal_texture = load_texture_optional(&texture_creator, "assets/sprites/crystals.png");

    let mut rng = StdRng::from_entropy();

    let (mut player, mut bugs, mut crystals, mut tally) = new_session(
        &mut rng,
        &player_config,
        &bug_config,
        player_texture.as_ref(),
        bug_texture.as_ref(),
        crystal_texture.as_ref(),
    )?;

    let mut scene = Scene::Menu;
    let mut menu = MainMenuScreen::new();
    let mut show_collision_boxes = false;

    let player_health_bar = HealthBar::new();
    let bug_health_bar = HealthBar::with_style(HealthBarStyle {
        fill_color: Color::RGB(150, 0, 150),
        ..Default::default()
    });

    println!("Controls:");
    println!("Arrow Keys - Move");
    println!("Space - Mine crystal / attack bug");
    println!("Right Click - Spawn extra bug");
    println!("B - Toggle collision boxes");
    println!("ESC - Quit");

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown { .. } if matches!(scene, Scene::Menu) => {
                    scene = Scene::Playing;
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } if matches!(scene, Scene::Playing) => {
                    resolve_swing(
                        &mut player,
                        &mut bugs,
                        &mut crystals,
                        crystal_texture.as_ref(),
                        &mut rng,
                    );
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } if matches!(scene, Scene::GameOver(_)) => {
                    let session = new_session(
                        &mut rng,
                        &player_config,
                        &bug_config,
                        player_texture.as_ref(),
                        bug_texture.as_ref(),
                        crystal_texture.as_ref(),
                    )?;
                    player = session.0;
                    bugs = session.1;
                    crystals = session.2;
                    tally = session.3;
                    scene = Scene::Playing;
                }
                Event::KeyDown {
                    keycode: Some(Keycode::B),
                    ..
                } => {
                    show_collision_boxes = !show_collision_boxes;
                }
                Event::MouseButtonDown {
                    mouse_btn: sdl2::mouse::MouseButton::Right,
                    x,
                    y,
                    ..
                } if matches!(scene, Scene::Playing) => {
                    bugs.push(spawn_bug(x, y, &bug_config, bug_texture.as_ref())?);
                }
                _ => {}
            }
        }

        match &mut scene {
            Scene::Menu => {
                menu.update(DT);
            }
            Scene::Playing => {
                let keyboard_state = event_pump.keyboard_state();
                player.update(&keyboard_state, DT, SCREEN);

                // Solid ore rocks block movement; push out along the shallow
                // axis so sliding along a rock face feels smooth.
                for index in colliding_indices(&player, &crystals) {
                    if !crystals[index].is_solid() {
                        continue;
                    }
                    let (dx, dy) = penetration(&player.bounds(), &crystals[index].bounds());
                    if dx.abs() < dy.abs() {
                        player.push_out(-dx, 0);
                    } else {
                        player.push_out(0, -dy);
                    }
                }

                let player_center = player.center();
                let player_bounds = player.bounds();
                let mut player_died = false;
                for bug in &mut bugs {
                    if let Some(strike) = bug.update(DT, player_center, &player_bounds) {
                        let outcome = player.take_damage(strike.damage);
                        player.start_bounce(bug.center());
                        bug.start_bounce(player_center);
                        if outcome.fatal {
                            player_died = true;
                        }
                    }
                }
                bugs.retain(|bug| !bug.is_gone());

                for crystal in &mut crystals {
                    crystal.update(DT);
                }

                // Walking over loose ore picks it up; begin_collection is
                // idempotent so repeat overlaps are harmless.
                for index in colliding_indices(&player, &crystals) {
                    crystals[index].begin_collection(player_center);
                }

                for crystal in &mut crystals {
                    if crystal.ready_to_bank() && crystal.cast() {
                        tally.record(crystal.color);
                    }
                }
                crystals.retain(|c| c.state() != CrystalState::CastBar);

                if player_died {
                    println!("The bugs got you. Final haul: {}", tally.total());
                    scene = Scene::GameOver(GameOverScreen::new(false));
                } else if crystals.is_empty() {
                    scene = Scene::Ending { elapsed: 0.0 };
                }
            }
            Scene::Ending { elapsed } => {
                *elapsed += DT;
                if *elapsed >= ENDING_DELAY {
                    println!("All crystals collected! Final haul: {}", tally.total());
                    scene = Scene::GameOver(GameOverScreen::new(true));
                }
            }
            Scene::GameOver(_) => {}
        }

        canvas.set_draw_color(Color::RGB(30, 26, 36));
        canvas.clear();

        match &scene {
            Scene::Menu => {
                menu.render(&mut canvas)?;
            }
            Scene::Playing | Scene::Ending { .. } | Scene::GameOver(_) => {
                render_scene(&mut canvas, &player, &bugs, &crystals)?;

                if !player.is_dead() {
                    let bounds = player.bounds();
                    player_health_bar.render(
                        &mut canvas,
                        bounds.x(),
                        bounds.y(),
                        bounds.width(),
                        player.health.fraction(),
                    )?;
                }
                for bug in &bugs {
                    if bug.is_alive() {
                        let bounds = bug.bounds();
                        bug_health_bar.render(
                            &mut canvas,
                            bounds.x(),
                            bounds.y(),
                            bounds.width(),
                            bug.health.fraction(),
                        )?;
                    }
                }

                tally.render(&mut canvas, GAME_WIDTH as i32 - 170, 20)?;

                if show_collision_boxes {
                    canvas.set_draw_color(Color::RGB(255, 0, 0));
                    canvas.draw_rect(player.bounds())?;
                    for bug in &bugs {
                        canvas.draw_rect(bug.bounds())?;
                    }
                    canvas.set_draw_color(Color::RGB(255, 255, 0));
                    for crystal in &crystals {
                        canvas.draw_rect(crystal.bounds())?;
                    }
                }

                if let Scene::GameOver(screen) = &scene {
                    screen.render(&mut canvas, &tally)?;
                }
            }
        }

        canvas.present();
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
