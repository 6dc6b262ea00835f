//! Screen-space overlays: the title menu and the game-over screen.
//!
//! These draw at fixed screen positions on top of the scene, using the
//! procedural bitmap text from `text`. Scene switching itself lives in the
//! main loop's state machine; these components only present.

pub mod game_over;
pub mod main_menu;

pub use game_over::GameOverScreen;
pub use main_menu::MainMenuScreen;
