//! World-space HUD components.
//!
//! These render at entity positions inside the scene (as opposed to the
//! screen-space overlays in `gui`). They are stateless: one instance is
//! created up front and reused for every entity that needs it.

pub mod health_bar;

pub use health_bar::{HealthBar, HealthBarStyle};
