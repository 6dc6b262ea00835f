//! Per-color crystal counters and the HUD readout.

use crate::crystal::CrystalColor;
use crate::text::draw_simple_text;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Running count of banked crystals, one counter per color.
///
/// Idempotence of collection is enforced upstream by the crystal's
/// `collected` flag; the tally itself just counts what it is handed.
#[derive(Debug, Clone, Default)]
pub struct CrystalTally {
    counts: [u32; 3],
}

impl CrystalTally {
    pub fn new() -> Self {
        CrystalTally::default()
    }

    fn slot(color: CrystalColor) -> usize {
        match color {
            CrystalColor::Blue => 0,
            CrystalColor::Green => 1,
            CrystalColor::Orange => 2,
        }
    }

    pub fn record(&mut self, color: CrystalColor) {
        self.counts[Self::slot(color)] += 1;
    }

    pub fn count(&self, color: CrystalColor) -> u32 {
        self.counts[Self::slot(color)]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Draws the three counters as a column anchored at `(x, y)`, each line
    /// tinted with its crystal color.
    pub fn render(&self, canvas: &mut Canvas<Window>, x: i32, y: i32) -> Result<(), String> {
        for (i, color) in CrystalColor::ALL.iter().enumerate() {
            let line = format!("{}: {}", color.label(), self.count(*color));
            draw_simple_text(canvas, &line, x, y + i as i32 * 24, color.tint(), 2)?;
        }
        Ok(())
    }
}
