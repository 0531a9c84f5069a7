use crate::error::{Error, Result};
use rand::Rng;

/// Twenty visually distinct pastel fills used to tint sub-topology blocks.
///
/// The ordering matters for [`ColorStrategy::Sequential`]: deterministic callers get the colors
/// in exactly this order.
pub const PASTEL_PALETTE: [&str; 20] = [
    "#77DD77", "#836953", "#89cff0", "#99c5c4", "#9adedb", "#aa9499", "#aaf0d1", "#b2fba5",
    "#b39eb5", "#bdb0d0", "#bee7a5", "#befd73", "#c1c6fc", "#c6a4a4", "#cb99c9", "#ff6961",
    "#ff694f", "#ff9899", "#ffb7ce", "#ca9bf7",
];

/// How [`ColorPicker::pick`] chooses among the colors still available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorStrategy {
    /// Uniformly random choice among the remaining palette entries.
    #[default]
    Random,
    /// First remaining entry in palette order. Reproducible; used by golden tests.
    Sequential,
}

/// Allocates colors from [`PASTEL_PALETTE`] without repeats until [`ColorPicker::reset`].
#[derive(Debug, Clone)]
pub struct ColorPicker {
    strategy: ColorStrategy,
    used: Vec<&'static str>,
}

impl ColorPicker {
    pub fn new(strategy: ColorStrategy) -> Self {
        Self {
            strategy,
            used: Vec::new(),
        }
    }

    /// Returns a color that has not been handed out since the last reset and marks it used.
    ///
    /// Fails with [`Error::PaletteExhausted`] once all palette entries are in use.
    pub fn pick(&mut self) -> Result<&'static str> {
        let available: Vec<&'static str> = PASTEL_PALETTE
            .iter()
            .copied()
            .filter(|color| !self.used.contains(color))
            .collect();
        if available.is_empty() {
            return Err(Error::PaletteExhausted {
                palette_size: PASTEL_PALETTE.len(),
            });
        }

        let index = match self.strategy {
            ColorStrategy::Random => rand::thread_rng().gen_range(0..available.len()),
            ColorStrategy::Sequential => 0,
        };
        let color = available[index];
        self.used.push(color);
        Ok(color)
    }

    /// Makes every palette entry available again.
    ///
    /// A translation never calls this (each call owns a fresh picker); it exists so one picker
    /// can be reused across independent translations.
    pub fn reset(&mut self) {
        self.used.clear();
    }

    pub fn remaining(&self) -> usize {
        PASTEL_PALETTE.len() - self.used.len()
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(ColorStrategy::default())
    }
}
