//! Color coding: set three 8-bit channels close enough to a random RGB target.

use rand::Rng;

use crate::domain::{Rgb, VariantKind};
use crate::scoring::Rules;

use super::Variant;

/// Per-channel tolerance as a fraction of 255.
pub const DEFAULT_COLOR_TOLERANCE: f64 = 0.05;

#[derive(Clone, Debug)]
pub struct ColorCoding {
    rules: Rules,
    tolerance: f64,
}

impl ColorCoding {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.clamp(0.0, 1.0);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for ColorCoding {
    fn default() -> Self {
        Self::new(Rules::defaults_for(VariantKind::ColorCoding))
    }
}

impl Variant for ColorCoding {
    type Target = Rgb;
    type Answer = Rgb;
    type Record = Rgb;

    fn kind(&self) -> VariantKind {
        VariantKind::ColorCoding
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        Rgb::new(rng.gen(), rng.gen(), rng.gen())
    }

    fn is_match(&self, target: &Rgb, answer: &Rgb) -> bool {
        target.within(answer, self.tolerance)
    }

    fn record(&self, _target: &Rgb, answer: &Rgb) -> Rgb {
        *answer
    }
}
