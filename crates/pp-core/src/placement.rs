//! Initial placement of newly added frames.

use crate::model::{Bounds, Dimensions};
use serde::{Deserialize, Serialize};

/// What kind of content a new frame holds. Each kind has its own default
/// position and its own cap on the initial size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// The background-removed product cutout.
    Product,
    /// A decorative prop from the props library.
    Prop,
}

impl Placement {
    /// Longest side, in stage units, a new frame may start with.
    pub const fn max_initial_size(self) -> u32 {
        match self {
            Placement::Product => 360,
            Placement::Prop => 240,
        }
    }

    /// Top-left corner a new frame is dropped at.
    pub const fn origin(self) -> (f32, f32) {
        match self {
            Placement::Product => (120.0, 120.0),
            Placement::Prop => (180.0, 160.0),
        }
    }

    /// Initial bounds for an image of the given natural size.
    pub fn initial_bounds(self, natural: Dimensions) -> Bounds {
        let size = fit_within(natural, self.max_initial_size());
        let (x, y) = self.origin();
        Bounds::new(x, y, size.width as f32, size.height as f32)
    }
}

/// Scale `natural` down so its longest side is at most `cap`, preserving
/// aspect ratio and rounding to whole units. Never scales up.
pub fn fit_within(natural: Dimensions, cap: u32) -> Dimensions {
    let longest = natural.width.max(natural.height);
    if longest == 0 {
        return natural;
    }
    let scale = (cap as f64 / longest as f64).min(1.0);
    Dimensions::new(
        (natural.width as f64 * scale).round() as u32,
        (natural.height as f64 * scale).round() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_product_fits_cap() {
        let size = fit_within(Dimensions::new(800, 600), 360);
        assert_eq!(size, Dimensions::new(360, 270));
    }

    #[test]
    fn portrait_prop_fits_cap() {
        let size = fit_within(Dimensions::new(500, 1000), 240);
        assert_eq!(size, Dimensions::new(120, 240));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let size = fit_within(Dimensions::new(100, 80), 360);
        assert_eq!(size, Dimensions::new(100, 80));
    }

    #[test]
    fn placements_have_distinct_origins() {
        let product = Placement::Product.initial_bounds(Dimensions::new(10, 10));
        let prop = Placement::Prop.initial_bounds(Dimensions::new(10, 10));
        assert_eq!((product.x, product.y), (120.0, 120.0));
        assert_eq!((prop.x, prop.y), (180.0, 160.0));
    }
}
