//! Deformed bar catalogue and single-layer bar selection.

use serde::{Deserialize, Serialize};

/// Deformed bar diameters commonly stocked in Indonesia (SNI 2052), in mm.
pub const BAR_DIAMETERS_MM: [u32; 5] = [13, 16, 19, 22, 25];

/// Clear cover to stirrups (mm)
pub const CLEAR_COVER_MM: f64 = 40.0;

/// Stirrup diameter (mm)
pub const STIRRUP_DIAMETER_MM: f64 = 10.0;

/// Minimum clear spacing between parallel bars (mm), also not less than the bar diameter
pub const MIN_CLEAR_SPACING_MM: f64 = 25.0;

/// Upper limit on bars considered in one layer
pub const MAX_BARS_PER_LAYER: u32 = 8;

/// A bar arrangement such as "3D19".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarArrangement {
    pub count: u32,
    pub diameter_mm: u32,
    /// Steel area provided (mm²)
    pub provided_area_mm2: f64,
}

impl std::fmt::Display for BarArrangement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D{}", self.count, self.diameter_mm)
    }
}

/// Area of one bar (mm²)
pub fn bar_area_mm2(diameter_mm: u32) -> f64 {
    let d = diameter_mm as f64;
    std::f64::consts::PI * d * d / 4.0
}

/// Width needed to place `count` bars of `diameter_mm` in one layer.
pub fn required_width_mm(count: u32, diameter_mm: u32) -> f64 {
    let db = diameter_mm as f64;
    let spacing = MIN_CLEAR_SPACING_MM.max(db);
    2.0 * (CLEAR_COVER_MM + STIRRUP_DIAMETER_MM)
        + count as f64 * db
        + count.saturating_sub(1) as f64 * spacing
}

/// Fewest bars (at least two) that provide `as_required` and fit in `width_mm`.
///
/// Ties on bar count go to the smaller diameter. `None` when nothing fits
/// in a single layer.
///
/// # Example
/// ```rust
/// use sipil_core::optimizer::rebar::select_bars;
///
/// let bars = select_bars(1000.0, 250.0).unwrap();
/// assert_eq!(bars.to_string(), "3D22");
/// ```
pub fn select_bars(as_required_mm2: f64, width_mm: f64) -> Option<BarArrangement> {
    (2..=MAX_BARS_PER_LAYER)
        .flat_map(|count| BAR_DIAMETERS_MM.iter().map(move |&d| (count, d)))
        .filter(|&(count, d)| required_width_mm(count, d) <= width_mm)
        .map(|(count, d)| BarArrangement {
            count,
            diameter_mm: d,
            provided_area_mm2: count as f64 * bar_area_mm2(d),
        })
        .find(|bars| bars.provided_area_mm2 >= as_required_mm2)
}
