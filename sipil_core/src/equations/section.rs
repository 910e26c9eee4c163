//! # Cross-Section Geometry
//!
//! Geometric quantities of solid rectangular concrete sections used by the
//! flexural design formulas and the quantity take-off in the cost optimizer.
//!
//! ## Notation
//!
//! - `b` = Width of section (mm)
//! - `h` = Overall height of section (mm)
//! - `d` = Effective depth: compression face to tension steel centroid (mm)

/// Gross cross-sectional area of a rectangular section
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │         │
///     │  • • •  │ ← tension steel
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// A = b × h
///
/// # Example
/// ```rust
/// use sipil_core::equations::section::rectangular_area;
///
/// let area = rectangular_area(300.0, 500.0);
/// assert_eq!(area, 150_000.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Effective depth of a singly reinforced section
///
/// The deduction lumps clear cover, stirrup diameter and half the main bar
/// diameter into one value.
///
/// # Formula
/// d = h - deduction
///
/// # Example
/// ```rust
/// use sipil_core::equations::section::effective_depth;
///
/// assert_eq!(effective_depth(400.0, 60.0), 340.0);
/// ```
#[inline]
pub fn effective_depth(h: f64, deduction: f64) -> f64 {
    h - deduction
}

/// Formwork contact length per unit length of beam: two sides plus soffit.
///
/// # Formula
/// p = b + 2h
#[inline]
pub fn formwork_perimeter(b: f64, h: f64) -> f64 {
    b + 2.0 * h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_area() {
        assert_eq!(rectangular_area(250.0, 500.0), 125_000.0);
    }

    #[test]
    fn test_effective_depth() {
        assert_eq!(effective_depth(500.0, 60.0), 440.0);
    }

    #[test]
    fn test_formwork_perimeter() {
        // 200 soffit + 2 × 400 sides
        assert_eq!(formwork_perimeter(200.0, 400.0), 1000.0);
    }
}
