//! # Flexural Design Formulas (SNI 2847:2019)
//!
//! Singly reinforced rectangular sections using the equivalent rectangular
//! stress block (Whitney block). Stresses in MPa, lengths in mm, moments in N·mm.
//!
//! ```text
//!        0.85 f'c
//!     ┌──────────┐ ─┬─
//!     │▓▓▓▓▓▓▓▓▓▓│  a = β1·c        C = 0.85 f'c a b
//!     │          │ ─┴─
//!     │          │     d
//!     │  • • •   │ ─── T = As fy
//!     └──────────┘
//! ```

/// Stress block depth factor β1 (SNI 2847:2019 Tabel 22.2.2.4.3)
///
/// 0.85 for f'c ≤ 28 MPa, reduced by 0.05 per 7 MPa above that, not below 0.65.
pub fn beta1(fc: f64) -> f64 {
    if fc <= 28.0 {
        0.85
    } else {
        (0.85 - 0.05 * (fc - 28.0) / 7.0).max(0.65)
    }
}

/// Strength ratio m = fy / (0.85 f'c)
#[inline]
pub fn strength_ratio_m(fc: f64, fy: f64) -> f64 {
    fy / (0.85 * fc)
}

/// Required nominal resistance coefficient Rn = Mu / (φ b d²), in MPa.
#[inline]
pub fn nominal_resistance_rn(mu_nmm: f64, phi: f64, b: f64, d: f64) -> f64 {
    mu_nmm / (phi * b * d * d)
}

/// Reinforcement ratio needed to develop `rn`.
///
/// ρ = (1/m) · (1 − √(1 − 2·m·Rn / fy))
///
/// Returns `None` when the radicand is negative: the concrete compression
/// zone cannot balance the moment at any steel ratio.
///
/// # Example
/// ```rust
/// use sipil_core::equations::flexure::required_steel_ratio;
///
/// assert_eq!(required_steel_ratio(0.0, 25.0, 400.0), Some(0.0));
/// assert!(required_steel_ratio(20.0, 25.0, 400.0).is_none());
/// ```
pub fn required_steel_ratio(rn: f64, fc: f64, fy: f64) -> Option<f64> {
    let m = strength_ratio_m(fc, fy);
    let radicand = 1.0 - 2.0 * m * rn / fy;
    if radicand < 0.0 {
        return None;
    }
    Some((1.0 - radicand.sqrt()) / m)
}

/// Balanced reinforcement ratio ρb = 0.85 β1 f'c / fy · 600 / (600 + fy)
pub fn balanced_steel_ratio(fc: f64, fy: f64) -> f64 {
    0.85 * beta1(fc) * fc / fy * 600.0 / (600.0 + fy)
}

/// Minimum flexural reinforcement ratio max(0.25 √f'c / fy, 1.4 / fy)
pub fn minimum_flexural_ratio(fc: f64, fy: f64) -> f64 {
    (0.25 * fc.sqrt() / fy).max(1.4 / fy)
}

/// Nominal moment capacity Mn = As fy (d − a/2) in N·mm, with a = As fy / (0.85 f'c b).
pub fn nominal_moment_capacity(as_mm2: f64, fc: f64, fy: f64, b: f64, d: f64) -> f64 {
    let a = as_mm2 * fy / (0.85 * fc * b);
    as_mm2 * fy * (d - a / 2.0)
}
