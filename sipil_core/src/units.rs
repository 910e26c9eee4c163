//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI units used across Indonesian
//! design codes (SNI). They serialize as bare numbers and exist mainly to make
//! the conversions at calculation boundaries explicit.
//!
//! - Length: metres (m), millimetres (mm)
//! - Moment: kilonewton-metres (kN·m), newton-millimetres (N·mm)
//! - Area: square millimetres (mm²), square metres (m²)
//!
//! ## Example
//!
//! ```rust
//! use sipil_core::units::{Meters, Millimeters, KilonewtonMeters, NewtonMillimeters};
//!
//! let span: Millimeters = Meters(6.0).into();
//! assert_eq!(span.0, 6000.0);
//!
//! let mu: NewtonMillimeters = KilonewtonMeters(150.0).into();
//! assert_eq!(mu.0, 150.0e6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqMm> for SqM {
    fn from(mm2: SqMm) -> Self {
        SqM(mm2.0 / 1.0e6)
    }
}

impl From<SqM> for SqMm {
    fn from(m2: SqM) -> Self {
        SqMm(m2.0 * 1.0e6)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(KilonewtonMeters);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(SqMm);
impl_arithmetic!(SqM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let span: Millimeters = Meters(6.0).into();
        assert_eq!(span.0, 6000.0);
        let back: Meters = span.into();
        assert_eq!(back.0, 6.0);
    }

    #[test]
    fn test_moment_conversion() {
        let mu: NewtonMillimeters = KilonewtonMeters(1.5).into();
        assert_eq!(mu.0, 1_500_000.0);
    }

    #[test]
    fn test_area_conversion() {
        let a: SqM = SqMm(200.0 * 400.0).into();
        assert!((a.0 - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(400.0);
        let b = Millimeters(60.0);
        assert_eq!((a - b).0, 340.0);
        assert_eq!((a + b).0, 460.0);
        assert_eq!((a * 2.0).value(), 800.0);
        assert_eq!((a / 2.0).value(), 200.0);
    }

    #[test]
    fn test_serialization() {
        let span = Meters(6.5);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, "6.5");
        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(span, roundtrip);
    }
}
