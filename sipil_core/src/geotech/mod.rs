//! # Geotechnical Calculations
//!
//! - [`bearing`] - Shallow foundation bearing capacity (Terzaghi)

pub mod bearing;

pub use bearing::{bearing_capacity_factors, BearingFactors, BearingInput, BearingResult, FootingShape};
