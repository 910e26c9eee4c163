//! # Hydrology
//!
//! - [`rational`] - Design flood peak discharge by the rational method

pub mod rational;

pub use rational::{
    kirpich_time_of_concentration, mononobe_intensity, rational_peak_discharge, RationalInput,
    RationalResult,
};
