//! # sipil_core - Civil Engineering Calculation Engine
//!
//! `sipil_core` provides design calculations for Indonesian practice
//! (SNI 1726 seismic loading, SNI 2847 concrete, SNI 8460 geotechnics) with a
//! JSON-first API. All inputs and outputs are serializable so results can be
//! stored, diffed, or handed to other tools unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Advisories are data**: refused site classes, soil contradictions and
//!   empty optimizer results come back as values, not errors
//! - **Configurable limits**: code limits and prices live in [`config::DesignConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sipil_core::calculations::{CalculationOutput, CalculationRequest};
//! use sipil_core::config::DesignConfig;
//! use sipil_core::seismic::SeismicRequest;
//!
//! let request = CalculationRequest::SeismicSpectrum(SeismicRequest::new("Gedung A", 0.75, 0.35, "SD"));
//! let output = request.run(&DesignConfig::default()).unwrap();
//!
//! let json = serde_json::to_string_pretty(&output).unwrap();
//! assert!(json.contains("\"type\": \"SeismicSpectrum\""));
//! ```
//!
//! ## Modules
//!
//! - [`seismic`] - Site coefficients, design spectrum, soil plausibility, design category
//! - [`optimizer`] - Cost-driven rectangular beam section search
//! - [`geotech`] - Shallow foundation bearing capacity
//! - [`hydrology`] - Rational method peak discharge
//! - [`calculations`] - Tagged request/response dispatch over all engines
//! - [`config`] - TOML configuration
//! - [`equations`] - Shared formulas and interpolation
//! - [`validation`] - Accepted / defaulted / rejected input outcomes
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod geotech;
pub mod hydrology;
pub mod optimizer;
pub mod seismic;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationOutput, CalculationRequest};
pub use config::DesignConfig;
pub use errors::{CalcError, CalcResult};
pub use validation::{InputPolicy, Validated};
