//! # Engineering Equations
//!
//! Closed-form formulas shared by the calculation engines. Keeping them in
//! one place makes them easy to check against the code clauses they come from.
//!
//! ## Modules
//!
//! - [`interpolation`] - Clamped table interpolation
//! - [`section`] - Rectangular cross-section geometry
//! - [`flexure`] - Reinforced-concrete flexural design (rectangular stress block)
//!
//! ## Units
//!
//! Formulas work in N and mm (stresses in MPa) unless the function name says
//! otherwise. Seismic accelerations are in g, periods in seconds.

pub mod flexure;
pub mod interpolation;
pub mod section;

pub use flexure::{
    balanced_steel_ratio, beta1, minimum_flexural_ratio, nominal_moment_capacity,
    nominal_resistance_rn, required_steel_ratio, strength_ratio_m,
};
pub use interpolation::interp_clamped;
pub use section::{effective_depth, formwork_perimeter, rectangular_area};

/// SNI code clause references quoted in notes.
pub mod sni_ref {
    /// Short-period site coefficient Fa
    pub const FA_TABLE: &str = "SNI 1726:2012 Tabel 4";
    /// Long-period site coefficient Fv
    pub const FV_TABLE: &str = "SNI 1726:2012 Tabel 5";
    /// Site-specific ground motion procedure
    pub const SITE_SPECIFIC: &str = "SNI 1726:2012 Pasal 6.10.1";
}
