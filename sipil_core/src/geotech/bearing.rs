//! # Shallow Foundation Bearing Capacity (Terzaghi)
//!
//! Ultimate and allowable bearing pressure of a footing on homogeneous soil,
//! using Terzaghi's general shear bearing capacity equation with shape factors.
//!
//! ```text
//!   q_ult = s_c · c · Nc  +  γ · Df · Nq  +  s_γ · γ · B · Nγ
//!
//!            P
//!            ↓
//!   ═════════╪═════════  ground
//!            │           Df
//!        ┌───┴───┐
//!        └───────┘       B
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sipil_core::geotech::bearing::{calculate, BearingInput, FootingShape};
//!
//! let input = BearingInput {
//!     label: "F-1".to_string(),
//!     shape: FootingShape::Square,
//!     width_m: 2.0,
//!     depth_m: 1.0,
//!     cohesion_kpa: 50.0,
//!     friction_angle_deg: 0.0,
//!     unit_weight_kn_m3: 18.0,
//!     factor_of_safety: 3.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.q_allow_kpa > 0.0);
//! ```

use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

/// Default factor of safety on ultimate bearing pressure
pub const DEFAULT_FACTOR_OF_SAFETY: f64 = 3.0;

/// Friction angles at or above this are outside the Terzaghi tables
pub const MAX_FRICTION_ANGLE_DEG: f64 = 50.0;

/// Footing plan shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootingShape {
    /// Continuous wall footing, evaluated per metre run
    Strip,
    Square,
    Circular,
}

impl FootingShape {
    pub const ALL: [FootingShape; 3] = [
        FootingShape::Strip,
        FootingShape::Square,
        FootingShape::Circular,
    ];

    /// Parse from a name; accepts English and Indonesian terms.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "STRIP" | "MENERUS" | "WALL" => Ok(FootingShape::Strip),
            "SQUARE" | "BUJURSANGKAR" | "PERSEGI" => Ok(FootingShape::Square),
            "CIRCULAR" | "CIRCLE" | "LINGKARAN" | "BULAT" => Ok(FootingShape::Circular),
            _ => Err(CalcError::unknown_code(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FootingShape::Strip => "Strip",
            FootingShape::Square => "Square",
            FootingShape::Circular => "Circular",
        }
    }

    /// Terzaghi shape factors (s_c, s_γ)
    pub fn shape_factors(&self) -> (f64, f64) {
        match self {
            FootingShape::Strip => (1.0, 0.5),
            FootingShape::Square => (1.3, 0.4),
            FootingShape::Circular => (1.3, 0.3),
        }
    }

    /// Plan area for width (or diameter) `b`; strips use a 1 m run.
    pub fn plan_area_m2(&self, b: f64) -> f64 {
        match self {
            FootingShape::Strip => b,
            FootingShape::Square => b * b,
            FootingShape::Circular => PI * b * b / 4.0,
        }
    }
}

impl std::fmt::Display for FootingShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Terzaghi bearing capacity factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingFactors {
    pub nc: f64,
    pub nq: f64,
    pub ngamma: f64,
}

/// Bearing capacity factors for a friction angle in degrees.
///
/// Nq = a² / (2 cos²(45° + φ/2)), a = e^((0.75π − φ/2) tan φ),
/// Nc = (Nq − 1) cot φ, Nγ = 2 (Nq + 1) tan φ.
/// At φ = 0, Nc takes its limit 1.5π + 1.
pub fn bearing_capacity_factors(phi_deg: f64) -> BearingFactors {
    let phi = phi_deg.to_radians();
    let tan_phi = phi.tan();
    let a = ((0.75 * PI - phi / 2.0) * tan_phi).exp();
    let cos_term = (PI / 4.0 + phi / 2.0).cos();
    let nq = a * a / (2.0 * cos_term * cos_term);
    let nc = if phi_deg.abs() < 1e-9 {
        1.5 * PI + 1.0
    } else {
        (nq - 1.0) / tan_phi
    };
    BearingFactors {
        nc,
        nq,
        ngamma: 2.0 * (nq + 1.0) * tan_phi,
    }
}

fn default_factor_of_safety() -> f64 {
    DEFAULT_FACTOR_OF_SAFETY
}

/// Input parameters for a shallow footing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "shape": "Square",
///   "width_m": 2.0,
///   "depth_m": 1.0,
///   "cohesion_kpa": 10.0,
///   "friction_angle_deg": 30.0,
///   "unit_weight_kn_m3": 18.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingInput {
    /// User label for this footing (e.g., "F-1", "Pondasi As C")
    pub label: String,

    pub shape: FootingShape,

    /// Footing width B, or diameter for circular footings (m)
    pub width_m: f64,

    /// Embedment depth Df below finished grade (m)
    pub depth_m: f64,

    /// Soil cohesion c (kPa)
    pub cohesion_kpa: f64,

    /// Internal friction angle φ (degrees)
    pub friction_angle_deg: f64,

    /// Soil unit weight γ (kN/m³)
    pub unit_weight_kn_m3: f64,

    /// Factor of safety applied to q_ult
    #[serde(default = "default_factor_of_safety")]
    pub factor_of_safety: f64,
}

impl BearingInput {
    pub fn validate(&self) -> CalcResult<()> {
        if require_finite("width_m", self.width_m)? <= 0.0 {
            return Err(CalcError::invalid_input(
                "width_m",
                self.width_m.to_string(),
                "Footing width must be positive",
            ));
        }
        if require_finite("depth_m", self.depth_m)? < 0.0 {
            return Err(CalcError::invalid_input(
                "depth_m",
                self.depth_m.to_string(),
                "Embedment depth cannot be negative",
            ));
        }
        if require_finite("cohesion_kpa", self.cohesion_kpa)? < 0.0 {
            return Err(CalcError::invalid_input(
                "cohesion_kpa",
                self.cohesion_kpa.to_string(),
                "Cohesion cannot be negative",
            ));
        }
        let phi = require_finite("friction_angle_deg", self.friction_angle_deg)?;
        if !(0.0..MAX_FRICTION_ANGLE_DEG).contains(&phi) {
            return Err(CalcError::invalid_input(
                "friction_angle_deg",
                phi.to_string(),
                "Friction angle must be in [0, 50) degrees",
            ));
        }
        if require_finite("unit_weight_kn_m3", self.unit_weight_kn_m3)? <= 0.0 {
            return Err(CalcError::invalid_input(
                "unit_weight_kn_m3",
                self.unit_weight_kn_m3.to_string(),
                "Unit weight must be positive",
            ));
        }
        if require_finite("factor_of_safety", self.factor_of_safety)? <= 1.0 {
            return Err(CalcError::invalid_input(
                "factor_of_safety",
                self.factor_of_safety.to_string(),
                "Factor of safety must exceed 1.0",
            ));
        }
        Ok(())
    }
}

/// Results from a bearing capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "factors": { "nc": 37.16, "nq": 22.46, "ngamma": 27.09 },
///   "shape_factor_c": 1.3,
///   "shape_factor_gamma": 0.4,
///   "q_ult_kpa": 1278.1,
///   "q_allow_kpa": 426.0,
///   "footing_area_m2": 4.0,
///   "allowable_load_kn": 1704.1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingResult {
    pub factors: BearingFactors,
    pub shape_factor_c: f64,
    pub shape_factor_gamma: f64,
    /// Ultimate bearing pressure (kPa)
    pub q_ult_kpa: f64,
    /// Allowable bearing pressure q_ult / FS (kPa)
    pub q_allow_kpa: f64,
    /// Plan area; per metre run for strips (m²)
    pub footing_area_m2: f64,
    /// Allowable column load q_allow · area (kN, or kN/m for strips)
    pub allowable_load_kn: f64,
}

impl BearingResult {
    /// Check whether a service load fits within the allowable load
    pub fn supports(&self, service_load_kn: f64) -> bool {
        service_load_kn <= self.allowable_load_kn
    }
}

/// Calculate ultimate and allowable bearing capacity.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - if any dimension or soil parameter is out of range
pub fn calculate(input: &BearingInput) -> CalcResult<BearingResult> {
    input.validate()?;

    let factors = bearing_capacity_factors(input.friction_angle_deg);
    let (sc, sg) = input.shape.shape_factors();
    let gamma = input.unit_weight_kn_m3;

    let q_ult = sc * input.cohesion_kpa * factors.nc
        + gamma * input.depth_m * factors.nq
        + sg * gamma * input.width_m * factors.ngamma;
    let q_allow = q_ult / input.factor_of_safety;
    let area = input.shape.plan_area_m2(input.width_m);

    debug!(
        "Bearing '{}': Nc={:.2}, Nq={:.2}, Nγ={:.2}, q_ult={:.1} kPa",
        input.label, factors.nc, factors.nq, factors.ngamma, q_ult
    );

    Ok(BearingResult {
        factors,
        shape_factor_c: sc,
        shape_factor_gamma: sg,
        q_ult_kpa: q_ult,
        q_allow_kpa: q_allow,
        footing_area_m2: area,
        allowable_load_kn: q_allow * area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clay_footing() -> BearingInput {
        BearingInput {
            label: "F-1".to_string(),
            shape: FootingShape::Square,
            width_m: 2.0,
            depth_m: 1.0,
            cohesion_kpa: 50.0,
            friction_angle_deg: 0.0,
            unit_weight_kn_m3: 18.0,
            factor_of_safety: 3.0,
        }
    }

    #[test]
    fn test_factors_undrained() {
        let f = bearing_capacity_factors(0.0);
        assert_relative_eq!(f.nc, 5.712, epsilon = 1e-3);
        assert_relative_eq!(f.nq, 1.0, epsilon = 1e-12);
        assert_relative_eq!(f.ngamma, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_factors_thirty_degrees() {
        let f = bearing_capacity_factors(30.0);
        assert_relative_eq!(f.nq, 22.46, epsilon = 0.01);
        assert_relative_eq!(f.nc, 37.16, epsilon = 0.01);
        assert_relative_eq!(f.ngamma, 2.0 * (f.nq + 1.0) * 30f64.to_radians().tan());
    }

    #[test]
    fn test_factors_increase_with_friction() {
        let low = bearing_capacity_factors(10.0);
        let high = bearing_capacity_factors(35.0);
        assert!(high.nc > low.nc);
        assert!(high.nq > low.nq);
        assert!(high.ngamma > low.ngamma);
    }

    #[test]
    fn test_square_footing_on_clay() {
        let result = calculate(&clay_footing()).unwrap();
        // 1.3 × 50 × 5.712 + 18 × 1 × 1
        assert_relative_eq!(result.q_ult_kpa, 1.3 * 50.0 * (1.5 * PI + 1.0) + 18.0, epsilon = 1e-9);
        assert_relative_eq!(result.q_allow_kpa, result.q_ult_kpa / 3.0);
        assert_relative_eq!(result.footing_area_m2, 4.0);
        assert_relative_eq!(result.allowable_load_kn, result.q_allow_kpa * 4.0);
        assert!(result.supports(400.0));
    }

    #[test]
    fn test_shape_ordering() {
        let mut input = clay_footing();
        input.friction_angle_deg = 30.0;
        input.cohesion_kpa = 10.0;
        let square = calculate(&input).unwrap();
        input.shape = FootingShape::Strip;
        let strip = calculate(&input).unwrap();
        assert!(square.q_ult_kpa > strip.q_ult_kpa);
    }

    #[test]
    fn test_validation() {
        let mut input = clay_footing();
        input.width_m = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = clay_footing();
        input.friction_angle_deg = 50.0;
        assert!(calculate(&input).is_err());

        let mut input = clay_footing();
        input.factor_of_safety = 1.0;
        assert!(calculate(&input).is_err());

        let mut input = clay_footing();
        input.depth_m = -0.5;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_shape_parsing() {
        assert_eq!(FootingShape::from_str_flexible("bujur sangkar").unwrap(), FootingShape::Square);
        assert_eq!(FootingShape::from_str_flexible("strip").unwrap(), FootingShape::Strip);
        assert!(FootingShape::from_str_flexible("hexagon").is_err());
    }

    #[test]
    fn test_default_factor_of_safety() {
        let json = r#"{"label":"F","shape":"Strip","width_m":1.5,"depth_m":1.0,
            "cohesion_kpa":0.0,"friction_angle_deg":32.0,"unit_weight_kn_m3":17.0}"#;
        let input: BearingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.factor_of_safety, DEFAULT_FACTOR_OF_SAFETY);
    }
}
