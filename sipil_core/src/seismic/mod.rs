//! # Seismic Design Spectrum (SNI 1726:2012)
//!
//! Turns mapped ground motion (Ss, S1) and a site class into site
//! coefficients, design spectral parameters and a design response spectrum,
//! with an optional plausibility check of the site class against soil data.
//!
//! ## Pipeline
//!
//! ```text
//! Ss, S1, site class ──► Fa, Fv (+ note) ──► Sds, Sd1, T0, Ts ──► Sa(T) curve
//!                                                   │
//!                             risk category ────────┴──► design category
//! ```
//!
//! Advisory outcomes are data, not errors: class SF returns zero sentinel
//! coefficients with `requires_site_specific_analysis = true`, and a soil
//! contradiction is reported in [`SoilCheck`].
//!
//! ## Example
//!
//! ```rust
//! use sipil_core::seismic::{SeismicRequest, SeismicSpectrumEngine, SpectrumConfig};
//!
//! let request = SeismicRequest::new("Gedung A", 0.75, 0.35, "SD");
//! let report = SeismicSpectrumEngine::analyze(&request, &SpectrumConfig::default()).unwrap();
//!
//! assert!((report.parameters.sds - 0.6).abs() < 1e-9);
//! assert_eq!(report.curve.len(), 100);
//! ```

pub mod coefficients;
pub mod design_category;
pub mod site_class;
pub mod soil_check;
pub mod spectrum;

pub use coefficients::{
    compute_site_coefficients, derive_design_parameters, site_coefficients,
    DesignSpectrumParameters, SiteCoefficients, SiteGroundMotion,
};
pub use design_category::{seismic_design_category, RiskCategory, SeismicDesignCategory};
pub use site_class::SiteClass;
pub use soil_check::{check_soil_plausibility, suggest_site_class, SoilCheck, SoilData};
pub use spectrum::{generate_spectrum_curve, SpectrumCurve, SpectrumPoint};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::InputPolicy;

/// Sampling of the generated spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Number of period samples
    pub num_points: usize,
    /// Last sampled period (s)
    pub t_max: f64,
    /// Treatment of non-numeric / negative accelerations and unknown site classes
    pub input_policy: InputPolicy,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        SpectrumConfig {
            num_points: spectrum::DEFAULT_NUM_POINTS,
            t_max: spectrum::DEFAULT_T_MAX,
            input_policy: InputPolicy::Permissive,
        }
    }
}

impl SpectrumConfig {
    pub fn validate(&self) -> CalcResult<()> {
        if self.num_points < 2 {
            return Err(CalcError::invalid_input(
                "spectrum.num_points",
                self.num_points.to_string(),
                "At least two samples are needed to draw a spectrum",
            ));
        }
        if !self.t_max.is_finite() || self.t_max <= 0.0 {
            return Err(CalcError::invalid_input(
                "spectrum.t_max",
                self.t_max.to_string(),
                "Upper period bound must be positive",
            ));
        }
        Ok(())
    }
}

/// Input for a full spectrum analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Gedung A",
///   "ss": 0.75,
///   "s1": 0.35,
///   "site_class": "SD",
///   "soil": { "n_spt": 28.0, "vs30": 240.0 },
///   "risk_category": "II"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicRequest {
    /// User label (e.g., building or grid name)
    pub label: String,
    /// Mapped short-period acceleration Ss (g)
    pub ss: f64,
    /// Mapped 1-second acceleration S1 (g)
    pub s1: f64,
    /// Site class code or name; unrecognized text falls back to SD
    pub site_class: String,
    /// Optional soil test data for the plausibility check
    #[serde(default)]
    pub soil: Option<SoilData>,
    /// Optional risk category for the design category
    #[serde(default)]
    pub risk_category: Option<RiskCategory>,
}

impl SeismicRequest {
    pub fn new(label: impl Into<String>, ss: f64, s1: f64, site_class: impl Into<String>) -> Self {
        SeismicRequest {
            label: label.into(),
            ss,
            s1,
            site_class: site_class.into(),
            soil: None,
            risk_category: None,
        }
    }

    pub fn with_soil(mut self, soil: SoilData) -> Self {
        self.soil = Some(soil);
        self
    }

    pub fn with_risk_category(mut self, risk: RiskCategory) -> Self {
        self.risk_category = Some(risk);
        self
    }
}

/// Everything the spectrum engine derives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicReport {
    pub label: String,
    /// Ground motion actually used (after sanitizing)
    pub ground_motion: SiteGroundMotion,
    /// Substitutions made while reading the input, if any
    pub input_note: Option<String>,
    pub coefficients: SiteCoefficients,
    pub parameters: DesignSpectrumParameters,
    pub curve: Vec<SpectrumPoint>,
    pub soil_check: Option<SoilCheck>,
    pub design_category: Option<SeismicDesignCategory>,
}

impl SeismicReport {
    /// True when the result must not be used without further analysis
    pub fn needs_attention(&self) -> bool {
        self.coefficients.requires_site_specific_analysis
            || self.soil_check.as_ref().is_some_and(|c| !c.is_consistent)
    }
}

/// Entry point bundling the spectrum operations.
pub struct SeismicSpectrumEngine;

impl SeismicSpectrumEngine {
    /// Run coefficients, parameters, curve, soil check and design category.
    ///
    /// Fails only when the input policy is strict and an input had to be
    /// substituted, or when the sampling config is invalid.
    pub fn analyze(request: &SeismicRequest, config: &SpectrumConfig) -> CalcResult<SeismicReport> {
        config.validate()?;

        let validated = SiteGroundMotion::from_parts(
            request.ss,
            request.s1,
            &request.site_class,
            config.input_policy,
        );
        let input_note = validated.reason().map(str::to_string);
        let motion = validated.into_result("ground_motion")?;

        let mut coefficients = site_coefficients(&motion);
        if let Some(note) = &input_note {
            coefficients.note = format!("{}. {}", note, coefficients.note);
        }
        let parameters = DesignSpectrumParameters::from_coefficients(&motion, &coefficients);
        let curve = generate_spectrum_curve(&parameters, config.num_points, config.t_max);

        let soil_check = request
            .soil
            .map(|soil| check_soil_plausibility(motion.site_class, soil.n_spt, soil.vs30, soil.su));

        let design_category = match request.risk_category {
            Some(risk) if !coefficients.is_refused() => Some(seismic_design_category(
                parameters.sds,
                parameters.sd1,
                motion.s1,
                risk,
            )),
            _ => None,
        };

        debug!(
            "Spectrum '{}': Sds={:.3}, Sd1={:.3}, T0={:.3}, Ts={:.3}",
            request.label, parameters.sds, parameters.sd1, parameters.t0, parameters.ts
        );

        Ok(SeismicReport {
            label: request.label.clone(),
            ground_motion: motion,
            input_note,
            coefficients,
            parameters,
            curve,
            soil_check,
            design_category,
        })
    }
}
