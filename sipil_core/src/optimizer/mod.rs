//! # Section Cost Optimizer
//!
//! Exhaustive search over rectangular beam sections for the cheapest ones
//! that carry a factored design moment within code and constructability
//! limits.
//!
//! ## Search
//!
//! ```text
//! widths b ∈ [200, 600] step 50
//!   └─ heights h ∈ [⌈span/15⌉, 1000] step 50
//!        ├─ geometry:  b ≤ h ≤ 3b
//!        ├─ flexure:   As from Mu/φ (rectangular stress block)
//!        ├─ steel:     ρ ≤ 2.5 %, ρ floored at 0.18 %
//!        └─ cost:      concrete + steel + formwork per metre
//! → stable sort by cost, keep the cheapest five
//! ```
//!
//! Every limit comes from [`OptimizerConfig`]. An empty result is the
//! "no solution" signal: widen the search or relax the limits.
//!
//! ## Example
//!
//! ```rust
//! use sipil_core::optimizer::{search, MaterialCostRates};
//!
//! let sections = search(150.0, 6.0, 25.0, 400.0, &MaterialCostRates::default()).unwrap();
//! assert!(!sections.is_empty());
//! assert!(sections.windows(2).all(|w| w[0].estimated_cost <= w[1].estimated_cost));
//! ```

pub mod cost;
pub mod rebar;

pub use cost::{estimate_unit_cost, CostBreakdown, MaterialCostRates};
pub use rebar::{select_bars, BarArrangement};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::equations::flexure::{
    balanced_steel_ratio, minimum_flexural_ratio, nominal_moment_capacity, nominal_resistance_rn,
    required_steel_ratio,
};
use crate::equations::section::effective_depth;
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::{KilonewtonMeters, Meters, Millimeters, NewtonMillimeters};

/// Search space, code limits and pricing constants for the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Narrowest width tried (mm)
    pub width_min_mm: u32,
    /// Widest width tried, inclusive (mm)
    pub width_max_mm: u32,
    /// Width increment (mm)
    pub width_step_mm: u32,
    /// Tallest height tried, inclusive (mm)
    pub height_max_mm: u32,
    /// Height increment; the lower bound is rounded up to a multiple of it (mm)
    pub height_step_mm: u32,
    /// Span-to-height ratio giving the lowest height tried (span / ratio)
    pub span_depth_ratio: f64,
    /// Cover + stirrup + half main bar, subtracted from h to get d (mm)
    pub effective_depth_deduction_mm: f64,
    /// Strength reduction factor for tension-controlled flexure
    pub phi_flexure: f64,
    /// Shrinkage and temperature floor on ρ
    pub min_reinforcement_ratio: f64,
    /// Economic ceiling on ρ
    pub max_reinforcement_ratio: f64,
    /// Shapes flatter than h/b below this are discarded
    pub min_height_to_width: f64,
    /// Shapes more slender than h/b above this are discarded
    pub max_height_to_width: f64,
    /// Laps, hooks and cutting waste applied to steel mass
    pub steel_waste_factor: f64,
    /// Unit mass of reinforcing steel (kg/m³)
    pub steel_density_kg_m3: f64,
    /// Number of ranked sections returned
    pub top_n: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            width_min_mm: 200,
            width_max_mm: 600,
            width_step_mm: 50,
            height_max_mm: 1000,
            height_step_mm: 50,
            span_depth_ratio: 15.0,
            effective_depth_deduction_mm: 60.0,
            phi_flexure: 0.9,
            min_reinforcement_ratio: 0.0018,
            max_reinforcement_ratio: 0.025,
            min_height_to_width: 1.0,
            max_height_to_width: 3.0,
            steel_waste_factor: 1.10,
            steel_density_kg_m3: 7850.0,
            top_n: 5,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> CalcResult<()> {
        if self.width_step_mm == 0 || self.height_step_mm == 0 {
            return Err(CalcError::invalid_input(
                "optimizer.step",
                format!("{}/{}", self.width_step_mm, self.height_step_mm),
                "Search steps must be positive",
            ));
        }
        if self.width_min_mm == 0 || self.width_min_mm > self.width_max_mm {
            return Err(CalcError::invalid_input(
                "optimizer.width_min_mm",
                self.width_min_mm.to_string(),
                "Width range must be non-empty and start above zero",
            ));
        }
        require_positive("optimizer.span_depth_ratio", self.span_depth_ratio)?;
        require_non_negative(
            "optimizer.effective_depth_deduction_mm",
            self.effective_depth_deduction_mm,
        )?;
        if !(self.phi_flexure > 0.0 && self.phi_flexure <= 1.0) {
            return Err(CalcError::invalid_input(
                "optimizer.phi_flexure",
                self.phi_flexure.to_string(),
                "Strength reduction factor must be in (0, 1]",
            ));
        }
        require_non_negative("optimizer.min_reinforcement_ratio", self.min_reinforcement_ratio)?;
        if self.max_reinforcement_ratio <= self.min_reinforcement_ratio {
            return Err(CalcError::invalid_input(
                "optimizer.max_reinforcement_ratio",
                self.max_reinforcement_ratio.to_string(),
                "Maximum ratio must exceed the minimum ratio",
            ));
        }
        require_positive("optimizer.min_height_to_width", self.min_height_to_width)?;
        if self.max_height_to_width < self.min_height_to_width {
            return Err(CalcError::invalid_input(
                "optimizer.max_height_to_width",
                self.max_height_to_width.to_string(),
                "Slenderness cap must not be below the flatness limit",
            ));
        }
        require_positive("optimizer.steel_waste_factor", self.steel_waste_factor)?;
        require_positive("optimizer.steel_density_kg_m3", self.steel_density_kg_m3)?;
        if self.top_n == 0 {
            return Err(CalcError::invalid_input(
                "optimizer.top_n",
                "0",
                "At least one candidate must be returned",
            ));
        }
        Ok(())
    }

    /// Lowest height tried: span / ratio, rounded up to the height step.
    pub fn min_height_mm(&self, span_m: f64) -> u32 {
        let span_mm = Millimeters::from(Meters(span_m)).value();
        let raw = span_mm / self.span_depth_ratio;
        let step = self.height_step_mm.max(1) as f64;
        let rounded = (raw / step - 1e-9).ceil().max(1.0) * step;
        rounded.min(u32::MAX as f64) as u32
    }
}

/// One surviving section with its steel and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCandidate {
    pub width_mm: u32,
    pub height_mm: u32,
    pub effective_depth_mm: f64,
    /// Tension steel area As (mm²)
    pub required_steel_area_mm2: f64,
    /// ρ = As / (b·d)
    pub reinforcement_ratio: f64,
    /// True when the shrinkage/temperature floor, not the moment, set As
    pub governed_by_minimum: bool,
    /// Design capacity φMn with the listed As (kN·m)
    pub design_capacity_knm: f64,
    /// Estimated cost per metre run
    pub estimated_cost: f64,
    pub cost: CostBreakdown,
    /// Single-layer bar arrangement providing As, if one fits
    pub suggested_bars: Option<BarArrangement>,
}

/// Why a grid point did not become a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Geometry,
    Capacity,
    ExcessSteel,
}

/// Search result with bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Cheapest candidates, ascending by cost
    pub candidates: Vec<SectionCandidate>,
    /// Grid points visited
    pub evaluated: usize,
    pub rejected_geometry: usize,
    /// Compression zone cannot develop the moment
    pub rejected_capacity: usize,
    pub rejected_excess_steel: usize,
    pub height_lower_bound_mm: u32,
    /// Balanced ratio ρb for the given materials, for reference
    pub balanced_ratio: f64,
    /// SNI 2847 minimum flexural ratio for the given materials, for reference
    pub code_minimum_ratio: f64,
}

impl OptimizationReport {
    /// True when no section survived the filters
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn best(&self) -> Option<&SectionCandidate> {
        self.candidates.first()
    }
}

/// Input for an optimization request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-2 Lt.2",
///   "design_moment_knm": 150.0,
///   "span_m": 6.0,
///   "fc_mpa": 25.0,
///   "fy_mpa": 400.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub label: String,
    /// Factored design moment Mu (kN·m)
    pub design_moment_knm: f64,
    pub span_m: f64,
    /// Concrete compressive strength f'c (MPa)
    pub fc_mpa: f64,
    /// Steel yield strength fy (MPa)
    pub fy_mpa: f64,
    /// Overrides the configured cost rates
    #[serde(default)]
    pub cost_rates: Option<MaterialCostRates>,
}

/// Grid-search optimizer for rectangular beam sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionCostOptimizer {
    pub config: OptimizerConfig,
}

impl SectionCostOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        SectionCostOptimizer { config }
    }

    /// Every (width, height) grid point in enumeration order: width ascending, then height.
    pub fn candidate_space(&self, span_m: f64) -> impl Iterator<Item = (u32, u32)> {
        let config = self.config;
        let h_min = config.min_height_mm(span_m);
        let h_step = config.height_step_mm.max(1) as usize;
        let w_step = config.width_step_mm.max(1) as usize;
        (config.width_min_mm..=config.width_max_mm)
            .step_by(w_step)
            .flat_map(move |b| {
                (h_min..=config.height_max_mm)
                    .step_by(h_step)
                    .map(move |h| (b, h))
            })
    }

    /// Cheapest sections, ascending by cost; empty when nothing qualifies.
    pub fn search(
        &self,
        design_moment_knm: f64,
        span_m: f64,
        fc_mpa: f64,
        fy_mpa: f64,
        rates: &MaterialCostRates,
    ) -> CalcResult<Vec<SectionCandidate>> {
        self.run(design_moment_knm, span_m, fc_mpa, fy_mpa, rates)
            .map(|report| report.candidates)
    }

    /// Full search with rejection counts.
    pub fn run(
        &self,
        design_moment_knm: f64,
        span_m: f64,
        fc_mpa: f64,
        fy_mpa: f64,
        rates: &MaterialCostRates,
    ) -> CalcResult<OptimizationReport> {
        self.config.validate()?;
        require_non_negative("design_moment_knm", design_moment_knm)?;
        require_positive("span_m", span_m)?;
        require_positive("fc_mpa", fc_mpa)?;
        require_positive("fy_mpa", fy_mpa)?;
        rates.validate()?;

        let mu = NewtonMillimeters::from(KilonewtonMeters(design_moment_knm)).value();
        let mut report = OptimizationReport {
            candidates: Vec::new(),
            evaluated: 0,
            rejected_geometry: 0,
            rejected_capacity: 0,
            rejected_excess_steel: 0,
            height_lower_bound_mm: self.config.min_height_mm(span_m),
            balanced_ratio: balanced_steel_ratio(fc_mpa, fy_mpa),
            code_minimum_ratio: minimum_flexural_ratio(fc_mpa, fy_mpa),
        };

        for (b, h) in self.candidate_space(span_m) {
            report.evaluated += 1;
            match self.evaluate(b, h, mu, fc_mpa, fy_mpa, rates) {
                Ok(candidate) => report.candidates.push(candidate),
                Err(Rejection::Geometry) => report.rejected_geometry += 1,
                Err(Rejection::Capacity) => report.rejected_capacity += 1,
                Err(Rejection::ExcessSteel) => report.rejected_excess_steel += 1,
            }
        }

        // Stable: equal costs keep enumeration order
        report
            .candidates
            .sort_by(|a, b| a.estimated_cost.total_cmp(&b.estimated_cost));
        report.candidates.truncate(self.config.top_n);

        match report.best() {
            Some(best) => debug!(
                "Optimizer: {} points, best {}x{} mm at {:.0}/m",
                report.evaluated, best.width_mm, best.height_mm, best.estimated_cost
            ),
            None => warn!(
                "Optimizer found no section for Mu={} kNm, span={} m ({} points searched)",
                design_moment_knm, span_m, report.evaluated
            ),
        }

        Ok(report)
    }

    fn evaluate(
        &self,
        width_mm: u32,
        height_mm: u32,
        mu_nmm: f64,
        fc: f64,
        fy: f64,
        rates: &MaterialCostRates,
    ) -> Result<SectionCandidate, Rejection> {
        let cfg = &self.config;
        let b = width_mm as f64;
        let h = height_mm as f64;

        if h < cfg.min_height_to_width * b || h > cfg.max_height_to_width * b {
            return Err(Rejection::Geometry);
        }
        let d = effective_depth(h, cfg.effective_depth_deduction_mm);
        if d <= 0.0 {
            return Err(Rejection::Geometry);
        }

        let rn = nominal_resistance_rn(mu_nmm, cfg.phi_flexure, b, d);
        let rho_required = required_steel_ratio(rn, fc, fy).ok_or(Rejection::Capacity)?;
        if rho_required > cfg.max_reinforcement_ratio {
            return Err(Rejection::ExcessSteel);
        }

        let governed_by_minimum = rho_required < cfg.min_reinforcement_ratio;
        let rho = rho_required.max(cfg.min_reinforcement_ratio);
        let as_mm2 = rho * b * d;

        let cost = estimate_unit_cost(
            b,
            h,
            as_mm2,
            cfg.steel_density_kg_m3,
            cfg.steel_waste_factor,
            rates,
        );
        let capacity = cfg.phi_flexure * nominal_moment_capacity(as_mm2, fc, fy, b, d);

        Ok(SectionCandidate {
            width_mm,
            height_mm,
            effective_depth_mm: d,
            required_steel_area_mm2: as_mm2,
            reinforcement_ratio: rho,
            governed_by_minimum,
            design_capacity_knm: KilonewtonMeters::from(NewtonMillimeters(capacity)).value(),
            estimated_cost: cost.total,
            cost,
            suggested_bars: select_bars(as_mm2, b),
        })
    }
}

/// Search with the default [`OptimizerConfig`].
pub fn search(
    design_moment_knm: f64,
    span_m: f64,
    fc_mpa: f64,
    fy_mpa: f64,
    rates: &MaterialCostRates,
) -> CalcResult<Vec<SectionCandidate>> {
    SectionCostOptimizer::default().search(design_moment_knm, span_m, fc_mpa, fy_mpa, rates)
}
