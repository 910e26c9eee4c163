//! Unit-length cost of a reinforced concrete beam.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::equations::section::{formwork_perimeter, rectangular_area};
use crate::errors::{require_non_negative, CalcError, CalcResult};
use crate::units::{Meters, Millimeters, SqM, SqMm};

/// Unit prices supplied by the caller (Rupiah by default, any currency works).
///
/// ## JSON Example
///
/// ```json
/// { "concrete_per_m3": 1100000.0, "steel_per_kg": 15000.0, "formwork_per_m2": 150000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialCostRates {
    /// Ready-mix concrete, placed (per m³)
    pub concrete_per_m3: f64,
    /// Reinforcing steel, cut and bent (per kg)
    pub steel_per_kg: f64,
    /// Formwork, erected and stripped (per m² of contact area)
    pub formwork_per_m2: f64,
}

impl Default for MaterialCostRates {
    fn default() -> Self {
        MaterialCostRates {
            concrete_per_m3: 1_100_000.0,
            steel_per_kg: 15_000.0,
            formwork_per_m2: 150_000.0,
        }
    }
}

impl MaterialCostRates {
    /// Keys accepted by [`MaterialCostRates::from_map`]
    pub const KEYS: [&'static str; 3] = ["concrete", "steel", "formwork"];

    /// Build from a price mapping keyed by `concrete`, `steel` and `formwork`.
    ///
    /// Every key is required; unknown keys are rejected so typos surface.
    pub fn from_map(prices: &HashMap<String, f64>) -> CalcResult<Self> {
        if let Some(unknown) = prices.keys().find(|k| !Self::KEYS.contains(&k.as_str())) {
            return Err(CalcError::invalid_input(
                "cost_rates",
                unknown.clone(),
                "Unknown cost key; expected concrete, steel or formwork",
            ));
        }
        let get = |key: &str| {
            prices
                .get(key)
                .copied()
                .ok_or_else(|| CalcError::missing_field(format!("cost_rates.{key}")))
        };
        let rates = MaterialCostRates {
            concrete_per_m3: get("concrete")?,
            steel_per_kg: get("steel")?,
            formwork_per_m2: get("formwork")?,
        };
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("cost_rates.concrete_per_m3", self.concrete_per_m3)?;
        require_non_negative("cost_rates.steel_per_kg", self.steel_per_kg)?;
        require_non_negative("cost_rates.formwork_per_m2", self.formwork_per_m2)?;
        Ok(())
    }
}

/// Itemised cost per metre run of beam.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Concrete volume per metre (m³/m)
    pub concrete_volume_m3: f64,
    /// Steel mass per metre including laps and waste (kg/m)
    pub steel_mass_kg: f64,
    /// Formwork contact area per metre (m²/m)
    pub formwork_area_m2: f64,
    pub concrete_cost: f64,
    pub steel_cost: f64,
    pub formwork_cost: f64,
    pub total: f64,
}

/// Quantity take-off and pricing for a `b × h` beam with `as_mm2` of tension steel.
pub fn estimate_unit_cost(
    width_mm: f64,
    height_mm: f64,
    as_mm2: f64,
    steel_density_kg_m3: f64,
    steel_waste_factor: f64,
    rates: &MaterialCostRates,
) -> CostBreakdown {
    // Cross-section area in m² equals volume per metre run in m³
    let concrete_volume_m3 = SqM::from(SqMm(rectangular_area(width_mm, height_mm))).value();
    let steel_volume_m3 = SqM::from(SqMm(as_mm2)).value();
    let steel_mass_kg = steel_volume_m3 * steel_density_kg_m3 * steel_waste_factor;
    let formwork_area_m2 = Meters::from(Millimeters(formwork_perimeter(width_mm, height_mm))).value();

    let concrete_cost = concrete_volume_m3 * rates.concrete_per_m3;
    let steel_cost = steel_mass_kg * rates.steel_per_kg;
    let formwork_cost = formwork_area_m2 * rates.formwork_per_m2;

    CostBreakdown {
        concrete_volume_m3,
        steel_mass_kg,
        formwork_area_m2,
        concrete_cost,
        steel_cost,
        formwork_cost,
        total: concrete_cost + steel_cost + formwork_cost,
    }
}
