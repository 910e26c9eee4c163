//! # Calculation Requests
//!
//! One tagged enum over every engine, so a batch of mixed calculations can
//! be read from a single JSON document and answered with a matching list.
//!
//! ## JSON Example
//!
//! ```json
//! [
//!   { "type": "SeismicSpectrum", "label": "Gedung A", "ss": 0.75, "s1": 0.35, "site_class": "SD" },
//!   { "type": "SectionOptimization", "label": "B-1", "design_moment_knm": 150.0,
//!     "span_m": 6.0, "fc_mpa": 25.0, "fy_mpa": 400.0 }
//! ]
//! ```
//!
//! ## Available Calculations
//!
//! - `SeismicSpectrum` - [`crate::seismic`]
//! - `SectionOptimization` - [`crate::optimizer`]
//! - `BearingCapacity` - [`crate::geotech::bearing`]
//! - `PeakDischarge` - [`crate::hydrology::rational`]

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DesignConfig;
use crate::errors::{CalcError, CalcResult};
use crate::geotech::bearing::{self, BearingInput, BearingResult};
use crate::hydrology::rational::{self, RationalInput, RationalResult};
use crate::optimizer::{OptimizationReport, OptimizationRequest, SectionCostOptimizer};
use crate::seismic::{SeismicReport, SeismicRequest, SeismicSpectrumEngine};

/// Enum wrapper for all calculation types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    /// Site coefficients and design response spectrum
    SeismicSpectrum(SeismicRequest),
    /// Cheapest rectangular beam sections for a design moment
    SectionOptimization(OptimizationRequest),
    /// Shallow footing bearing capacity
    BearingCapacity(BearingInput),
    /// Rational method design flood
    PeakDischarge(RationalInput),
}

impl CalculationRequest {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationRequest::SeismicSpectrum(r) => &r.label,
            CalculationRequest::SectionOptimization(r) => &r.label,
            CalculationRequest::BearingCapacity(r) => &r.label,
            CalculationRequest::PeakDischarge(r) => &r.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::SeismicSpectrum(_) => "SeismicSpectrum",
            CalculationRequest::SectionOptimization(_) => "SectionOptimization",
            CalculationRequest::BearingCapacity(_) => "BearingCapacity",
            CalculationRequest::PeakDischarge(_) => "PeakDischarge",
        }
    }

    /// Run the calculation with the shared configuration.
    pub fn run(&self, config: &DesignConfig) -> CalcResult<CalculationOutput> {
        match self {
            CalculationRequest::SeismicSpectrum(request) => {
                SeismicSpectrumEngine::analyze(request, &config.spectrum)
                    .map(CalculationOutput::SeismicSpectrum)
            }
            CalculationRequest::SectionOptimization(request) => {
                let rates = request.cost_rates.unwrap_or(config.cost_rates);
                SectionCostOptimizer::new(config.optimizer)
                    .run(
                        request.design_moment_knm,
                        request.span_m,
                        request.fc_mpa,
                        request.fy_mpa,
                        &rates,
                    )
                    .map(CalculationOutput::SectionOptimization)
            }
            CalculationRequest::BearingCapacity(input) => {
                bearing::calculate(input).map(CalculationOutput::BearingCapacity)
            }
            CalculationRequest::PeakDischarge(input) => {
                rational::calculate(input).map(CalculationOutput::PeakDischarge)
            }
        }
    }
}

/// Result of a [`CalculationRequest`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    SeismicSpectrum(SeismicReport),
    SectionOptimization(OptimizationReport),
    BearingCapacity(BearingResult),
    PeakDischarge(RationalResult),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<CalculationRequest>),
    One(Box<CalculationRequest>),
}

/// Parse a JSON document holding one request or an array of requests.
pub fn parse_requests(json: &str) -> CalcResult<Vec<CalculationRequest>> {
    let parsed: OneOrMany = serde_json::from_str(json).map_err(|e| {
        CalcError::SerializationError {
            reason: format!("Invalid calculation request: {}", e),
        }
    })?;
    Ok(match parsed {
        OneOrMany::Many(requests) => requests,
        OneOrMany::One(request) => vec![*request],
    })
}

/// Read requests from a JSON file.
pub fn load_requests(path: &Path) -> CalcResult<Vec<CalculationRequest>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;
    parse_requests(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_array() {
        let single = r#"{"type":"PeakDischarge","label":"D","runoff_coefficient":0.5,
            "catchment_area_km2":1.0,"rainfall_24h_mm":100.0,
            "channel_length_m":500.0,"channel_slope":0.02}"#;
        let requests = parse_requests(single).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].calc_type(), "PeakDischarge");
        assert_eq!(requests[0].label(), "D");

        let many = format!("[{single},{single}]");
        assert_eq!(parse_requests(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = parse_requests(r#"{"type":"Truss","label":"T"}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_dispatch_seismic() {
        let request = CalculationRequest::SeismicSpectrum(SeismicRequest::new("G", 0.75, 0.35, "SD"));
        match request.run(&DesignConfig::default()).unwrap() {
            CalculationOutput::SeismicSpectrum(report) => {
                assert_eq!(report.label, "G");
                assert_eq!(report.curve.len(), 100);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_uses_config_and_request_rates() {
        let request = OptimizationRequest {
            label: "B-1".to_string(),
            design_moment_knm: 150.0,
            span_m: 6.0,
            fc_mpa: 25.0,
            fy_mpa: 400.0,
            cost_rates: None,
        };
        let mut config = DesignConfig::default();
        config.optimizer.top_n = 2;
        let output = CalculationRequest::SectionOptimization(request).run(&config).unwrap();
        match output {
            CalculationOutput::SectionOptimization(report) => {
                assert_eq!(report.candidates.len(), 2);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_output_is_tagged() {
        let request = CalculationRequest::PeakDischarge(RationalInput {
            label: "D".to_string(),
            runoff_coefficient: 0.5,
            catchment_area_km2: 1.0,
            rainfall_24h_mm: 100.0,
            channel_length_m: 500.0,
            channel_slope: 0.02,
        });
        let output = request.run(&DesignConfig::default()).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "PeakDischarge");
        assert!(json["peak_discharge_m3_s"].as_f64().unwrap() > 0.0);
    }
}
