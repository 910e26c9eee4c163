//! # Design Response Spectrum
//!
//! Piecewise design spectrum per SNI 1726:2012 Pasal 6.4:
//!
//! ```text
//!   Sa
//!    │     ┌──────────┐  Sds
//!    │    /│          │╲
//!    │   / │          │ ╲  Sd1 / T
//!    │  /  │          │  ╲_
//!    │ 0.4·Sds        │     ‾‾──___
//!    └─────┴──────────┴────────────── T
//!          T0         Ts
//! ```
//!
//! A [`SpectrumCurve`] holds no sample buffer; every call to
//! [`SpectrumCurve::points`] re-evaluates the law from the parameters.

use serde::{Deserialize, Serialize};

use super::coefficients::DesignSpectrumParameters;

/// Default number of period samples
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Default upper period bound (s)
pub const DEFAULT_T_MAX: f64 = 4.0;

/// One sample of the design spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Period T (s)
    pub period: f64,
    /// Design spectral acceleration Sa (g)
    pub acceleration: f64,
}

/// Design spectrum sampled at `num_points` evenly spaced periods over `[0, t_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumCurve {
    /// Sds, Sd1, T0 and Ts the curve is evaluated from
    pub parameters: DesignSpectrumParameters,
    /// Number of samples yielded by [`SpectrumCurve::points`]
    pub num_points: usize,
    /// Last sampled period (s)
    pub t_max: f64,
}

impl SpectrumCurve {
    pub fn new(parameters: DesignSpectrumParameters, num_points: usize, t_max: f64) -> Self {
        SpectrumCurve {
            parameters,
            num_points,
            t_max,
        }
    }

    /// Curve with the default sampling (100 points up to 4 s)
    pub fn with_defaults(parameters: DesignSpectrumParameters) -> Self {
        Self::new(parameters, DEFAULT_NUM_POINTS, DEFAULT_T_MAX)
    }

    /// Design spectral acceleration at period `t`.
    ///
    /// - `t < T0`: `Sds·(0.4 + 0.6·T/T0)`
    /// - `T0 ≤ t ≤ Ts`: `Sds`
    /// - `t > Ts`: `Sd1/T`
    ///
    /// With `Sds = 0` and `Sd1 > 0` (for instance `Ss = 0`) both corner
    /// periods are zero, so Sa is 0 at `T = 0` and `Sd1/T` for every `T > 0`,
    /// unbounded as T approaches zero. Treat such ground motion as suspect.
    pub fn acceleration_at(&self, t: f64) -> f64 {
        let p = &self.parameters;
        if t < p.t0 {
            p.sds * (0.4 + 0.6 * t / p.t0)
        } else if t <= p.ts {
            p.sds
        } else {
            p.sd1 / t
        }
    }

    /// Lazily evaluated samples; each call starts over from `T = 0`.
    pub fn points(&self) -> impl Iterator<Item = SpectrumPoint> {
        let curve = *self;
        let n = self.num_points;
        let step = if n > 1 {
            self.t_max / (n - 1) as f64
        } else {
            0.0
        };
        (0..n).map(move |i| {
            let period = step * i as f64;
            SpectrumPoint {
                period,
                acceleration: curve.acceleration_at(period),
            }
        })
    }

    /// Highest sampled acceleration, `None` for an empty curve
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.points()
            .fold(None, |best: Option<SpectrumPoint>, p| match best {
                Some(b) if b.acceleration >= p.acceleration => Some(b),
                _ => Some(p),
            })
    }
}

/// Sample the design spectrum into a vector.
///
/// # Example
///
/// ```rust
/// use sipil_core::seismic::{derive_design_parameters, generate_spectrum_curve};
///
/// let params = derive_design_parameters(0.75, 0.35, 1.2, 1.7);
/// let curve = generate_spectrum_curve(&params, 100, 4.0);
/// assert_eq!(curve.len(), 100);
/// assert_eq!(curve[0].period, 0.0);
/// assert!((curve[0].acceleration - 0.4 * params.sds).abs() < 1e-12);
/// ```
pub fn generate_spectrum_curve(
    parameters: &DesignSpectrumParameters,
    num_points: usize,
    t_max: f64,
) -> Vec<SpectrumPoint> {
    SpectrumCurve::new(*parameters, num_points, t_max)
        .points()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seismic::coefficients::derive_design_parameters;
    use approx::assert_abs_diff_eq;

    fn medium_soil_params() -> DesignSpectrumParameters {
        derive_design_parameters(0.75, 0.35, 1.2, 1.7)
    }

    #[test]
    fn test_sample_count_and_bounds() {
        let curve = SpectrumCurve::with_defaults(medium_soil_params());
        let points: Vec<_> = curve.points().collect();
        assert_eq!(points.len(), 100);
        assert_eq!(points[0].period, 0.0);
        assert_abs_diff_eq!(points[99].period, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accelerations_non_negative() {
        for params in [medium_soil_params(), DesignSpectrumParameters::default()] {
            let curve = SpectrumCurve::with_defaults(params);
            assert!(curve.points().all(|p| p.acceleration >= 0.0));
        }
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        let params = medium_soil_params();
        let curve = SpectrumCurve::with_defaults(params);
        let eps = 1e-9;
        assert_abs_diff_eq!(
            curve.acceleration_at(params.t0 - eps),
            curve.acceleration_at(params.t0 + eps),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            curve.acceleration_at(params.ts - eps),
            curve.acceleration_at(params.ts + eps),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_regions() {
        let params = medium_soil_params();
        let curve = SpectrumCurve::with_defaults(params);
        assert_abs_diff_eq!(curve.acceleration_at(0.0), 0.24, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.acceleration_at((params.t0 + params.ts) / 2.0), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.acceleration_at(2.0), params.sd1 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_restartable() {
        let curve = SpectrumCurve::with_defaults(medium_soil_params());
        let first: Vec<_> = curve.points().collect();
        let second: Vec<_> = curve.points().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_parameters() {
        let curve = generate_spectrum_curve(&DesignSpectrumParameters::default(), 10, 4.0);
        assert!(curve.iter().all(|p| p.acceleration == 0.0));
    }

    #[test]
    fn test_zero_sd1_with_nonzero_sds() {
        let params = derive_design_parameters(1.0, 0.0, 1.0, 1.0);
        assert_eq!(params.ts, 0.0);
        let curve = SpectrumCurve::new(params, 5, 4.0);
        assert_abs_diff_eq!(curve.acceleration_at(0.0), params.sds, epsilon = 1e-12);
        assert_eq!(curve.acceleration_at(1.0), 0.0);
    }

    #[test]
    fn test_zero_sds_with_nonzero_sd1() {
        let params = derive_design_parameters(0.0, 0.5, 1.6, 1.5);
        assert_eq!((params.sds, params.t0, params.ts), (0.0, 0.0, 0.0));
        assert_abs_diff_eq!(params.sd1, 0.5, epsilon = 1e-12);

        let curve = SpectrumCurve::new(params, 5, 4.0);
        assert_eq!(curve.acceleration_at(0.0), 0.0);
        assert_abs_diff_eq!(curve.acceleration_at(0.05), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(curve.acceleration_at(1.0), 0.5, epsilon = 1e-12);
        assert!(curve.points().all(|p| p.acceleration.is_finite()));
    }

    #[test]
    fn test_peak_is_plateau() {
        let params = medium_soil_params();
        let peak = SpectrumCurve::with_defaults(params).peak().unwrap();
        assert_abs_diff_eq!(peak.acceleration, params.sds, epsilon = 1e-12);
        assert!(SpectrumCurve::new(params, 0, 4.0).peak().is_none());
    }

    #[test]
    fn test_single_point() {
        let curve = generate_spectrum_curve(&medium_soil_params(), 1, 4.0);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].period, 0.0);
    }
}
