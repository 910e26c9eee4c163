//! Site coefficients Fa and Fv and the design spectral parameters derived from them.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::equations::interp_clamped;
use crate::equations::sni_ref;
use crate::validation::{parse_acceleration, sanitize_acceleration, InputPolicy, Validated};

use super::site_class::{SiteClass, S1_BREAKPOINTS, SS_BREAKPOINTS};

/// Mapped ground motion at the site.
///
/// The constructors and deserialization clamp negative or non-finite
/// accelerations to zero. A struct literal is taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "GroundMotionRecord")]
pub struct SiteGroundMotion {
    /// Short-period (0.2 s) MCE_R spectral acceleration Ss (g)
    pub ss: f64,
    /// 1-second MCE_R spectral acceleration S1 (g)
    pub s1: f64,
    /// Site class
    pub site_class: SiteClass,
}

#[derive(Deserialize)]
struct GroundMotionRecord {
    ss: f64,
    s1: f64,
    site_class: SiteClass,
}

impl From<GroundMotionRecord> for SiteGroundMotion {
    fn from(record: GroundMotionRecord) -> Self {
        SiteGroundMotion::new(record.ss, record.s1, record.site_class)
    }
}

impl SiteGroundMotion {
    /// Build from numeric values, clamping negative or non-finite accelerations to zero.
    pub fn new(ss: f64, s1: f64, site_class: SiteClass) -> Self {
        let ss = sanitize_acceleration("Ss", ss);
        let s1 = sanitize_acceleration("S1", s1);
        SiteGroundMotion {
            ss: ss.value().copied().unwrap_or(0.0),
            s1: s1.value().copied().unwrap_or(0.0),
            site_class,
        }
    }

    /// Build from raw text fields.
    ///
    /// Every substitution (non-numeric acceleration, unrecognized class) is
    /// collected into the `Defaulted` reason. Under [`InputPolicy::Strict`]
    /// any substitution rejects the whole record.
    pub fn from_raw(ss: &str, s1: &str, site_class: &str, policy: InputPolicy) -> Validated<Self> {
        Self::assemble(
            parse_acceleration("Ss", ss),
            parse_acceleration("S1", s1),
            SiteClass::parse(site_class),
            policy,
        )
    }

    /// Build from numeric accelerations and a site-class code, reporting
    /// substitutions the same way as [`SiteGroundMotion::from_raw`].
    pub fn from_parts(ss: f64, s1: f64, site_class: &str, policy: InputPolicy) -> Validated<Self> {
        Self::assemble(
            sanitize_acceleration("Ss", ss),
            sanitize_acceleration("S1", s1),
            SiteClass::parse(site_class),
            policy,
        )
    }

    fn assemble(
        ss: Validated<f64>,
        s1: Validated<f64>,
        class: Validated<SiteClass>,
        policy: InputPolicy,
    ) -> Validated<Self> {
        let ss = policy.apply(ss);
        let s1 = policy.apply(s1);
        let class = policy.apply(class);

        let reasons: Vec<String> = [ss.reason(), s1.reason(), class.reason()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        match (ss.value(), s1.value(), class.value()) {
            (Some(&ss), Some(&s1), Some(&site_class)) => {
                let motion = SiteGroundMotion { ss, s1, site_class };
                if reasons.is_empty() {
                    Validated::accepted(motion)
                } else {
                    warn!("Ground motion input coerced: {}", reasons.join("; "));
                    Validated::defaulted(motion, reasons.join("; "))
                }
            }
            _ => Validated::rejected(reasons.join("; ")),
        }
    }
}

/// Site amplification coefficients with an advisory note.
///
/// When `requires_site_specific_analysis` is set the caller must not use the
/// coefficients for final design; for class SF they are zero sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCoefficients {
    /// Site class the coefficients were taken from (after any defaulting)
    pub site_class: SiteClass,
    /// Short-period amplification factor Fa
    pub fa: f64,
    /// Long-period amplification factor Fv
    pub fv: f64,
    /// Plain-text caveat, never an error
    pub note: String,
    /// Site-specific response analysis is mandatory
    pub requires_site_specific_analysis: bool,
}

impl SiteCoefficients {
    /// True when coefficients were refused (class SF) rather than computed
    pub fn is_refused(&self) -> bool {
        self.site_class == SiteClass::SpecialSoil
    }
}

/// Compute Fa and Fv from raw site-class text.
///
/// Unrecognized classes fall back to SD (medium soil), and negative or
/// non-finite accelerations are treated as zero. The note names every
/// substitution.
///
/// # Example
///
/// ```rust
/// use sipil_core::seismic::compute_site_coefficients;
///
/// let c = compute_site_coefficients(0.75, 0.35, "SD");
/// assert!((c.fa - 1.2).abs() < 1e-12);
/// assert!((c.fv - 1.7).abs() < 1e-12);
/// ```
pub fn compute_site_coefficients(ss: f64, s1: f64, site_class: &str) -> SiteCoefficients {
    let validated = SiteGroundMotion::from_parts(ss, s1, site_class, InputPolicy::Permissive);
    let motion = validated
        .value()
        .copied()
        .unwrap_or_else(|| SiteGroundMotion::new(ss, s1, SiteClass::FALLBACK));
    let mut coefficients = site_coefficients(&motion);
    if let Some(reason) = validated.reason() {
        coefficients.note = format!("{}. {}", reason, coefficients.note);
    }
    coefficients
}

/// Compute Fa and Fv for a typed ground motion record.
pub fn site_coefficients(motion: &SiteGroundMotion) -> SiteCoefficients {
    let class = motion.site_class;
    let Some((fa_row, fv_row)) = class.coefficient_rows() else {
        warn!("Site class SF: automatic site coefficients refused");
        return SiteCoefficients {
            site_class: class,
            fa: 0.0,
            fv: 0.0,
            note: format!(
                "Site class SF (special soil): site-specific response analysis is mandatory ({}); \
                 Fa and Fv are not computed",
                sni_ref::SITE_SPECIFIC
            ),
            requires_site_specific_analysis: true,
        };
    };

    let fa = interp_clamped(motion.ss, &SS_BREAKPOINTS, fa_row);
    let fv = interp_clamped(motion.s1, &S1_BREAKPOINTS, fv_row);
    debug!(
        "Site coefficients for {}: Ss={} -> Fa={}, S1={} -> Fv={}",
        class.code(),
        motion.ss,
        fa,
        motion.s1,
        fv
    );

    let escalate = class == SiteClass::SoftSoil && (motion.ss >= 1.0 || motion.s1 >= 0.2);
    let note = if escalate {
        warn!("Soft soil under strong shaking: site-specific analysis required");
        format!(
            "Site class SE with Ss = {:.3} g, S1 = {:.3} g: site-specific response analysis is \
             mandatory ({}); tabulated Fa/Fv are indicative only",
            motion.ss,
            motion.s1,
            sni_ref::SITE_SPECIFIC
        )
    } else {
        format!(
            "Fa interpolated from {}, Fv from {} for site class {}",
            sni_ref::FA_TABLE,
            sni_ref::FV_TABLE,
            class.code()
        )
    };

    SiteCoefficients {
        site_class: class,
        fa,
        fv,
        note,
        requires_site_specific_analysis: escalate,
    }
}

/// Design spectral parameters (SNI 1726:2012 Pasal 6.2 - 6.4).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignSpectrumParameters {
    /// MCE_R short-period acceleration adjusted for site class, Sms = Fa·Ss (g)
    pub sms: f64,
    /// MCE_R 1-second acceleration adjusted for site class, Sm1 = Fv·S1 (g)
    pub sm1: f64,
    /// Design short-period spectral acceleration Sds = 2/3·Sms (g)
    pub sds: f64,
    /// Design 1-second spectral acceleration Sd1 = 2/3·Sm1 (g)
    pub sd1: f64,
    /// Start of the plateau T0 = 0.2·Sd1/Sds (s)
    pub t0: f64,
    /// End of the plateau Ts = Sd1/Sds (s)
    pub ts: f64,
}

/// Derive Sds, Sd1, T0 and Ts.
///
/// T0 and Ts are defined as 0 when Sds is 0.
pub fn derive_design_parameters(ss: f64, s1: f64, fa: f64, fv: f64) -> DesignSpectrumParameters {
    let sms = fa * ss;
    let sm1 = fv * s1;
    let sds = 2.0 / 3.0 * sms;
    let sd1 = 2.0 / 3.0 * sm1;
    let (t0, ts) = if sds == 0.0 {
        (0.0, 0.0)
    } else {
        (0.2 * sd1 / sds, sd1 / sds)
    };
    DesignSpectrumParameters {
        sms,
        sm1,
        sds,
        sd1,
        t0,
        ts,
    }
}

impl DesignSpectrumParameters {
    /// Convenience: derive from a ground motion record and its coefficients
    pub fn from_coefficients(motion: &SiteGroundMotion, coefficients: &SiteCoefficients) -> Self {
        derive_design_parameters(motion.ss, motion.s1, coefficients.fa, coefficients.fv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_medium_soil_example() {
        let c = compute_site_coefficients(0.75, 0.35, "medium soil");
        assert_eq!(c.site_class, SiteClass::MediumSoil);
        assert_abs_diff_eq!(c.fa, 1.2, epsilon = 1e-12);
        // Halfway between 0.3 -> 1.8 and 0.4 -> 1.6
        assert_abs_diff_eq!(c.fv, 1.7, epsilon = 1e-12);
        assert!(!c.requires_site_specific_analysis);

        let p = derive_design_parameters(0.75, 0.35, c.fa, c.fv);
        assert_abs_diff_eq!(p.sms, 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(p.sds, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(p.sm1, 0.595, epsilon = 1e-12);
        assert_abs_diff_eq!(p.sd1, 0.595 * 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.ts, p.sd1 / 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(p.t0, 0.2 * p.ts, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_class_defaults_to_sd() {
        for raw in ["", "XX", "lempung", "G"] {
            let c = compute_site_coefficients(0.75, 0.35, raw);
            assert_eq!(c.site_class, SiteClass::MediumSoil);
            assert!(c.note.contains("not recognized"));
            assert_abs_diff_eq!(c.fa, 1.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_special_soil_refused() {
        for (ss, s1) in [(0.0, 0.0), (0.5, 0.2), (2.0, 1.0)] {
            let c = compute_site_coefficients(ss, s1, "SF");
            assert_eq!(c.fa, 0.0);
            assert_eq!(c.fv, 0.0);
            assert!(c.is_refused());
            assert!(c.requires_site_specific_analysis);
            assert!(c.note.contains("site-specific response analysis is mandatory"));
        }
    }

    #[test]
    fn test_soft_soil_escalation() {
        let mild = compute_site_coefficients(0.5, 0.1, "SE");
        assert!(!mild.requires_site_specific_analysis);

        let strong = compute_site_coefficients(1.0, 0.1, "SE");
        assert!(strong.requires_site_specific_analysis);
        assert!(strong.note.contains("mandatory"));
        assert_abs_diff_eq!(strong.fa, 0.9, epsilon = 1e-12);

        let long_period = compute_site_coefficients(0.3, 0.2, "SE");
        assert!(long_period.requires_site_specific_analysis);
        assert_abs_diff_eq!(long_period.fv, 3.2, epsilon = 1e-12);
    }

    #[test]
    fn test_coefficients_bounded_by_table_rows() {
        for class in ["SA", "SB", "SC", "SD", "SE"] {
            let parsed = SiteClass::from_str_flexible(class).unwrap();
            let (fa_row, fv_row) = parsed.coefficient_rows().unwrap();
            let fa_min = fa_row.iter().cloned().fold(f64::INFINITY, f64::min);
            let fa_max = fa_row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let fv_min = fv_row.iter().cloned().fold(f64::INFINITY, f64::min);
            let fv_max = fv_row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mut previous_fa = f64::INFINITY;
            for i in 0..=40 {
                let x = i as f64 * 0.05;
                let c = compute_site_coefficients(x, x, class);
                assert!(c.fa >= fa_min - 1e-12 && c.fa <= fa_max + 1e-12);
                assert!(c.fv >= fv_min - 1e-12 && c.fv <= fv_max + 1e-12);
                // All Fa rows are non-increasing in Ss
                assert!(c.fa <= previous_fa + 1e-12);
                previous_fa = c.fa;
            }
        }
    }

    #[test]
    fn test_zero_coefficients_do_not_divide_by_zero() {
        let p = derive_design_parameters(1.0, 0.5, 0.0, 0.0);
        assert_eq!(p, DesignSpectrumParameters::default());
    }

    #[test]
    fn test_negative_input_clamped() {
        let c = compute_site_coefficients(-1.0, -0.5, "SC");
        assert_abs_diff_eq!(c.fa, 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(c.fv, 1.7, epsilon = 1e-12);
        assert!(c.note.contains("Ss = -1 is negative"));
        assert!(c.note.contains("S1 = -0.5 is negative"));
    }

    #[test]
    fn test_non_finite_input_reported_in_note() {
        let c = compute_site_coefficients(-1.0, f64::NAN, "SC");
        assert!(c.note.contains("Ss"));
        assert!(c.note.contains("S1 = NaN is not finite"));

        let clean = compute_site_coefficients(0.75, 0.35, "SC");
        assert!(!clean.note.contains("using 0.0"));
    }

    #[test]
    fn test_deserialized_motion_is_clamped() {
        let json = r#"{"ss":-0.4,"s1":0.3,"site_class":"SD"}"#;
        let motion: SiteGroundMotion = serde_json::from_str(json).unwrap();
        assert_eq!(motion.ss, 0.0);
        assert_eq!(motion.s1, 0.3);
        assert_eq!(motion.site_class, SiteClass::MediumSoil);
    }

    #[test]
    fn test_from_raw_reports_every_coercion() {
        let v = SiteGroundMotion::from_raw("abc", "0.3", "ZZ", InputPolicy::Permissive);
        assert!(v.is_defaulted());
        let reason = v.reason().unwrap();
        assert!(reason.contains("Ss"));
        assert!(reason.contains("ZZ"));
        let motion = v.value().unwrap();
        assert_eq!(motion.ss, 0.0);
        assert_eq!(motion.s1, 0.3);
        assert_eq!(motion.site_class, SiteClass::MediumSoil);
    }

    #[test]
    fn test_from_raw_strict() {
        let v = SiteGroundMotion::from_raw("abc", "0.3", "SD", InputPolicy::Strict);
        assert!(v.is_rejected());
        let ok = SiteGroundMotion::from_raw("0.8", "0.3", "SC", InputPolicy::Strict);
        assert!(ok.is_accepted());
    }

    #[test]
    fn test_from_parts_negative_value() {
        let permissive = SiteGroundMotion::from_parts(-0.4, 0.3, "SD", InputPolicy::Permissive);
        assert!(permissive.is_defaulted());
        assert_eq!(permissive.value().unwrap().ss, 0.0);

        let strict = SiteGroundMotion::from_parts(-0.4, 0.3, "SD", InputPolicy::Strict);
        assert!(strict.into_result("ground_motion").is_err());
    }
}
