//! Cross-check of a claimed site class against measured soil data (SNI 1726:2012 Tabel 3).
//!
//! The check is advisory: a contradiction never blocks the spectrum calculation.

use std::ops::{Bound, RangeBounds};

use log::warn;
use serde::{Deserialize, Serialize};

use super::site_class::SiteClass;

/// Measured soil parameters for the top 30 m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilData {
    /// Average SPT blow count N̄
    pub n_spt: f64,
    /// Average shear wave velocity V̄s30 (m/s)
    #[serde(default)]
    pub vs30: Option<f64>,
    /// Average undrained shear strength S̄u (kPa)
    #[serde(default)]
    pub su: Option<f64>,
}

/// Outcome of the plausibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilCheck {
    /// True when no measured value contradicts the claimed class
    pub is_consistent: bool,
    /// Diagnostic naming every contradiction, or a confirmation
    pub message: String,
    /// Class implied by the measurements, when one can be inferred
    pub suggested_class: Option<SiteClass>,
}

type Band = (Bound<f64>, Bound<f64>);

/// Vs30, N and Su bands for one class; `None` where the parameter does not apply.
struct ClassBands {
    vs30: Option<Band>,
    n_spt: Option<Band>,
    su: Option<Band>,
}

fn bands_for(class: SiteClass) -> Option<ClassBands> {
    use Bound::{Excluded, Included, Unbounded};
    let bands = match class {
        SiteClass::HardRock => ClassBands {
            vs30: Some((Excluded(1500.0), Unbounded)),
            n_spt: Some((Excluded(50.0), Unbounded)),
            su: None,
        },
        SiteClass::Rock => ClassBands {
            vs30: Some((Excluded(750.0), Included(1500.0))),
            n_spt: Some((Excluded(50.0), Unbounded)),
            su: None,
        },
        SiteClass::VeryDenseSoil => ClassBands {
            vs30: Some((Excluded(350.0), Included(750.0))),
            n_spt: Some((Excluded(50.0), Unbounded)),
            su: Some((Included(100.0), Unbounded)),
        },
        SiteClass::MediumSoil => ClassBands {
            vs30: Some((Included(175.0), Included(350.0))),
            n_spt: Some((Included(15.0), Included(50.0))),
            su: Some((Included(50.0), Included(100.0))),
        },
        SiteClass::SoftSoil => ClassBands {
            vs30: Some((Unbounded, Excluded(175.0))),
            n_spt: Some((Unbounded, Excluded(15.0))),
            su: Some((Unbounded, Excluded(50.0))),
        },
        SiteClass::SpecialSoil => return None,
    };
    Some(bands)
}

fn describe(name: &str, band: &Band) -> String {
    let lower = match band.0 {
        Bound::Included(v) => Some(format!("{v} ≤ ")),
        Bound::Excluded(v) => Some(format!("{v} < ")),
        Bound::Unbounded => None,
    };
    let upper = match band.1 {
        Bound::Included(v) => Some(format!(" ≤ {v}")),
        Bound::Excluded(v) => Some(format!(" < {v}")),
        Bound::Unbounded => None,
    };
    format!(
        "{}{}{}",
        lower.unwrap_or_default(),
        name,
        upper.unwrap_or_default()
    )
}

/// Infer a class from measurements: Vs30 when available, otherwise N-SPT.
pub fn suggest_site_class(n_spt: f64, vs30: Option<f64>) -> Option<SiteClass> {
    if let Some(vs) = vs30.filter(|v| v.is_finite() && *v > 0.0) {
        return Some(match vs {
            v if v > 1500.0 => SiteClass::HardRock,
            v if v > 750.0 => SiteClass::Rock,
            v if v > 350.0 => SiteClass::VeryDenseSoil,
            v if v >= 175.0 => SiteClass::MediumSoil,
            _ => SiteClass::SoftSoil,
        });
    }
    if !n_spt.is_finite() || n_spt < 0.0 {
        return None;
    }
    Some(match n_spt {
        n if n > 50.0 => SiteClass::VeryDenseSoil,
        n if n >= 15.0 => SiteClass::MediumSoil,
        _ => SiteClass::SoftSoil,
    })
}

/// Check measured soil parameters against the claimed site class.
///
/// # Example
///
/// ```rust
/// use sipil_core::seismic::{check_soil_plausibility, SiteClass};
///
/// let check = check_soil_plausibility(SiteClass::SoftSoil, 25.0, Some(260.0), None);
/// assert!(!check.is_consistent);
/// assert_eq!(check.suggested_class, Some(SiteClass::MediumSoil));
/// ```
pub fn check_soil_plausibility(
    site_class: SiteClass,
    n_spt: f64,
    vs30: Option<f64>,
    su: Option<f64>,
) -> SoilCheck {
    let suggested_class = suggest_site_class(n_spt, vs30);

    let Some(bands) = bands_for(site_class) else {
        return SoilCheck {
            is_consistent: true,
            message: "Site class SF has no numeric soil band; a site-specific geotechnical \
                      investigation is required"
                .to_string(),
            suggested_class,
        };
    };

    let mut violations = Vec::new();

    if !n_spt.is_finite() || n_spt < 0.0 {
        violations.push(format!("N-SPT = {n_spt} is not a valid blow count"));
    } else if let Some(band) = &bands.n_spt {
        if !band.contains(&n_spt) {
            violations.push(format!(
                "N-SPT = {n_spt} outside {}",
                describe("N", band)
            ));
        }
    }

    if let (Some(vs), Some(band)) = (vs30, &bands.vs30) {
        if !band.contains(&vs) {
            violations.push(format!(
                "Vs30 = {vs} m/s outside {} m/s",
                describe("Vs30", band)
            ));
        }
    }

    if let (Some(su), Some(band)) = (su, &bands.su) {
        if !band.contains(&su) {
            violations.push(format!("Su = {su} kPa outside {} kPa", describe("Su", band)));
        }
    }

    if violations.is_empty() {
        SoilCheck {
            is_consistent: true,
            message: format!("Soil data consistent with site class {}", site_class),
            suggested_class,
        }
    } else {
        let message = format!(
            "Soil data contradicts site class {}: {}",
            site_class.code(),
            violations.join("; ")
        );
        warn!("{}", message);
        SoilCheck {
            is_consistent: false,
            message,
            suggested_class,
        }
    }
}
