//! Risk category and seismic design category (SNI 1726:2012 Tabel 1, 2, 6, 7).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Building risk category (kategori risiko)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Low hazard to human life (agricultural, temporary)
    I,
    /// Ordinary buildings
    II,
    /// Substantial hazard (schools, assembly)
    III,
    /// Essential facilities (hospitals, emergency response)
    IV,
}

impl RiskCategory {
    /// Seismic importance factor Ie (SNI 1726:2012 Tabel 2)
    pub fn importance_factor(&self) -> f64 {
        match self {
            RiskCategory::I | RiskCategory::II => 1.0,
            RiskCategory::III => 1.25,
            RiskCategory::IV => 1.5,
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "I" | "1" => Ok(RiskCategory::I),
            "II" | "2" => Ok(RiskCategory::II),
            "III" | "3" => Ok(RiskCategory::III),
            "IV" | "4" => Ok(RiskCategory::IV),
            _ => Err(CalcError::unknown_code(s)),
        }
    }
}

/// Seismic design category (kategori desain seismik), A least to F most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeismicDesignCategory {
    A,
    B,
    C,
    D,
    E,
    F,
}

fn category_from_sds(sds: f64, essential: bool) -> SeismicDesignCategory {
    use SeismicDesignCategory::*;
    match sds {
        v if v < 0.167 => A,
        v if v < 0.33 => if essential { C } else { B },
        v if v < 0.50 => if essential { D } else { C },
        _ => D,
    }
}

fn category_from_sd1(sd1: f64, essential: bool) -> SeismicDesignCategory {
    use SeismicDesignCategory::*;
    match sd1 {
        v if v < 0.067 => A,
        v if v < 0.133 => if essential { C } else { B },
        v if v < 0.20 => if essential { D } else { C },
        _ => D,
    }
}

/// Governing design category: the more severe of the Sds and Sd1 tables.
///
/// Sites with `S1 ≥ 0.75 g` are category E (risk I-III) or F (risk IV)
/// regardless of the tables.
pub fn seismic_design_category(
    sds: f64,
    sd1: f64,
    s1: f64,
    risk: RiskCategory,
) -> SeismicDesignCategory {
    let essential = risk == RiskCategory::IV;
    if s1 >= 0.75 {
        return if essential {
            SeismicDesignCategory::F
        } else {
            SeismicDesignCategory::E
        };
    }
    category_from_sds(sds, essential).max(category_from_sd1(sd1, essential))
}
