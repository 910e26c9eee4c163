//! Site classes and the site-coefficient tables (SNI 1726:2012 Tabel 3-5).
//!
//! Tables are compile-time constants and never mutated.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::Validated;

/// Site class per SNI 1726:2012 Tabel 3, from hard rock to special soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SiteClass {
    /// Hard rock (batuan keras)
    #[serde(rename = "SA")]
    HardRock,
    /// Rock (batuan)
    #[serde(rename = "SB")]
    Rock,
    /// Very dense soil and soft rock (tanah keras, sangat padat dan batuan lunak)
    #[serde(rename = "SC")]
    VeryDenseSoil,
    /// Medium soil (tanah sedang)
    #[serde(rename = "SD")]
    MediumSoil,
    /// Soft soil (tanah lunak)
    #[serde(rename = "SE")]
    SoftSoil,
    /// Special soil requiring site-specific investigation (tanah khusus)
    #[serde(rename = "SF")]
    SpecialSoil,
}

impl SiteClass {
    /// All site classes in order of decreasing stiffness
    pub const ALL: [SiteClass; 6] = [
        SiteClass::HardRock,
        SiteClass::Rock,
        SiteClass::VeryDenseSoil,
        SiteClass::MediumSoil,
        SiteClass::SoftSoil,
        SiteClass::SpecialSoil,
    ];

    /// Class used when the input does not name a recognized class
    pub const FALLBACK: SiteClass = SiteClass::MediumSoil;

    /// Two-letter code ("SA" .. "SF")
    pub fn code(&self) -> &'static str {
        match self {
            SiteClass::HardRock => "SA",
            SiteClass::Rock => "SB",
            SiteClass::VeryDenseSoil => "SC",
            SiteClass::MediumSoil => "SD",
            SiteClass::SoftSoil => "SE",
            SiteClass::SpecialSoil => "SF",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SiteClass::HardRock => "Hard rock",
            SiteClass::Rock => "Rock",
            SiteClass::VeryDenseSoil => "Very dense soil / soft rock",
            SiteClass::MediumSoil => "Medium soil",
            SiteClass::SoftSoil => "Soft soil",
            SiteClass::SpecialSoil => "Special soil",
        }
    }

    /// Parse from codes, single letters and English or Indonesian names.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "SA" | "A" | "HARD ROCK" | "BATUAN KERAS" => Ok(SiteClass::HardRock),
            "SB" | "B" | "ROCK" | "BATUAN" => Ok(SiteClass::Rock),
            "SC" | "C" | "VERY DENSE SOIL" | "SOFT ROCK" | "TANAH KERAS" => {
                Ok(SiteClass::VeryDenseSoil)
            }
            "SD" | "D" | "MEDIUM SOIL" | "STIFF SOIL" | "TANAH SEDANG" => Ok(SiteClass::MediumSoil),
            "SE" | "E" | "SOFT SOIL" | "TANAH LUNAK" => Ok(SiteClass::SoftSoil),
            "SF" | "F" | "SPECIAL SOIL" | "TANAH KHUSUS" => Ok(SiteClass::SpecialSoil),
            _ => Err(CalcError::unknown_code(s)),
        }
    }

    /// Parse permissively: unrecognized input becomes [`SiteClass::FALLBACK`].
    pub fn parse(raw: &str) -> Validated<Self> {
        match Self::from_str_flexible(raw) {
            Ok(class) => Validated::accepted(class),
            Err(_) => Validated::defaulted(
                Self::FALLBACK,
                format!(
                    "Site class '{}' is not recognized; assuming {} ({})",
                    raw.trim(),
                    Self::FALLBACK.code(),
                    Self::FALLBACK.display_name()
                ),
            ),
        }
    }

    /// Fa and Fv rows for this class; `None` for special soil.
    pub fn coefficient_rows(&self) -> Option<(&'static [f64; 5], &'static [f64; 5])> {
        let idx = match self {
            SiteClass::HardRock => 0,
            SiteClass::Rock => 1,
            SiteClass::VeryDenseSoil => 2,
            SiteClass::MediumSoil => 3,
            SiteClass::SoftSoil => 4,
            SiteClass::SpecialSoil => return None,
        };
        Some((&FA_TABLE[idx], &FV_TABLE[idx]))
    }
}

impl std::fmt::Display for SiteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.display_name())
    }
}

/// Ss breakpoints for the Fa table (g)
pub const SS_BREAKPOINTS: [f64; 5] = [0.25, 0.5, 0.75, 1.0, 1.25];

/// S1 breakpoints for the Fv table (g)
pub const S1_BREAKPOINTS: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];

/// Fa rows for SA..SE (SNI 1726:2012 Tabel 4)
pub const FA_TABLE: [[f64; 5]; 5] = [
    [0.8, 0.8, 0.8, 0.8, 0.8],
    [1.0, 1.0, 1.0, 1.0, 1.0],
    [1.2, 1.2, 1.1, 1.0, 1.0],
    [1.6, 1.4, 1.2, 1.1, 1.0],
    [2.5, 1.7, 1.2, 0.9, 0.9],
];

/// Fv rows for SA..SE (SNI 1726:2012 Tabel 5)
pub const FV_TABLE: [[f64; 5]; 5] = [
    [0.8, 0.8, 0.8, 0.8, 0.8],
    [1.0, 1.0, 1.0, 1.0, 1.0],
    [1.7, 1.6, 1.5, 1.4, 1.3],
    [2.4, 2.0, 1.8, 1.6, 1.5],
    [3.5, 3.2, 2.8, 2.4, 2.4],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(SiteClass::from_str_flexible("SD").unwrap(), SiteClass::MediumSoil);
        assert_eq!(SiteClass::from_str_flexible("d").unwrap(), SiteClass::MediumSoil);
        assert_eq!(
            SiteClass::from_str_flexible("medium soil").unwrap(),
            SiteClass::MediumSoil
        );
        assert_eq!(
            SiteClass::from_str_flexible("Tanah_Lunak").unwrap(),
            SiteClass::SoftSoil
        );
        assert_eq!(SiteClass::from_str_flexible(" sa ").unwrap(), SiteClass::HardRock);
        assert!(SiteClass::from_str_flexible("SX").is_err());
    }

    #[test]
    fn test_parse_defaults_unknown_to_medium_soil() {
        let parsed = SiteClass::parse("clay?");
        assert!(parsed.is_defaulted());
        assert_eq!(parsed.value(), Some(&SiteClass::MediumSoil));
        assert!(parsed.reason().unwrap().contains("not recognized"));
    }

    #[test]
    fn test_code_roundtrip() {
        for class in SiteClass::ALL {
            assert_eq!(SiteClass::from_str_flexible(class.code()).unwrap(), class);
        }
    }

    #[test]
    fn test_special_soil_has_no_rows() {
        assert!(SiteClass::SpecialSoil.coefficient_rows().is_none());
        let (fa, fv) = SiteClass::MediumSoil.coefficient_rows().unwrap();
        assert_eq!(fa[2], 1.2);
        assert_eq!(fv[0], 2.4);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SiteClass::SoftSoil).unwrap();
        assert_eq!(json, "\"SE\"");
        let roundtrip: SiteClass = serde_json::from_str("\"SC\"").unwrap();
        assert_eq!(roundtrip, SiteClass::VeryDenseSoil);
    }
}
