//! # Spring Wire Materials
//!
//! Material definitions and property lookups for helical compression spring
//! design, covering the standard ASTM spring-wire grades.
//!
//! Properties are diameter-dependent: each material carries an ordered list
//! of wire-diameter ranges, and a lookup resolves the row whose interval
//! contains the requested diameter. The upper bound of each interval is
//! compared with a +0.001 mm tolerance; the lower bound is exact.
//!
//! ## Material Grades
//!
//! - **Music wire** (ASTM A228): highest strength, general purpose
//! - **Hard-drawn wire** (ASTM A227): lowest cost
//! - **Oil-tempered wire** (ASTM A229)
//! - **Chrome-vanadium wire** (ASTM A232): fatigue and shock service
//! - **Chrome-silicon wire** (ASTM A401): high temperature
//! - **Stainless wire** (ASTM A313): corrosion resistance
//! - **Phosphor-bronze wire** (ASTM B159): electrical conductivity
//!
//! ## Example
//!
//! ```rust
//! use spring_core::materials::SpringWireMaterial;
//!
//! let props = SpringWireMaterial::MusicWire
//!     .properties_for_diameter(1.2)
//!     .expect("1.2 mm is within the tabulated ranges");
//! assert_eq!(props.shear_modulus_mpa, 81_700.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SpringError, SpringResult};
use crate::units::Megapascals;

/// Tolerance added to the upper bound of each diameter interval during lookup.
///
/// The lower bound is compared exactly. This matches the published table
/// convention where a wire size quoted at a range boundary belongs to the
/// smaller-diameter row.
pub const DIAMETER_UPPER_TOLERANCE_MM: f64 = 0.001;

/// Standard spring-wire material grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringWireMaterial {
    /// Music wire, ASTM A228
    #[serde(rename = "A228")]
    MusicWire,
    /// Hard-drawn wire, ASTM A227
    #[serde(rename = "A227")]
    HardDrawn,
    /// Oil-tempered wire, ASTM A229
    #[serde(rename = "A229")]
    OilTempered,
    /// Chrome-vanadium wire, ASTM A232
    #[serde(rename = "A232")]
    ChromeVanadium,
    /// Chrome-silicon wire, ASTM A401
    #[serde(rename = "A401")]
    ChromeSilicon,
    /// Stainless wire, ASTM A313
    #[serde(rename = "A313")]
    Stainless,
    /// Phosphor-bronze wire, ASTM B159
    #[serde(rename = "B159")]
    PhosphorBronze,
}

impl SpringWireMaterial {
    /// All material variants, in catalog order.
    ///
    /// This is also the outer enumeration order used by the design-space
    /// search, so it fixes the first-found tie-break between equal
    /// figure-of-merit candidates.
    pub const ALL: [SpringWireMaterial; 7] = [
        SpringWireMaterial::MusicWire,
        SpringWireMaterial::HardDrawn,
        SpringWireMaterial::OilTempered,
        SpringWireMaterial::ChromeVanadium,
        SpringWireMaterial::ChromeSilicon,
        SpringWireMaterial::Stainless,
        SpringWireMaterial::PhosphorBronze,
    ];

    /// Get the ASTM designation (e.g., "A228")
    pub fn astm(&self) -> &'static str {
        match self {
            SpringWireMaterial::MusicWire => "A228",
            SpringWireMaterial::HardDrawn => "A227",
            SpringWireMaterial::OilTempered => "A229",
            SpringWireMaterial::ChromeVanadium => "A232",
            SpringWireMaterial::ChromeSilicon => "A401",
            SpringWireMaterial::Stainless => "A313",
            SpringWireMaterial::PhosphorBronze => "B159",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SpringResult<Self> {
        match s.to_uppercase().replace([' ', '_'], "-").as_str() {
            "A228" | "MUSIC-WIRE" | "MUSIC" | "PIANO-WIRE" => Ok(SpringWireMaterial::MusicWire),
            "A227" | "HARD-DRAWN" | "HD" => Ok(SpringWireMaterial::HardDrawn),
            "A229" | "OIL-TEMPERED" | "OT" => Ok(SpringWireMaterial::OilTempered),
            "A232" | "CHROME-VANADIUM" | "CR-V" => Ok(SpringWireMaterial::ChromeVanadium),
            "A401" | "CHROME-SILICON" | "CR-SI" => Ok(SpringWireMaterial::ChromeSilicon),
            "A313" | "STAINLESS" | "SS" => Ok(SpringWireMaterial::Stainless),
            "B159" | "PHOSPHOR-BRONZE" | "BRONZE" => Ok(SpringWireMaterial::PhosphorBronze),
            _ => Err(SpringError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SpringWireMaterial::MusicWire => "Music wire A228",
            SpringWireMaterial::HardDrawn => "Hard-drawn wire A227",
            SpringWireMaterial::OilTempered => "Oil-tempered wire A229",
            SpringWireMaterial::ChromeVanadium => "Chrome-vanadium wire A232",
            SpringWireMaterial::ChromeSilicon => "Chrome-silicon wire A401",
            SpringWireMaterial::Stainless => "Stainless wire A313",
            SpringWireMaterial::PhosphorBronze => "Phosphor-bronze wire B159",
        }
    }

    /// The ordered diameter-range rows for this material.
    pub fn ranges(&self) -> &'static [MaterialRange] {
        match self {
            SpringWireMaterial::MusicWire => &MUSIC_WIRE_RANGES,
            SpringWireMaterial::HardDrawn => &HARD_DRAWN_RANGES,
            SpringWireMaterial::OilTempered => &OIL_TEMPERED_RANGES,
            SpringWireMaterial::ChromeVanadium => &CHROME_VANADIUM_RANGES,
            SpringWireMaterial::ChromeSilicon => &CHROME_SILICON_RANGES,
            SpringWireMaterial::Stainless => &STAINLESS_RANGES,
            SpringWireMaterial::PhosphorBronze => &PHOSPHOR_BRONZE_RANGES,
        }
    }

    /// Resolve the material properties for a wire diameter.
    ///
    /// Scans the ordered range rows and returns the first whose interval
    /// contains `d_mm` (upper bound widened by
    /// [`DIAMETER_UPPER_TOLERANCE_MM`]). Returns `None` when the diameter
    /// falls outside every tabulated range.
    ///
    /// Deterministic and idempotent: identical inputs always resolve the
    /// same row.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spring_core::materials::SpringWireMaterial;
    ///
    /// let props = SpringWireMaterial::HardDrawn.properties_for_diameter(2.0);
    /// assert!(props.is_some());
    ///
    /// // 20 mm wire is outside every tabulated range
    /// assert!(SpringWireMaterial::HardDrawn.properties_for_diameter(20.0).is_none());
    /// ```
    pub fn properties_for_diameter(&self, d_mm: f64) -> Option<MaterialProperties> {
        self.ranges()
            .iter()
            .find(|r| r.contains(d_mm))
            .map(|r| r.properties())
    }
}

impl std::fmt::Display for SpringWireMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One diameter-range row of the material table.
///
/// All rows are immutable reference data compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRange {
    /// Smallest wire diameter covered by this row (mm), inclusive
    pub d_min_mm: f64,
    /// Largest wire diameter covered by this row (mm), inclusive with tolerance
    pub d_max_mm: f64,
    /// Shear modulus G (GPa)
    pub shear_modulus_gpa: f64,
    /// Fatigue exponent m in Sut = A / d^m
    pub fatigue_exponent_m: f64,
    /// Strength coefficient A (MPa·mm^m)
    pub strength_coefficient_mpa: f64,
    /// Relative cost index (hard-drawn wire = 1.0)
    pub relative_cost: f64,
    /// Shear-yield fraction of ultimate strength (Ssy = mult × Sut)
    pub yield_multiplier: f64,
}

impl MaterialRange {
    /// Check whether a wire diameter falls in this row's interval.
    ///
    /// The upper bound carries the +0.001 mm tolerance; the lower bound
    /// does not.
    pub fn contains(&self, d_mm: f64) -> bool {
        self.d_min_mm <= d_mm && d_mm <= self.d_max_mm + DIAMETER_UPPER_TOLERANCE_MM
    }

    /// Resolve this row into evaluation-ready properties (G scaled to MPa).
    pub fn properties(&self) -> MaterialProperties {
        MaterialProperties {
            shear_modulus_mpa: self.shear_modulus_gpa * 1000.0,
            fatigue_exponent_m: self.fatigue_exponent_m,
            strength_coefficient_mpa: self.strength_coefficient_mpa,
            relative_cost: self.relative_cost,
            yield_multiplier: self.yield_multiplier,
        }
    }
}

/// Material properties resolved for a specific wire diameter.
///
/// Shear modulus is pre-scaled to MPa so every stress formula works in the
/// consistent N/mm/MPa system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Shear modulus G (MPa)
    pub shear_modulus_mpa: f64,
    /// Fatigue exponent m in Sut = A / d^m
    pub fatigue_exponent_m: f64,
    /// Strength coefficient A (MPa·mm^m)
    pub strength_coefficient_mpa: f64,
    /// Relative cost index (hard-drawn wire = 1.0)
    pub relative_cost: f64,
    /// Shear-yield fraction of ultimate strength
    pub yield_multiplier: f64,
}

impl MaterialProperties {
    /// Ultimate tensile strength Sut = A / d^m (MPa)
    pub fn ultimate_strength_mpa(&self, d_mm: f64) -> f64 {
        self.strength_coefficient_mpa / d_mm.powf(self.fatigue_exponent_m)
    }

    /// Torsional yield strength Ssy = multiplier × Sut (MPa)
    pub fn shear_yield_strength_mpa(&self, d_mm: f64) -> f64 {
        self.yield_multiplier * self.ultimate_strength_mpa(d_mm)
    }

    /// Get G as a typed unit
    pub fn shear_modulus(&self) -> Megapascals {
        Megapascals(self.shear_modulus_mpa)
    }
}

// ============================================================================
// Reference table rows
// ============================================================================

const MUSIC_WIRE_RANGES: [MaterialRange; 4] = [
    MaterialRange { d_min_mm: 0.0, d_max_mm: 0.8, shear_modulus_gpa: 82.7, fatigue_exponent_m: 0.145, strength_coefficient_mpa: 2211.0, relative_cost: 2.6, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 0.8, d_max_mm: 1.61, shear_modulus_gpa: 81.7, fatigue_exponent_m: 0.145, strength_coefficient_mpa: 2211.0, relative_cost: 2.6, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 1.61, d_max_mm: 3.0, shear_modulus_gpa: 81.0, fatigue_exponent_m: 0.145, strength_coefficient_mpa: 2211.0, relative_cost: 2.6, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 3.0, d_max_mm: 6.5, shear_modulus_gpa: 80.0, fatigue_exponent_m: 0.145, strength_coefficient_mpa: 2211.0, relative_cost: 2.6, yield_multiplier: 0.45 },
];

const HARD_DRAWN_RANGES: [MaterialRange; 4] = [
    MaterialRange { d_min_mm: 0.7, d_max_mm: 0.8, shear_modulus_gpa: 80.7, fatigue_exponent_m: 0.19, strength_coefficient_mpa: 1783.0, relative_cost: 1.0, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 0.8, d_max_mm: 1.6, shear_modulus_gpa: 80.0, fatigue_exponent_m: 0.19, strength_coefficient_mpa: 1783.0, relative_cost: 1.0, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 1.6, d_max_mm: 3.0, shear_modulus_gpa: 79.3, fatigue_exponent_m: 0.19, strength_coefficient_mpa: 1783.0, relative_cost: 1.0, yield_multiplier: 0.45 },
    MaterialRange { d_min_mm: 3.0, d_max_mm: 12.7, shear_modulus_gpa: 78.6, fatigue_exponent_m: 0.19, strength_coefficient_mpa: 1783.0, relative_cost: 1.0, yield_multiplier: 0.45 },
];

const OIL_TEMPERED_RANGES: [MaterialRange; 1] = [
    MaterialRange { d_min_mm: 0.5, d_max_mm: 12.7, shear_modulus_gpa: 77.2, fatigue_exponent_m: 0.187, strength_coefficient_mpa: 1855.0, relative_cost: 1.3, yield_multiplier: 0.50 },
];

const CHROME_VANADIUM_RANGES: [MaterialRange; 1] = [
    MaterialRange { d_min_mm: 0.8, d_max_mm: 11.1, shear_modulus_gpa: 77.2, fatigue_exponent_m: 0.168, strength_coefficient_mpa: 2005.0, relative_cost: 3.1, yield_multiplier: 0.50 },
];

const CHROME_SILICON_RANGES: [MaterialRange; 1] = [
    MaterialRange { d_min_mm: 1.6, d_max_mm: 9.5, shear_modulus_gpa: 77.2, fatigue_exponent_m: 0.108, strength_coefficient_mpa: 1974.0, relative_cost: 4.0, yield_multiplier: 0.50 },
];

// Relative cost for stainless is quoted as a 7.6-11 band; the table carries
// the low end.
const STAINLESS_RANGES: [MaterialRange; 3] = [
    MaterialRange { d_min_mm: 0.3, d_max_mm: 2.5, shear_modulus_gpa: 69.0, fatigue_exponent_m: 0.146, strength_coefficient_mpa: 1867.0, relative_cost: 7.6, yield_multiplier: 0.35 },
    MaterialRange { d_min_mm: 2.5, d_max_mm: 5.0, shear_modulus_gpa: 69.0, fatigue_exponent_m: 0.263, strength_coefficient_mpa: 2065.0, relative_cost: 7.6, yield_multiplier: 0.35 },
    MaterialRange { d_min_mm: 5.0, d_max_mm: 10.0, shear_modulus_gpa: 69.0, fatigue_exponent_m: 0.478, strength_coefficient_mpa: 2911.0, relative_cost: 7.6, yield_multiplier: 0.35 },
];

const PHOSPHOR_BRONZE_RANGES: [MaterialRange; 3] = [
    MaterialRange { d_min_mm: 0.1, d_max_mm: 0.6, shear_modulus_gpa: 41.4, fatigue_exponent_m: 0.0, strength_coefficient_mpa: 1000.0, relative_cost: 8.0, yield_multiplier: 0.35 },
    MaterialRange { d_min_mm: 0.6, d_max_mm: 2.0, shear_modulus_gpa: 41.4, fatigue_exponent_m: 0.028, strength_coefficient_mpa: 913.0, relative_cost: 8.0, yield_multiplier: 0.35 },
    MaterialRange { d_min_mm: 2.0, d_max_mm: 7.5, shear_modulus_gpa: 41.4, fatigue_exponent_m: 0.064, strength_coefficient_mpa: 932.0, relative_cost: 8.0, yield_multiplier: 0.35 },
];
