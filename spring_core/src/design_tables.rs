//! # Spring Design Reference Tables
//!
//! Enumerated lookup tables for helical compression spring design:
//! end-type coil/length formulas, end-condition buckling factors, and
//! fatigue-treatment shear strengths.
//!
//! ## Overview
//!
//! | Table             | Governs                                    |
//! |-------------------|--------------------------------------------|
//! | End type          | Na, Ne, solid length Ls, coil pitch p      |
//! | End condition     | Buckling factor α                          |
//! | Fatigue treatment | Torsional endurance components Ssa, Ssm    |
//!
//! Every table is a fixed enumerated set: an unknown key cannot occur at
//! runtime, and `match` exhaustiveness keeps the formula sets complete.
//!
//! ## Reference
//!
//! Shigley's Mechanical Engineering Design, Ch. 10 (see [`table_ref`]).

use serde::{Deserialize, Serialize};

/// Reference-table citations for the design checks and formulas.
pub mod table_ref {
    /// End-type coil and length formulas
    pub const END_TYPES: &str = "Shigley Table 10-1";
    /// End-condition buckling factor α
    pub const END_CONDITIONS: &str = "Shigley Table 10-2";
    /// Zimmerli torsional endurance data
    pub const FATIGUE_TREATMENT: &str = "Shigley Eq. 10-30 (Zimmerli)";
    /// Wire material strength constants
    pub const WIRE_MATERIALS: &str = "Shigley Table 10-4";
    /// Bergsträsser curvature correction
    pub const CURVATURE_FACTOR: &str = "Shigley Eq. 10-5";
}

/// Coil end type per Shigley Table 10-1.
///
/// Determines how many coils deflect (Na), how many are dead end coils
/// (Ne), the solid length Ls, and the coil pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EndType {
    /// Plain ends: every coil is active
    Plain,

    /// Plain ends, ground flat
    PlainGround,

    /// Squared (closed) ends
    SquaredClosed,

    /// Squared and ground ends: the usual production choice
    #[default]
    SquaredGround,
}

impl EndType {
    /// All end-type variants for UI selection
    pub const ALL: [EndType; 4] = [
        EndType::Plain,
        EndType::PlainGround,
        EndType::SquaredClosed,
        EndType::SquaredGround,
    ];

    /// Active coils Na from the total coil count
    pub fn active_coils(&self, total_coils: f64) -> f64 {
        match self {
            EndType::Plain => total_coils,
            EndType::PlainGround => total_coils - 1.0,
            EndType::SquaredClosed => total_coils - 2.0,
            EndType::SquaredGround => total_coils - 2.0,
        }
    }

    /// Dead end coils Ne = NT − Na
    pub fn end_coils(&self) -> f64 {
        match self {
            EndType::Plain => 0.0,
            EndType::PlainGround => 1.0,
            EndType::SquaredClosed => 2.0,
            EndType::SquaredGround => 2.0,
        }
    }

    /// Solid length Ls (mm): spring length with every coil in contact
    pub fn solid_length_mm(&self, d_mm: f64, total_coils: f64) -> f64 {
        match self {
            EndType::Plain => d_mm * (total_coils + 1.0),
            EndType::PlainGround => d_mm * total_coils,
            EndType::SquaredClosed => d_mm * (total_coils + 1.0),
            EndType::SquaredGround => d_mm * total_coils,
        }
    }

    /// Coil pitch (mm) from free length, wire diameter and active coils
    pub fn pitch_mm(&self, free_length_mm: f64, d_mm: f64, active_coils: f64) -> f64 {
        match self {
            EndType::Plain => (free_length_mm - d_mm) / active_coils,
            EndType::PlainGround => free_length_mm / (active_coils + 1.0),
            EndType::SquaredClosed => (free_length_mm - 3.0 * d_mm) / active_coils,
            EndType::SquaredGround => (free_length_mm - 2.0 * d_mm) / active_coils,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EndType::Plain => "Plain",
            EndType::PlainGround => "Plain and ground",
            EndType::SquaredClosed => "Squared or closed",
            EndType::SquaredGround => "Squared and ground",
        }
    }
}

impl std::fmt::Display for EndType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// End support condition per Shigley Table 10-2.
///
/// The α factor scales the critical free length against lateral buckling:
/// a spring is stable when L0 < 2.63·D/α.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EndCondition {
    /// Both ends against flat parallel surfaces: α = 0.5
    #[default]
    FixedFixed,

    /// One end fixed, one end pivoted: α = 0.707
    FixedPivoted,

    /// Both ends pivoted: α = 1.0
    PivotedPivoted,

    /// One end clamped, one end free: α = 2.0
    FixedFree,
}

impl EndCondition {
    /// All end-condition variants for UI selection
    pub const ALL: [EndCondition; 4] = [
        EndCondition::FixedFixed,
        EndCondition::FixedPivoted,
        EndCondition::PivotedPivoted,
        EndCondition::FixedFree,
    ];

    /// Get the α factor value
    pub fn alpha(&self) -> f64 {
        match self {
            EndCondition::FixedFixed => 0.5,
            EndCondition::FixedPivoted => 0.707,
            EndCondition::PivotedPivoted => 1.0,
            EndCondition::FixedFree => 2.0,
        }
    }

    /// Critical free length (mm) above which the spring buckles
    pub fn critical_free_length_mm(&self, mean_diameter_mm: f64) -> f64 {
        2.63 * mean_diameter_mm / self.alpha()
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EndCondition::FixedFixed => "Flat parallel surfaces (α = 0.5)",
            EndCondition::FixedPivoted => "One fixed, one pivoted (α = 0.707)",
            EndCondition::PivotedPivoted => "Both pivoted (α = 1.0)",
            EndCondition::FixedFree => "One clamped, one free (α = 2.0)",
        }
    }
}

impl std::fmt::Display for EndCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Surface treatment for fatigue service (Zimmerli data).
///
/// Ssm is tabulated alongside Ssa and kept available for mean-stress
/// criteria, though the current fatigue check consumes only Ssa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FatigueTreatment {
    /// As-wound wire, no peening
    #[default]
    Unpeened,

    /// Shot-peened wire
    ShotPeened,
}

impl FatigueTreatment {
    /// All treatment variants for UI selection
    pub const ALL: [FatigueTreatment; 2] = [FatigueTreatment::Unpeened, FatigueTreatment::ShotPeened];

    /// Alternating shear endurance component Ssa (MPa)
    pub fn ssa_mpa(&self) -> f64 {
        match self {
            FatigueTreatment::Unpeened => 241.0,
            FatigueTreatment::ShotPeened => 398.0,
        }
    }

    /// Mean shear endurance component Ssm (MPa)
    pub fn ssm_mpa(&self) -> f64 {
        match self {
            FatigueTreatment::Unpeened => 534.0,
            FatigueTreatment::ShotPeened => 379.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FatigueTreatment::Unpeened => "Unpeened",
            FatigueTreatment::ShotPeened => "Shot-peened",
        }
    }
}

impl std::fmt::Display for FatigueTreatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_type_formulas_plain_ground() {
        // d = 2 mm, NT = 10, L0 = 50 mm
        let et = EndType::PlainGround;
        let na = et.active_coils(10.0);
        assert_eq!(na, 9.0);
        assert_eq!(et.end_coils(), 1.0);
        assert_eq!(et.solid_length_mm(2.0, 10.0), 20.0);
        assert_eq!(et.pitch_mm(50.0, 2.0, na), 5.0);
    }

    #[test]
    fn test_end_type_formulas_all_variants() {
        let d = 1.5;
        let nt = 12.0;
        let l0 = 40.0;

        for et in EndType::ALL {
            let na = et.active_coils(nt);
            // Na + Ne always reconstructs NT
            assert_eq!(na + et.end_coils(), nt);
            assert!(et.solid_length_mm(d, nt) > 0.0);
            assert!(et.pitch_mm(l0, d, na) > 0.0);
        }

        assert_eq!(EndType::Plain.active_coils(nt), 12.0);
        assert_eq!(EndType::SquaredClosed.active_coils(nt), 10.0);
        assert_eq!(EndType::SquaredClosed.solid_length_mm(d, nt), 1.5 * 13.0);
        assert_eq!(EndType::SquaredGround.solid_length_mm(d, nt), 1.5 * 12.0);
    }

    #[test]
    fn test_alpha_values() {
        assert_eq!(EndCondition::FixedFixed.alpha(), 0.5);
        assert_eq!(EndCondition::FixedPivoted.alpha(), 0.707);
        assert_eq!(EndCondition::PivotedPivoted.alpha(), 1.0);
        assert_eq!(EndCondition::FixedFree.alpha(), 2.0);
    }

    #[test]
    fn test_critical_free_length() {
        // D = 15 mm between flat parallel plates: L0_crit = 2.63·15/0.5
        let crit = EndCondition::FixedFixed.critical_free_length_mm(15.0);
        assert!((crit - 78.9).abs() < 1e-9);

        // A clamped-free spring of the same D buckles four times sooner
        let free = EndCondition::FixedFree.critical_free_length_mm(15.0);
        assert!((free - crit / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_fatigue_treatment_strengths() {
        assert_eq!(FatigueTreatment::Unpeened.ssa_mpa(), 241.0);
        assert_eq!(FatigueTreatment::Unpeened.ssm_mpa(), 534.0);
        assert_eq!(FatigueTreatment::ShotPeened.ssa_mpa(), 398.0);
        assert_eq!(FatigueTreatment::ShotPeened.ssm_mpa(), 379.0);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(EndType::default(), EndType::SquaredGround);
        assert_eq!(EndCondition::default(), EndCondition::FixedFixed);
        assert_eq!(FatigueTreatment::default(), FatigueTreatment::Unpeened);
    }

    #[test]
    fn test_serialization() {
        let et = EndType::SquaredGround;
        let json = serde_json::to_string(&et).unwrap();
        assert_eq!(json, "\"SquaredGround\"");
        let roundtrip: EndType = serde_json::from_str(&json).unwrap();
        assert_eq!(et, roundtrip);
    }
}
