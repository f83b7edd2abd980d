//! # Single-Spring Evaluation
//!
//! Evaluates one helical compression spring candidate — a (wire diameter,
//! material) pair under shared geometric parameters — into a fully populated,
//! validated [`SpringDesign`].
//!
//! ## Pipeline
//!
//! Evaluation is a pure pipeline of value-returning stages:
//!
//! ```text
//! material lookup → geometry → stresses → mass/frequency → figure of merit → checks
//! ```
//!
//! Each stage consumes the previous stage's values and the immutable
//! reference tables; the composed result is built exactly once and never
//! mutated afterwards.
//!
//! ## Outcomes, not errors
//!
//! `evaluate` never fails. A candidate that violates a design rule (spring
//! index, buckling, safety factor, user ceiling, catalog range) comes back
//! with `is_valid = false` and every failing check listed in `violations` —
//! all checks are evaluated, none short-circuits. Division edge cases have
//! defined fallbacks: τa = 0 yields the 999 sentinel safety factor, τs = 0
//! yields ns = 0, W = 0 yields f = 0, and a spring index of 0.75 (singular
//! Bergsträsser denominator) flags the design invalid instead of producing
//! a non-finite factor.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::calculations::spring::{evaluate, EvaluationConstants, SpringParameters};
//! use spring_core::design_tables::{EndCondition, EndType};
//! use spring_core::materials::SpringWireMaterial;
//!
//! let params = SpringParameters {
//!     mean_diameter_mm: 15.0,
//!     total_coils: 10.0,
//!     free_length_mm: 25.0,
//!     end_type: EndType::PlainGround,
//!     end_condition: EndCondition::FixedFixed,
//!     fatigue: None,
//!     max_free_length_mm: None,
//!     max_solid_length_mm: None,
//! };
//!
//! let design = evaluate(
//!     2.0,
//!     SpringWireMaterial::MusicWire,
//!     &params,
//!     &EvaluationConstants::default(),
//! );
//!
//! assert!(design.is_valid);
//! let figures = design.figures.expect("2.0 mm is in the music wire ranges");
//! assert!((figures.spring_index_c - 7.5).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::design_tables::{EndCondition, EndType, FatigueTreatment};
use crate::errors::{SpringError, SpringResult};
use crate::materials::{MaterialProperties, SpringWireMaterial};
use crate::units::{Hertz, Millimeters, NewtonsPerMm};

/// Sentinel safety factor meaning "effectively unlimited".
///
/// Reported for nf in static mode (fatigue not evaluated) and in fatigue
/// mode when the alternating stress is exactly zero.
pub const UNLIMITED_SAFETY_FACTOR: f64 = 999.0;

/// Minimum acceptable fatigue safety factor nf
pub const MIN_FATIGUE_SAFETY_FACTOR: f64 = 1.5;

/// Minimum acceptable static safety factor ns
pub const MIN_STATIC_SAFETY_FACTOR: f64 = 1.2;

/// Acceptable spring index band, C = D/d
pub const SPRING_INDEX_RANGE: (f64, f64) = (4.0, 12.0);

/// Acceptable active coil band
pub const ACTIVE_COILS_RANGE: (f64, f64) = (3.0, 15.0);

/// Clash allowance: the solid-closure force in fatigue service is taken
/// 15% above the maximum working force.
const SOLID_CLOSURE_MARGIN: f64 = 0.15;

/// Physical constants injected into every evaluation.
///
/// Explicit rather than ambient so tests (and non-steel materials, should
/// the catalog grow them) can substitute values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConstants {
    /// Specific weight of spring steel (N/mm³)
    pub specific_weight_n_mm3: f64,

    /// Gravitational acceleration (mm/s²)
    pub gravity_mm_s2: f64,
}

impl Default for EvaluationConstants {
    fn default() -> Self {
        EvaluationConstants {
            specific_weight_n_mm3: 7.7e-5,
            gravity_mm_s2: 9810.0,
        }
    }
}

/// Cyclic loading definition for fatigue service.
///
/// Presence of this struct (both forces) switches the evaluation into
/// fatigue mode; absence means static service. There is no half-way state.
///
/// ## JSON Example
///
/// ```json
/// { "f_max_n": 30.0, "f_min_n": 10.0, "treatment": "ShotPeened" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueLoading {
    /// Maximum working force (N)
    pub f_max_n: f64,

    /// Minimum working force (N)
    pub f_min_n: f64,

    /// Surface treatment selecting the Zimmerli endurance row
    pub treatment: FatigueTreatment,
}

/// Shared parameters for one evaluation batch.
///
/// The wire diameter and material vary per candidate; everything here is
/// held fixed across the whole design-space sweep.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mean_diameter_mm": 15.0,
///   "total_coils": 10.0,
///   "free_length_mm": 25.0,
///   "end_type": "PlainGround",
///   "end_condition": "FixedFixed",
///   "fatigue": null,
///   "max_free_length_mm": null,
///   "max_solid_length_mm": 22.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringParameters {
    /// Mean coil diameter D (mm)
    pub mean_diameter_mm: f64,

    /// Total coil count NT (may be fractional)
    pub total_coils: f64,

    /// Free length L0 (mm)
    pub free_length_mm: f64,

    /// Coil end type (selects the Na/Ls/pitch formula set)
    pub end_type: EndType,

    /// End support condition (selects the buckling factor α)
    pub end_condition: EndCondition,

    /// Cyclic loading; `None` selects static service
    pub fatigue: Option<FatigueLoading>,

    /// Optional user ceiling on the free length (mm)
    pub max_free_length_mm: Option<f64>,

    /// Optional user ceiling on the solid length (mm)
    pub max_solid_length_mm: Option<f64>,
}

impl SpringParameters {
    /// Validate the shared parameters.
    ///
    /// Malformed input is a blocking error surfaced before any candidate is
    /// evaluated; it is the only failure class that stops a batch.
    pub fn validate(&self) -> SpringResult<()> {
        if self.mean_diameter_mm <= 0.0 {
            return Err(SpringError::invalid_input(
                "mean_diameter_mm",
                self.mean_diameter_mm.to_string(),
                "Mean coil diameter must be positive",
            ));
        }
        if self.total_coils <= 0.0 {
            return Err(SpringError::invalid_input(
                "total_coils",
                self.total_coils.to_string(),
                "Total coil count must be positive",
            ));
        }
        if self.free_length_mm <= 0.0 {
            return Err(SpringError::invalid_input(
                "free_length_mm",
                self.free_length_mm.to_string(),
                "Free length must be positive",
            ));
        }
        if let Some(fatigue) = &self.fatigue {
            if fatigue.f_min_n < 0.0 {
                return Err(SpringError::invalid_input(
                    "f_min_n",
                    fatigue.f_min_n.to_string(),
                    "Minimum force cannot be negative for a compression spring",
                ));
            }
            if fatigue.f_max_n < fatigue.f_min_n {
                return Err(SpringError::invalid_input(
                    "f_max_n",
                    fatigue.f_max_n.to_string(),
                    "Maximum force must not be below the minimum force",
                ));
            }
        }
        if let Some(max_l0) = self.max_free_length_mm {
            if max_l0 <= 0.0 {
                return Err(SpringError::invalid_input(
                    "max_free_length_mm",
                    max_l0.to_string(),
                    "Free length ceiling must be positive",
                ));
            }
        }
        if let Some(max_ls) = self.max_solid_length_mm {
            if max_ls <= 0.0 {
                return Err(SpringError::invalid_input(
                    "max_solid_length_mm",
                    max_ls.to_string(),
                    "Solid length ceiling must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Whether this batch runs in fatigue mode (force pair present)
    pub fn fatigue_mode(&self) -> bool {
        self.fatigue.is_some()
    }
}

/// Derived figures for a candidate whose material lookup succeeded.
///
/// All geometry in mm, forces in N, stresses in MPa, rate in N/mm,
/// weight in N, frequency in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringFigures {
    /// Spring index C = D/d
    pub spring_index_c: f64,

    /// Bergsträsser curvature correction KB = (4C+2)/(4C−3)
    pub curvature_factor_kb: f64,

    /// Active coils Na
    pub active_coils: f64,

    /// Dead end coils Ne
    pub end_coils: f64,

    /// Coil pitch (mm)
    pub pitch_mm: f64,

    /// Solid length Ls (mm)
    pub solid_length_mm: f64,

    /// Deflection available before solid contact, ys = L0 − Ls (mm)
    pub deflection_to_solid_mm: f64,

    /// Spring rate k = d⁴G / (8D³Na) (N/mm)
    pub spring_rate_n_per_mm: f64,

    /// Ultimate tensile strength Sut = A/d^m (MPa)
    pub ultimate_strength_mpa: f64,

    /// Torsional yield strength Ssy (MPa)
    pub shear_yield_mpa: f64,

    /// Alternating shear stress τa (MPa); zero in static mode
    pub alternating_stress_mpa: f64,

    /// Mean shear stress τm (MPa); zero in static mode
    pub mean_stress_mpa: f64,

    /// Shear stress at solid closure τs (MPa)
    pub solid_stress_mpa: f64,

    /// Solid-closure force Fs (N)
    pub solid_force_n: f64,

    /// Fatigue safety factor nf (999 sentinel when not applicable)
    pub fatigue_safety_factor: f64,

    /// Static safety factor ns at solid closure
    pub static_safety_factor: f64,

    /// Spring weight W (N)
    pub weight_n: f64,

    /// Fundamental natural frequency f (Hz)
    pub natural_frequency_hz: f64,

    /// Figure of merit = relative cost × weight; lower is better
    pub figure_of_merit: f64,
}

impl SpringFigures {
    /// Working-frequency ceiling: operation above f/20 risks coil surge
    /// and calls for a redesign.
    pub fn redesign_frequency_hz(&self) -> f64 {
        self.natural_frequency_hz / 20.0
    }

    /// Get k as a typed unit
    pub fn spring_rate(&self) -> NewtonsPerMm {
        NewtonsPerMm(self.spring_rate_n_per_mm)
    }

    /// Get Ls as a typed unit
    pub fn solid_length(&self) -> Millimeters {
        Millimeters(self.solid_length_mm)
    }

    /// Get f as a typed unit
    pub fn natural_frequency(&self) -> Hertz {
        Hertz(self.natural_frequency_hz)
    }
}

/// One evaluated candidate: identity, derived figures, and verdict.
///
/// Created once per (diameter, material) pair and immutable afterwards.
/// `figures` is `None` when the evaluation could not get past material
/// lookup or the curvature-factor singularity — in that case the single
/// blocking reason is in `violations` and no derived value exists (the
/// figure of merit in particular is undefined).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringDesign {
    /// Wire material of this candidate
    pub material: SpringWireMaterial,

    /// Wire diameter d (mm)
    pub wire_diameter_mm: f64,

    /// Mean coil diameter D (mm)
    pub mean_diameter_mm: f64,

    /// Whether the batch ran in fatigue mode
    pub fatigue_mode: bool,

    /// Derived figures; `None` when lookup or geometry aborted
    pub figures: Option<SpringFigures>,

    /// Conjunction of every design check
    pub is_valid: bool,

    /// Every failing check, in check order
    pub violations: Vec<String>,
}

impl SpringDesign {
    /// Figure of merit, defined only when the material lookup succeeded
    pub fn figure_of_merit(&self) -> Option<f64> {
        self.figures.as_ref().map(|f| f.figure_of_merit)
    }

    /// Candidate that never reached the derivation stages
    fn unevaluated(
        material: SpringWireMaterial,
        wire_diameter_mm: f64,
        mean_diameter_mm: f64,
        fatigue_mode: bool,
        reason: String,
    ) -> Self {
        SpringDesign {
            material,
            wire_diameter_mm,
            mean_diameter_mm,
            fatigue_mode,
            figures: None,
            is_valid: false,
            violations: vec![reason],
        }
    }
}

/// Geometry and strength values derived before the stress branch.
struct Geometry {
    spring_index_c: f64,
    curvature_factor_kb: f64,
    active_coils: f64,
    end_coils: f64,
    pitch_mm: f64,
    solid_length_mm: f64,
    deflection_to_solid_mm: f64,
    spring_rate_n_per_mm: f64,
    ultimate_strength_mpa: f64,
    shear_yield_mpa: f64,
}

impl Geometry {
    fn derive(
        d_mm: f64,
        props: &MaterialProperties,
        params: &SpringParameters,
    ) -> Result<Geometry, String> {
        let c = params.mean_diameter_mm / d_mm;

        // KB = (4C+2)/(4C−3) is singular at C = 0.75
        let kb_denominator = 4.0 * c - 3.0;
        if kb_denominator.abs() < 1e-9 {
            return Err(format!(
                "C={:.2}: Bergsträsser factor is singular at C=0.75",
                c
            ));
        }
        let kb = (4.0 * c + 2.0) / kb_denominator;

        let na = params.end_type.active_coils(params.total_coils);
        let ls = params.end_type.solid_length_mm(d_mm, params.total_coils);
        let pitch = params.end_type.pitch_mm(params.free_length_mm, d_mm, na);

        let spring_rate = d_mm.powi(4) * props.shear_modulus_mpa
            / (8.0 * params.mean_diameter_mm.powi(3) * na);

        Ok(Geometry {
            spring_index_c: c,
            curvature_factor_kb: kb,
            active_coils: na,
            end_coils: params.end_type.end_coils(),
            pitch_mm: pitch,
            solid_length_mm: ls,
            deflection_to_solid_mm: params.free_length_mm - ls,
            spring_rate_n_per_mm: spring_rate,
            ultimate_strength_mpa: props.ultimate_strength_mpa(d_mm),
            shear_yield_mpa: props.shear_yield_strength_mpa(d_mm),
        })
    }
}

/// Stress state and safety factors from the fatigue/static branch.
struct StressState {
    alternating_stress_mpa: f64,
    mean_stress_mpa: f64,
    solid_stress_mpa: f64,
    solid_force_n: f64,
    fatigue_safety_factor: f64,
    static_safety_factor: f64,
}

impl StressState {
    fn derive(d_mm: f64, geometry: &Geometry, params: &SpringParameters) -> StressState {
        // τ = KB·8·F·D / (π·d³) for any force F
        let shear_stress = |force_n: f64| -> f64 {
            geometry.curvature_factor_kb * 8.0 * force_n * params.mean_diameter_mm
                / (PI * d_mm.powi(3))
        };

        match &params.fatigue {
            Some(fatigue) => {
                let alternating_force = (fatigue.f_max_n - fatigue.f_min_n) / 2.0;
                let mean_force = (fatigue.f_max_n + fatigue.f_min_n) / 2.0;
                let tau_a = shear_stress(alternating_force);
                let tau_m = shear_stress(mean_force);

                let solid_force = (1.0 + SOLID_CLOSURE_MARGIN) * fatigue.f_max_n;
                let tau_s = shear_stress(solid_force);

                let ssa = fatigue.treatment.ssa_mpa();
                let nf = if tau_a > 0.0 {
                    ssa / tau_a
                } else {
                    UNLIMITED_SAFETY_FACTOR
                };
                let ns = if tau_s > 0.0 {
                    geometry.shear_yield_mpa / tau_s
                } else {
                    0.0
                };

                StressState {
                    alternating_stress_mpa: tau_a,
                    mean_stress_mpa: tau_m,
                    solid_stress_mpa: tau_s,
                    solid_force_n: solid_force,
                    fatigue_safety_factor: nf,
                    static_safety_factor: ns,
                }
            }
            None => {
                // Static service: the only stress of interest is at solid
                // closure, reached by the force that flattens the spring.
                let solid_force =
                    geometry.spring_rate_n_per_mm * geometry.deflection_to_solid_mm;
                let tau_s = shear_stress(solid_force);

                let ns = if tau_s > 0.0 {
                    geometry.shear_yield_mpa / tau_s
                } else {
                    0.0
                };

                StressState {
                    alternating_stress_mpa: 0.0,
                    mean_stress_mpa: 0.0,
                    solid_stress_mpa: tau_s,
                    solid_force_n: solid_force,
                    fatigue_safety_factor: UNLIMITED_SAFETY_FACTOR,
                    static_safety_factor: ns,
                }
            }
        }
    }
}

/// Weight W and fundamental frequency f.
///
/// W counts all NT coils (dead coils carry mass too). f = 0 whenever W or
/// k degenerates to a non-positive value.
fn weight_and_frequency(
    d_mm: f64,
    params: &SpringParameters,
    spring_rate_n_per_mm: f64,
    constants: &EvaluationConstants,
) -> (f64, f64) {
    let weight_n = constants.specific_weight_n_mm3
        * (PI.powi(2) * d_mm.powi(2) * params.total_coils * params.mean_diameter_mm)
        / 4.0;

    let frequency_hz = if weight_n > 0.0 && spring_rate_n_per_mm > 0.0 {
        0.5 * (spring_rate_n_per_mm * constants.gravity_mm_s2 / weight_n).sqrt()
    } else {
        0.0
    };

    (weight_n, frequency_hz)
}

/// Run every design check and collect the failing messages.
///
/// No check short-circuits: a candidate that is wrong in four ways reports
/// all four.
fn check_design(figures: &SpringFigures, params: &SpringParameters) -> Vec<String> {
    let mut violations = Vec::new();

    let (c_min, c_max) = SPRING_INDEX_RANGE;
    if !(c_min..=c_max).contains(&figures.spring_index_c) {
        violations.push(format!(
            "C={:.2} outside {:.0}-{:.0}",
            figures.spring_index_c, c_min, c_max
        ));
    }

    let (na_min, na_max) = ACTIVE_COILS_RANGE;
    if !(na_min..=na_max).contains(&figures.active_coils) {
        violations.push(format!(
            "Na={:.2} outside {:.0}-{:.0}",
            figures.active_coils, na_min, na_max
        ));
    }

    let critical_l0 = params
        .end_condition
        .critical_free_length_mm(params.mean_diameter_mm);
    if params.free_length_mm >= critical_l0 {
        violations.push(format!(
            "L0={:.1} unstable: buckling limit {:.1} mm",
            params.free_length_mm, critical_l0
        ));
    }

    if let Some(max_l0) = params.max_free_length_mm {
        if params.free_length_mm > max_l0 {
            violations.push(format!(
                "L0={:.1} exceeds the {:.1} mm ceiling",
                params.free_length_mm, max_l0
            ));
        }
    }

    if let Some(max_ls) = params.max_solid_length_mm {
        if figures.solid_length_mm > max_ls {
            violations.push(format!(
                "Ls={:.1} exceeds the {:.1} mm ceiling",
                figures.solid_length_mm, max_ls
            ));
        }
    }

    if figures.fatigue_safety_factor < MIN_FATIGUE_SAFETY_FACTOR {
        violations.push(format!(
            "nf={:.2} below {}",
            figures.fatigue_safety_factor, MIN_FATIGUE_SAFETY_FACTOR
        ));
    }

    if figures.static_safety_factor < MIN_STATIC_SAFETY_FACTOR {
        violations.push(format!(
            "ns={:.2} below {}",
            figures.static_safety_factor, MIN_STATIC_SAFETY_FACTOR
        ));
    }

    violations
}

/// Evaluate one (wire diameter, material) candidate.
///
/// Pure function: reads only the immutable reference tables and its
/// arguments, produces a fresh [`SpringDesign`], and cannot fail — every
/// shortfall is an ordinary outcome on the result.
///
/// # Arguments
///
/// * `wire_diameter_mm` - Candidate wire diameter d (mm)
/// * `material` - Candidate wire material
/// * `params` - Shared batch parameters (assumed validated by the caller)
/// * `constants` - Injected physical constants
pub fn evaluate(
    wire_diameter_mm: f64,
    material: SpringWireMaterial,
    params: &SpringParameters,
    constants: &EvaluationConstants,
) -> SpringDesign {
    let fatigue_mode = params.fatigue_mode();

    let props = match material.properties_for_diameter(wire_diameter_mm) {
        Some(props) => props,
        None => {
            return SpringDesign::unevaluated(
                material,
                wire_diameter_mm,
                params.mean_diameter_mm,
                fatigue_mode,
                format!(
                    "d={} mm outside the tabulated range for {}",
                    wire_diameter_mm, material
                ),
            );
        }
    };

    let geometry = match Geometry::derive(wire_diameter_mm, &props, params) {
        Ok(geometry) => geometry,
        Err(reason) => {
            return SpringDesign::unevaluated(
                material,
                wire_diameter_mm,
                params.mean_diameter_mm,
                fatigue_mode,
                reason,
            );
        }
    };

    let stresses = StressState::derive(wire_diameter_mm, &geometry, params);

    let (weight_n, natural_frequency_hz) = weight_and_frequency(
        wire_diameter_mm,
        params,
        geometry.spring_rate_n_per_mm,
        constants,
    );

    let figures = SpringFigures {
        spring_index_c: geometry.spring_index_c,
        curvature_factor_kb: geometry.curvature_factor_kb,
        active_coils: geometry.active_coils,
        end_coils: geometry.end_coils,
        pitch_mm: geometry.pitch_mm,
        solid_length_mm: geometry.solid_length_mm,
        deflection_to_solid_mm: geometry.deflection_to_solid_mm,
        spring_rate_n_per_mm: geometry.spring_rate_n_per_mm,
        ultimate_strength_mpa: geometry.ultimate_strength_mpa,
        shear_yield_mpa: geometry.shear_yield_mpa,
        alternating_stress_mpa: stresses.alternating_stress_mpa,
        mean_stress_mpa: stresses.mean_stress_mpa,
        solid_stress_mpa: stresses.solid_stress_mpa,
        solid_force_n: stresses.solid_force_n,
        fatigue_safety_factor: stresses.fatigue_safety_factor,
        static_safety_factor: stresses.static_safety_factor,
        weight_n,
        natural_frequency_hz,
        figure_of_merit: props.relative_cost * weight_n,
    };

    let violations = check_design(&figures, params);

    SpringDesign {
        material,
        wire_diameter_mm,
        mean_diameter_mm: params.mean_diameter_mm,
        fatigue_mode,
        is_valid: violations.is_empty(),
        violations,
        figures: Some(figures),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> SpringParameters {
        SpringParameters {
            mean_diameter_mm: 15.0,
            total_coils: 10.0,
            free_length_mm: 25.0,
            end_type: EndType::PlainGround,
            end_condition: EndCondition::FixedFixed,
            fatigue: None,
            max_free_length_mm: None,
            max_solid_length_mm: None,
        }
    }

    fn constants() -> EvaluationConstants {
        EvaluationConstants::default()
    }

    #[test]
    fn test_static_mode_solid_closure() {
        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &constants());

        assert!(design.is_valid, "violations: {:?}", design.violations);
        assert!(!design.fatigue_mode);

        let figures = design.figures.unwrap();
        assert!((figures.spring_index_c - 7.5).abs() < 1e-9);
        assert!((figures.curvature_factor_kb - 32.0 / 27.0).abs() < 1e-9);
        assert_eq!(figures.active_coils, 9.0);
        assert_eq!(figures.solid_length_mm, 20.0);
        assert_eq!(figures.deflection_to_solid_mm, 5.0);

        // k = 2⁴·81000 / (8·15³·9)
        assert!((figures.spring_rate_n_per_mm - 5.3333).abs() < 1e-3);

        // Fs = k·ys, not a working-force margin
        assert!((figures.solid_force_n - 26.667).abs() < 1e-2);
        assert!((figures.static_safety_factor - 5.96).abs() < 0.01);
        assert_eq!(figures.fatigue_safety_factor, UNLIMITED_SAFETY_FACTOR);
        assert_eq!(figures.alternating_stress_mpa, 0.0);
        assert_eq!(figures.mean_stress_mpa, 0.0);
    }

    #[test]
    fn test_weight_frequency_and_fom() {
        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &constants());
        let figures = design.figures.unwrap();

        // W = 7.7e-5·π²·d²·NT·D/4
        assert!((figures.weight_n - 0.11399).abs() < 1e-4);
        assert!((figures.natural_frequency_hz - 338.7).abs() < 0.5);
        assert!((figures.redesign_frequency_hz() - figures.natural_frequency_hz / 20.0).abs() < 1e-12);

        // fom = cost × W with music wire at 2.6
        assert!((figures.figure_of_merit - 2.6 * figures.weight_n).abs() < 1e-12);

        // Typed accessors carry the same numbers
        assert_eq!(figures.natural_frequency().value(), figures.natural_frequency_hz);
        assert_eq!(figures.spring_rate().value(), figures.spring_rate_n_per_mm);
        assert_eq!(figures.solid_length().value(), figures.solid_length_mm);
    }

    #[test]
    fn test_fatigue_mode_stresses() {
        let mut params = base_params();
        params.fatigue = Some(FatigueLoading {
            f_max_n: 30.0,
            f_min_n: 10.0,
            treatment: FatigueTreatment::Unpeened,
        });

        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &params, &constants());
        assert!(design.fatigue_mode);
        assert!(design.is_valid, "violations: {:?}", design.violations);

        let figures = design.figures.unwrap();
        // Fa = 10 N, Fm = 20 N, Fs = 1.15·30 N
        assert!((figures.alternating_stress_mpa - 56.59).abs() < 0.05);
        assert!((figures.mean_stress_mpa - 113.18).abs() < 0.05);
        assert!((figures.solid_force_n - 34.5).abs() < 1e-9);
        assert!((figures.solid_stress_mpa - 195.2).abs() < 0.1);

        // nf = Ssa/τa with the unpeened row
        assert!((figures.fatigue_safety_factor - 241.0 / figures.alternating_stress_mpa).abs() < 1e-9);
        assert!((figures.static_safety_factor - 4.61).abs() < 0.01);
    }

    #[test]
    fn test_constant_force_gives_unlimited_nf() {
        let mut params = base_params();
        params.fatigue = Some(FatigueLoading {
            f_max_n: 20.0,
            f_min_n: 20.0,
            treatment: FatigueTreatment::ShotPeened,
        });

        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &params, &constants());
        let figures = design.figures.unwrap();
        assert_eq!(figures.alternating_stress_mpa, 0.0);
        assert_eq!(figures.fatigue_safety_factor, UNLIMITED_SAFETY_FACTOR);
        assert!(figures.mean_stress_mpa > 0.0);
    }

    #[test]
    fn test_material_out_of_range() {
        // Hard-drawn wire starts at 0.7 mm
        let design = evaluate(0.5, SpringWireMaterial::HardDrawn, &base_params(), &constants());

        assert!(!design.is_valid);
        assert!(design.figures.is_none());
        assert!(design.figure_of_merit().is_none());
        assert_eq!(design.violations.len(), 1);
        assert!(design.violations[0].contains("outside the tabulated range"));
    }

    #[test]
    fn test_curvature_singularity_is_flagged() {
        // D/d = 1.5/2.0 = 0.75 lands exactly on the KB pole
        let mut params = base_params();
        params.mean_diameter_mm = 1.5;

        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &params, &constants());
        assert!(!design.is_valid);
        assert!(design.figures.is_none());
        assert!(design.violations[0].contains("singular"));
    }

    #[test]
    fn test_all_violations_accumulate() {
        let params = SpringParameters {
            mean_diameter_mm: 100.0,
            total_coils: 20.0,
            free_length_mm: 600.0,
            end_type: EndType::PlainGround,
            end_condition: EndCondition::FixedFixed,
            fatigue: None,
            max_free_length_mm: Some(500.0),
            max_solid_length_mm: Some(5.0),
        };

        let design = evaluate(0.5, SpringWireMaterial::MusicWire, &params, &constants());
        assert!(!design.is_valid);

        // C=200, Na=19, buckling (600 ≥ 526), both ceilings - all reported at once
        assert_eq!(design.violations.len(), 5);
        assert!(design.violations[0].contains("C="));
        assert!(design.violations[1].contains("Na="));
        assert!(design.violations[2].contains("unstable"));
        assert!(design.violations[3].contains("L0="));
        assert!(design.violations[4].contains("Ls="));
    }

    #[test]
    fn test_zero_deflection_zeroes_static_factor() {
        // L0 equal to the solid length leaves no travel: Fs = 0, ns = 0
        let mut params = base_params();
        params.free_length_mm = 20.0;

        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &params, &constants());
        assert!(!design.is_valid);

        let figures = design.figures.unwrap();
        assert_eq!(figures.solid_force_n, 0.0);
        assert_eq!(figures.static_safety_factor, 0.0);
        assert!(design.violations.iter().any(|v| v.contains("ns=")));
    }

    #[test]
    fn test_constants_are_injected() {
        let weightless = EvaluationConstants {
            specific_weight_n_mm3: 0.0,
            gravity_mm_s2: 9810.0,
        };
        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &weightless);
        let figures = design.figures.unwrap();
        assert_eq!(figures.weight_n, 0.0);
        assert_eq!(figures.natural_frequency_hz, 0.0);
        assert_eq!(figures.figure_of_merit, 0.0);

        // Quadrupled gravity doubles the frequency
        let heavy = EvaluationConstants {
            gravity_mm_s2: 4.0 * 9810.0,
            ..EvaluationConstants::default()
        };
        let base = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &constants());
        let boosted = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &heavy);
        let f_base = base.figures.unwrap().natural_frequency_hz;
        let f_boosted = boosted.figures.unwrap().natural_frequency_hz;
        assert!((f_boosted - 2.0 * f_base).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_validation() {
        let mut params = base_params();
        assert!(params.validate().is_ok());

        params.mean_diameter_mm = 0.0;
        assert!(params.validate().is_err());

        let mut params = base_params();
        params.fatigue = Some(FatigueLoading {
            f_max_n: 5.0,
            f_min_n: 10.0,
            treatment: FatigueTreatment::Unpeened,
        });
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_design_serialization() {
        let design = evaluate(2.0, SpringWireMaterial::MusicWire, &base_params(), &constants());
        let json = serde_json::to_string(&design).unwrap();
        let roundtrip: SpringDesign = serde_json::from_str(&json).unwrap();
        assert_eq!(design, roundtrip);
    }
}
