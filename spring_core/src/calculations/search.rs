//! # Design-Space Search
//!
//! Sweeps every (material × wire diameter) candidate through the spring
//! evaluator, keeps the full result set, and selects the valid design with
//! the lowest figure of merit (relative cost × weight).
//!
//! ## Ordering
//!
//! Candidates are enumerated materials-outer, diameters-inner, in the order
//! given by [`SpringWireMaterial::ALL`] and the input diameter list. Ties on
//! the figure of merit are broken by this enumeration order: the first
//! candidate found wins. Each evaluation is pure and independent, so the
//! sweep could be parallelized without changing results as long as the
//! tie-break stays anchored to the enumeration order.
//!
//! ## Failure signals
//!
//! Malformed input (empty diameter list, non-positive geometry) is the only
//! error this module returns, and it blocks the batch before any evaluation.
//! "No valid design" is not an error: the outcome carries diagnostics for
//! the first few candidates so the cause can be inspected.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::calculations::search::{select_best, MaterialSelector, SearchInput};
//! use spring_core::calculations::spring::{EvaluationConstants, SpringParameters};
//! use spring_core::design_tables::{EndCondition, EndType};
//!
//! let input = SearchInput {
//!     label: "SP-1".to_string(),
//!     wire_diameters_mm: vec![1.0, 1.5, 2.0],
//!     material: MaterialSelector::All,
//!     parameters: SpringParameters {
//!         mean_diameter_mm: 15.0,
//!         total_coils: 10.0,
//!         free_length_mm: 25.0,
//!         end_type: EndType::PlainGround,
//!         end_condition: EndCondition::FixedFixed,
//!         fatigue: None,
//!         max_free_length_mm: None,
//!         max_solid_length_mm: None,
//!     },
//! };
//!
//! let outcome = select_best(&input, &EvaluationConstants::default()).unwrap();
//! assert!(outcome.best.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::spring::{
    evaluate, EvaluationConstants, SpringDesign, SpringParameters,
};
use crate::errors::{SpringError, SpringResult};
use crate::materials::SpringWireMaterial;

/// How many leading candidates get diagnostics when nothing is valid
pub const DIAGNOSTIC_CANDIDATE_COUNT: usize = 5;

/// Display cap for the fatigue factor in the sensitivity series, so the
/// 999 sentinel does not flatten a chart's scale
pub const SENSITIVITY_FACTOR_CAP: f64 = 10.0;

/// Which materials to sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaterialSelector {
    /// Every material in the catalog
    #[default]
    All,

    /// One named material
    Single(SpringWireMaterial),
}

impl MaterialSelector {
    /// The materials this selector enumerates, in sweep order
    pub fn candidates(&self) -> Vec<SpringWireMaterial> {
        match self {
            MaterialSelector::All => SpringWireMaterial::ALL.to_vec(),
            MaterialSelector::Single(material) => vec![*material],
        }
    }
}

/// Input for one design-space search.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SP-1",
///   "wire_diameters_mm": [0.5, 0.8, 1.0, 1.2, 1.5, 2.0, 3.0],
///   "material": "All",
///   "parameters": {
///     "mean_diameter_mm": 15.0,
///     "total_coils": 10.0,
///     "free_length_mm": 25.0,
///     "end_type": "SquaredGround",
///     "end_condition": "FixedFixed",
///     "fatigue": null,
///     "max_free_length_mm": null,
///     "max_solid_length_mm": null
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInput {
    /// User label for this search (e.g., "SP-1", "Valve return spring")
    pub label: String,

    /// Candidate wire diameters (mm), evaluated in the given order
    pub wire_diameters_mm: Vec<f64>,

    /// Material sweep selector
    pub material: MaterialSelector,

    /// Parameters shared by every candidate
    pub parameters: SpringParameters,
}

impl SearchInput {
    /// Validate the batch input.
    ///
    /// Any failure here blocks the whole search; nothing is evaluated.
    pub fn validate(&self) -> SpringResult<()> {
        if self.wire_diameters_mm.is_empty() {
            return Err(SpringError::invalid_input(
                "wire_diameters_mm",
                "[]",
                "At least one candidate wire diameter is required",
            ));
        }
        for &d in &self.wire_diameters_mm {
            if d <= 0.0 {
                return Err(SpringError::invalid_input(
                    "wire_diameters_mm",
                    d.to_string(),
                    "Wire diameters must be positive",
                ));
            }
        }
        self.parameters.validate()
    }
}

/// One (d, ns, nf) sample of the safety-factor sensitivity projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Wire diameter d (mm)
    pub wire_diameter_mm: f64,

    /// Static safety factor ns
    pub static_safety_factor: f64,

    /// Fatigue safety factor nf, capped at [`SENSITIVITY_FACTOR_CAP`]
    pub fatigue_safety_factor: f64,
}

/// Safety factors vs. wire diameter, for external charting.
///
/// Points are sorted ascending by diameter. `fatigue_mode` is uniform for
/// the whole batch: the mode depends only on the shared input forces, not
/// on any candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySeries {
    /// Whether the batch was evaluated in fatigue mode
    pub fatigue_mode: bool,

    /// Samples over every evaluated candidate, ascending in d
    pub points: Vec<SensitivityPoint>,
}

/// Why one candidate was rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDiagnostic {
    /// Candidate material
    pub material: SpringWireMaterial,

    /// Candidate wire diameter (mm)
    pub wire_diameter_mm: f64,

    /// The candidate's failing checks
    pub violations: Vec<String>,
}

impl From<&SpringDesign> for CandidateDiagnostic {
    fn from(design: &SpringDesign) -> Self {
        CandidateDiagnostic {
            material: design.material,
            wire_diameter_mm: design.wire_diameter_mm,
            violations: design.violations.clone(),
        }
    }
}

/// Result of one design-space search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Lowest-figure-of-merit valid design, if any candidate was valid
    pub best: Option<SpringDesign>,

    /// Every evaluated candidate, in enumeration order
    pub designs: Vec<SpringDesign>,

    /// Rejection details for the first candidates; populated only when no
    /// candidate was valid
    pub diagnostics: Vec<CandidateDiagnostic>,

    /// Safety-factor projection for external charting
    pub sensitivity: SensitivitySeries,
}

impl SearchOutcome {
    /// Whether the search found any valid design
    pub fn has_valid_design(&self) -> bool {
        self.best.is_some()
    }

    /// How many candidates passed every check
    pub fn valid_count(&self) -> usize {
        self.designs.iter().filter(|d| d.is_valid).count()
    }
}

/// Sweep the design space and select the best valid spring.
///
/// Evaluates every (material × diameter) pair independently, filters to the
/// valid designs, and returns the one with the minimum figure of merit
/// (first found wins on ties). See the module docs for ordering and failure
/// semantics.
///
/// # Arguments
///
/// * `input` - Search batch (label, diameters, material selector, parameters)
/// * `constants` - Injected physical constants, shared by all evaluations
///
/// # Returns
///
/// * `Ok(SearchOutcome)` - The sweep ran; `best` may still be `None`
/// * `Err(SpringError)` - Malformed input, nothing evaluated
pub fn select_best(
    input: &SearchInput,
    constants: &EvaluationConstants,
) -> SpringResult<SearchOutcome> {
    input.validate()?;

    let materials = input.material.candidates();
    let mut designs = Vec::with_capacity(materials.len() * input.wire_diameters_mm.len());

    for material in materials {
        for &d in &input.wire_diameters_mm {
            designs.push(evaluate(d, material, &input.parameters, constants));
        }
    }

    // Minimum figure of merit among valid designs; strict '<' keeps the
    // first candidate of any tie.
    let mut best: Option<(usize, f64)> = None;
    for (index, design) in designs.iter().enumerate() {
        if !design.is_valid {
            continue;
        }
        let fom = match design.figure_of_merit() {
            Some(fom) => fom,
            None => continue,
        };
        match best {
            Some((_, best_fom)) if fom >= best_fom => {}
            _ => best = Some((index, fom)),
        }
    }
    let best = best.map(|(index, _)| designs[index].clone());

    let diagnostics = if best.is_none() {
        designs
            .iter()
            .take(DIAGNOSTIC_CANDIDATE_COUNT)
            .map(CandidateDiagnostic::from)
            .collect()
    } else {
        Vec::new()
    };

    let sensitivity = sensitivity_series(&designs, input.parameters.fatigue_mode());

    Ok(SearchOutcome {
        best,
        designs,
        diagnostics,
        sensitivity,
    })
}

/// Project every evaluated candidate onto (d, ns, capped nf), ascending in d.
fn sensitivity_series(designs: &[SpringDesign], fatigue_mode: bool) -> SensitivitySeries {
    let mut points: Vec<SensitivityPoint> = designs
        .iter()
        .filter_map(|design| {
            design.figures.as_ref().map(|figures| SensitivityPoint {
                wire_diameter_mm: design.wire_diameter_mm,
                static_safety_factor: figures.static_safety_factor,
                fatigue_safety_factor: figures
                    .fatigue_safety_factor
                    .min(SENSITIVITY_FACTOR_CAP),
            })
        })
        .collect();

    points.sort_by(|a, b| {
        a.wire_diameter_mm
            .partial_cmp(&b.wire_diameter_mm)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SensitivitySeries {
        fatigue_mode,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::spring::{FatigueLoading, UNLIMITED_SAFETY_FACTOR};
    use crate::design_tables::{EndCondition, EndType, FatigueTreatment};

    fn static_input() -> SearchInput {
        SearchInput {
            label: "Test Search".to_string(),
            wire_diameters_mm: vec![1.0, 1.5, 2.0],
            material: MaterialSelector::All,
            parameters: SpringParameters {
                mean_diameter_mm: 15.0,
                total_coils: 10.0,
                free_length_mm: 25.0,
                end_type: EndType::PlainGround,
                end_condition: EndCondition::FixedFixed,
                fatigue: None,
                max_free_length_mm: None,
                max_solid_length_mm: None,
            },
        }
    }

    fn constants() -> EvaluationConstants {
        EvaluationConstants::default()
    }

    #[test]
    fn test_static_sweep_selects_cheapest_lightest() {
        let outcome = select_best(&static_input(), &constants()).unwrap();

        // 7 materials × 3 diameters, all evaluated
        assert_eq!(outcome.designs.len(), 21);
        assert!(outcome.valid_count() > 1);
        assert!(outcome.diagnostics.is_empty());

        let best = outcome.best.expect("sweep has valid candidates");
        assert!(!best.fatigue_mode);

        // Hard-drawn wire is the cost floor, and 1.5 mm beats 2.0 mm on weight
        assert_eq!(best.material, SpringWireMaterial::HardDrawn);
        assert_eq!(best.wire_diameter_mm, 1.5);

        let figures = best.figures.unwrap();
        // Static mode: Fs = k·ys
        assert!((figures.solid_force_n
            - figures.spring_rate_n_per_mm * figures.deflection_to_solid_mm)
            .abs()
            < 1e-9);
        assert!((figures.static_safety_factor - 3.47).abs() < 0.01);
        assert_eq!(figures.fatigue_safety_factor, UNLIMITED_SAFETY_FACTOR);
    }

    #[test]
    fn test_equal_weight_cheaper_material_wins() {
        let mut input = static_input();
        input.wire_diameters_mm = vec![2.0];

        let outcome = select_best(&input, &constants()).unwrap();
        let best = outcome.best.unwrap();

        // Same d means same weight for every material; cost decides
        assert_eq!(best.material, SpringWireMaterial::HardDrawn);
    }

    #[test]
    fn test_every_valid_design_satisfies_all_gates() {
        let outcome = select_best(&static_input(), &constants()).unwrap();

        for design in outcome.designs.iter().filter(|d| d.is_valid) {
            let figures = design.figures.as_ref().unwrap();
            assert!(figures.spring_index_c >= 4.0 && figures.spring_index_c <= 12.0);
            assert!(figures.active_coils >= 3.0 && figures.active_coils <= 15.0);
            let critical = design
                .mean_diameter_mm
                * 2.63
                / EndCondition::FixedFixed.alpha();
            assert!(static_input().parameters.free_length_mm < critical);
            assert!(figures.fatigue_safety_factor >= 1.5);
            assert!(figures.static_safety_factor >= 1.2);
            assert!(design.violations.is_empty());
        }
    }

    #[test]
    fn test_oversized_index_rejects_everything() {
        let input = SearchInput {
            label: "C-200".to_string(),
            wire_diameters_mm: vec![0.5],
            material: MaterialSelector::Single(SpringWireMaterial::MusicWire),
            parameters: SpringParameters {
                mean_diameter_mm: 100.0,
                total_coils: 10.0,
                free_length_mm: 60.0,
                end_type: EndType::PlainGround,
                end_condition: EndCondition::FixedFixed,
                fatigue: None,
                max_free_length_mm: None,
                max_solid_length_mm: None,
            },
        };

        let outcome = select_best(&input, &constants()).unwrap();
        assert!(outcome.best.is_none());
        assert!(!outcome.has_valid_design());

        // Every evaluated candidate reports the spring-index violation
        assert!(!outcome.diagnostics.is_empty());
        for diagnostic in &outcome.diagnostics {
            assert!(diagnostic.violations.iter().any(|v| v.contains("C=")));
        }
    }

    #[test]
    fn test_diagnostics_cover_first_five_in_order() {
        let mut input = static_input();
        // Free length beyond the buckling limit invalidates the whole sweep
        input.parameters.free_length_mm = 90.0;

        let outcome = select_best(&input, &constants()).unwrap();
        assert!(outcome.best.is_none());
        assert_eq!(outcome.diagnostics.len(), DIAGNOSTIC_CANDIDATE_COUNT);

        // Evaluation order is materials-outer, diameters-inner
        assert_eq!(outcome.diagnostics[0].material, SpringWireMaterial::MusicWire);
        assert_eq!(outcome.diagnostics[0].wire_diameter_mm, 1.0);
        assert_eq!(outcome.diagnostics[1].wire_diameter_mm, 1.5);
        assert_eq!(outcome.diagnostics[2].wire_diameter_mm, 2.0);
        assert_eq!(outcome.diagnostics[3].material, SpringWireMaterial::HardDrawn);
    }

    #[test]
    fn test_sensitivity_series_static_mode() {
        let mut input = static_input();
        input.wire_diameters_mm = vec![2.0, 1.0, 1.5];
        input.material = MaterialSelector::Single(SpringWireMaterial::MusicWire);

        let outcome = select_best(&input, &constants()).unwrap();
        let series = &outcome.sensitivity;

        assert!(!series.fatigue_mode);
        assert_eq!(series.points.len(), 3);

        // Sorted ascending by diameter regardless of input order
        assert_eq!(series.points[0].wire_diameter_mm, 1.0);
        assert_eq!(series.points[1].wire_diameter_mm, 1.5);
        assert_eq!(series.points[2].wire_diameter_mm, 2.0);

        // The 999 sentinel is capped for charting
        for point in &series.points {
            assert_eq!(point.fatigue_safety_factor, SENSITIVITY_FACTOR_CAP);
            assert!(point.static_safety_factor > 0.0);
        }
    }

    #[test]
    fn test_sensitivity_series_fatigue_mode() {
        let mut input = static_input();
        input.wire_diameters_mm = vec![2.0];
        input.material = MaterialSelector::Single(SpringWireMaterial::MusicWire);
        input.parameters.fatigue = Some(FatigueLoading {
            f_max_n: 30.0,
            f_min_n: 10.0,
            treatment: FatigueTreatment::Unpeened,
        });

        let outcome = select_best(&input, &constants()).unwrap();
        assert!(outcome.sensitivity.fatigue_mode);

        // nf ≈ 4.26 here, well under the cap, so it passes through unclipped
        let point = outcome.sensitivity.points[0];
        assert!(point.fatigue_safety_factor < SENSITIVITY_FACTOR_CAP);
        assert!((point.fatigue_safety_factor - 4.26).abs() < 0.01);
    }

    #[test]
    fn test_unevaluated_candidates_stay_out_of_sensitivity() {
        let mut input = static_input();
        // 0.65 mm: inside music wire's ranges, outside hard-drawn's
        input.wire_diameters_mm = vec![0.65];

        let outcome = select_best(&input, &constants()).unwrap();
        assert_eq!(outcome.designs.len(), 7);

        let with_figures = outcome.designs.iter().filter(|d| d.figures.is_some()).count();
        assert_eq!(outcome.sensitivity.points.len(), with_figures);
        assert!(with_figures < outcome.designs.len());
    }

    #[test]
    fn test_malformed_input_blocks_batch() {
        let mut input = static_input();
        input.wire_diameters_mm.clear();
        assert!(select_best(&input, &constants()).is_err());

        let mut input = static_input();
        input.wire_diameters_mm = vec![1.0, -2.0];
        assert!(select_best(&input, &constants()).is_err());

        let mut input = static_input();
        input.parameters.total_coils = 0.0;
        assert!(select_best(&input, &constants()).is_err());
    }

    #[test]
    fn test_search_input_serialization() {
        let input = static_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: SearchInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let single = MaterialSelector::Single(SpringWireMaterial::Stainless);
        let json = serde_json::to_string(&single).unwrap();
        let parsed: MaterialSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(single, parsed);
    }
}
