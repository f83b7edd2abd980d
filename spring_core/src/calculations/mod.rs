//! # Spring Calculations
//!
//! This module contains the spring evaluation and selection engine. The
//! calculation follows the pattern:
//!
//! - `*Input` / `*Parameters` - Input parameters (JSON-serializable)
//! - `*Design` / `*Outcome` - Results (JSON-serializable)
//! - Pure functions (`evaluate`, `select_best`) from input to result
//!
//! ## LLM Integration
//!
//! All types are designed for LLM consumption:
//! - Comprehensive rustdoc with examples
//! - Clean JSON serialization
//! - Structured error responses
//!
//! ## Available Calculations
//!
//! - [`spring`] - Single-candidate helical compression spring evaluation
//! - [`search`] - Design-space sweep and best-candidate selection

pub mod search;
pub mod spring;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use search::{MaterialSelector, SearchInput, SearchOutcome, select_best};
pub use spring::{evaluate, EvaluationConstants, SpringDesign, SpringParameters};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Compression spring design-space search
    SpringSearch(SearchInput),
    // Future: ExtensionSpring(ExtensionSearchInput),
    // etc.
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::SpringSearch(search) => &search.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::SpringSearch(_) => "Spring Search",
        }
    }
}
