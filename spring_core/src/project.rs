//! # Project Data Structures
//!
//! The `Project` struct is the root container for all spring design data.
//! Projects serialize to `.hlx` (Helix) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (defaults, evaluation constants)
//! └── items: HashMap<Uuid, CalculationItem> (all spring searches)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spring_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Actuators");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::spring::EvaluationConstants;
use crate::calculations::CalculationItem;
use crate::design_tables::{EndCondition, EndType};
use crate::materials::SpringWireMaterial;

/// Current schema version for .hlx files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.hlx` files.
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (defaults, evaluation constants)
    pub settings: GlobalSettings,

    /// All spring searches, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    ///
    /// # Example
    ///
    /// ```rust
    /// use spring_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Get a mutable reference to a calculation item by UUID.
    ///
    /// Note: a successful lookup updates the modified timestamp, since the
    /// caller is assumed to be about to edit the item.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of stored items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Default wire material for new searches
    pub default_material: SpringWireMaterial,

    /// Default coil end type for new searches
    pub default_end_type: EndType,

    /// Default end support condition for new searches
    pub default_end_condition: EndCondition,

    /// Physical constants used by every evaluation in this project
    pub constants: EvaluationConstants,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            default_material: SpringWireMaterial::MusicWire,
            default_end_type: EndType::default(),
            default_end_condition: EndCondition::default(),
            constants: EvaluationConstants::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::search::{MaterialSelector, SearchInput};
    use crate::calculations::spring::SpringParameters;

    fn sample_search() -> SearchInput {
        SearchInput {
            label: "SP-1".to_string(),
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

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Actuators");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Actuators");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::new("Jane Engineer", "25-042", "Test Client");
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("25-042"));
        assert!(json.contains("A228"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "25-001", "Client");

        let id = project.add_item(CalculationItem::SpringSearch(sample_search()));
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());
        assert_eq!(project.get_item(&id).unwrap().label(), "SP-1");

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_touch_updates_modified() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let before = project.meta.modified;
        project.add_item(CalculationItem::SpringSearch(sample_search()));
        assert!(project.meta.modified >= before);
    }

    #[test]
    fn test_default_settings() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.default_material, SpringWireMaterial::MusicWire);
        assert_eq!(settings.default_end_type, EndType::SquaredGround);
        assert_eq!(settings.default_end_condition, EndCondition::FixedFixed);
        assert_eq!(settings.constants.gravity_mm_s2, 9810.0);
    }
}
