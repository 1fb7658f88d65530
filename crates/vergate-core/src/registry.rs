//! Process-wide constraint registry
//!
//! One registry instance is shared by every wrapper façade of a connection.
//! It is populated while operations are declared at startup and becomes
//! read-mostly afterwards; [`VersionRegistry::clear`] exists for test
//! harnesses only.
//!
//! Copyright (c) 2025 Vergate Team
//! Licensed under the Apache-2.0 license

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::constraint::{ApiStatus, VersionConstraint};
use crate::error::Result;
use crate::version::Version;

/// Registry mapping API identifiers to their version constraints.
///
/// Registration is an unconditional upsert, so re-declaring an operation
/// replaces its previous constraint. Writes are serialized by the internal
/// lock; reads are lock-shared and cheap.
#[derive(Debug, Default)]
pub struct VersionRegistry {
    entries: RwLock<HashMap<String, VersionConstraint>>,
}

impl VersionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an API under its identifier, replacing any previous
    /// constraint for the same identifier.
    pub fn register(&self, api_identifier: &str, constraint: VersionConstraint) {
        self.entries
            .write()
            .insert(api_identifier.to_string(), constraint);
    }

    /// Constraint registered for an API, if any.
    ///
    /// `None` means no constraint was declared; such operations are
    /// treated as compatible with every host version.
    pub fn get_constraint(&self, api_identifier: &str) -> Option<VersionConstraint> {
        self.entries.read().get(api_identifier).cloned()
    }

    /// Evaluate every registered constraint against `current`.
    pub fn list_all(&self, current: Version) -> CompatibilityReport {
        let entries = self
            .entries
            .read()
            .iter()
            .map(|(api_id, constraint)| {
                let verdict = constraint.evaluate(current);
                (
                    api_id.clone(),
                    ReportEntry {
                        is_compatible: verdict.is_compatible,
                        status: verdict.status,
                        message: verdict.message,
                    },
                )
            })
            .collect();
        CompatibilityReport {
            host_version: current,
            entries,
        }
    }

    /// Copy of every registered identifier and constraint.
    pub fn snapshot(&self) -> HashMap<String, VersionConstraint> {
        self.entries.read().clone()
    }

    /// Number of registered APIs.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove every registered API. Test harness use only: clearing a live
    /// registry silently disables all enforcement.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Per-API compatibility summary for one host version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Host version the report was evaluated against
    pub host_version: Version,
    /// Verdict per API identifier, in identifier order
    pub entries: BTreeMap<String, ReportEntry>,
}

/// One row of a [`CompatibilityReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Whether the API may be called on this host version
    pub is_compatible: bool,
    /// Lifecycle status behind the verdict
    pub status: ApiStatus,
    /// Human-readable explanation
    pub message: String,
}

impl CompatibilityReport {
    /// APIs that cannot be called on the reported host version.
    pub fn incompatible(&self) -> impl Iterator<Item = (&str, &ReportEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_compatible)
            .map(|(api_id, entry)| (api_id.as_str(), entry))
    }

    /// Render the report as pretty-printed JSON for diagnostic surfaces.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn added_in(s: &str) -> VersionConstraint {
        VersionConstraint {
            added_in: Some(v(s)),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_then_get_returns_constraint() {
        let registry = VersionRegistry::new();
        let constraint = added_in("20.2.0");
        registry.register("Timeline.export_subtitle", constraint.clone());
        assert_eq!(
            registry.get_constraint("Timeline.export_subtitle"),
            Some(constraint),
        );
    }

    #[test]
    fn test_get_unknown_identifier_is_none() {
        let registry = VersionRegistry::new();
        assert!(registry.get_constraint("Project.name").is_none());
    }

    #[test]
    fn test_reregistration_replaces_previous_constraint() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("19.0.0"));
        registry.register("Timeline.set_name", added_in("20.0.0"));
        let constraint = registry.get_constraint("Timeline.set_name").unwrap();
        assert_eq!(constraint.added_in, Some(v("20.0.0")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_empties_the_registry() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("20.0.0"));
        registry.register("Timeline.export_subtitle", added_in("20.2.0"));
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get_constraint("Timeline.set_name").is_none());
        assert!(registry.get_constraint("Timeline.export_subtitle").is_none());
    }

    #[test]
    fn test_list_all_evaluates_every_entry() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("20.2.0"));
        registry.register("Timeline.get_name", added_in("18.0.0"));

        let report = registry.list_all(v("20.1.0"));
        assert_eq!(report.host_version, v("20.1.0"));
        assert_eq!(report.entries.len(), 2);

        let blocked = &report.entries["Timeline.set_name"];
        assert!(!blocked.is_compatible);
        assert_eq!(blocked.status, ApiStatus::AddedLater);
        assert!(blocked.message.contains("20.2.0"));

        assert!(report.entries["Timeline.get_name"].is_compatible);
    }

    #[test]
    fn test_report_incompatible_filter() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("20.2.0"));
        registry.register("Timeline.get_name", added_in("18.0.0"));

        let report = registry.list_all(v("19.0.0"));
        let incompatible: Vec<&str> = report.incompatible().map(|(api_id, _)| api_id).collect();
        assert_eq!(incompatible, vec!["Timeline.set_name"]);

        let report = registry.list_all(v("21.0.0"));
        assert_eq!(report.incompatible().count(), 0);
    }

    #[test]
    fn test_report_renders_to_json() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("20.2.0"));

        let json = registry.list_all(v("19.0.0")).to_json().unwrap();
        assert!(json.contains("Timeline.set_name"));
        assert!(json.contains("\"is_compatible\": false"));
    }

    #[test]
    fn test_snapshot_copies_all_entries() {
        let registry = VersionRegistry::new();
        registry.register("Timeline.set_name", added_in("20.0.0"));
        registry.register("Gallery.get_albums", added_in("18.0.0"));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_key("Timeline.set_name"));
        assert!(snapshot.contains_key("Gallery.get_albums"));
    }
}
