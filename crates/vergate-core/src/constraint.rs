//! API lifecycle constraints and their compatibility verdicts
//!
//! Every version-sensitive operation carries a [`VersionConstraint`]
//! describing when it was added, deprecated, or removed. Evaluating a
//! constraint against the connected host version yields a [`Compatibility`]
//! verdict that the gate turns into an error, a deprecation notice, or a
//! plain pass-through.
//!
//! Copyright (c) 2025 Vergate Team
//! Licensed under the Apache-2.0 license

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Lifecycle status of an API relative to a concrete host version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    /// The API exists and is fully supported
    Available,
    /// The API does not exist yet in this host version
    AddedLater,
    /// The API still works but is discouraged
    Deprecated,
    /// The API no longer exists in this host version
    Removed,
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStatus::Available => write!(f, "available"),
            ApiStatus::AddedLater => write!(f, "added_later"),
            ApiStatus::Deprecated => write!(f, "deprecated"),
            ApiStatus::Removed => write!(f, "removed"),
        }
    }
}

/// Compatibility verdict produced by [`VersionConstraint::evaluate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    /// Whether the call may proceed
    pub is_compatible: bool,
    /// Lifecycle status behind the verdict
    pub status: ApiStatus,
    /// Human-readable explanation suitable for error messages
    pub message: String,
}

/// Version lifecycle of one API.
///
/// All fields are optional; an empty constraint is compatible with every
/// host version. Construction is permissive: contradictory field orderings
/// are not rejected, the check order in [`evaluate`](Self::evaluate)
/// decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConstraint {
    /// First host version in which the API exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_in: Option<Version>,

    /// Host version in which the API was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_in: Option<Version>,

    /// Host version since which the API is deprecated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_in: Option<Version>,

    /// Replacement location when the API was moved elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_to: Option<String>,

    /// Free-form compatibility notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VersionConstraint {
    /// Evaluate this constraint against the connected host version.
    ///
    /// Hard incompatibilities (not yet added, already removed) are checked
    /// before the soft deprecated state. The removal boundary is exclusive:
    /// a host running exactly `removed_in` no longer has the API.
    pub fn evaluate(&self, current: Version) -> Compatibility {
        if let Some(added_in) = self.added_in {
            if current < added_in {
                return Compatibility {
                    is_compatible: false,
                    status: ApiStatus::AddedLater,
                    message: format!("API not available; added in version {added_in}"),
                };
            }
        }

        if let Some(removed_in) = self.removed_in {
            if current >= removed_in {
                let mut message = format!("API removed in version {removed_in}");
                if let Some(moved_to) = &self.moved_to {
                    message.push_str(&format!(". Moved to {moved_to}"));
                }
                return Compatibility {
                    is_compatible: false,
                    status: ApiStatus::Removed,
                    message,
                };
            }
        }

        if let Some(deprecated_in) = self.deprecated_in {
            if current >= deprecated_in {
                let mut message = format!("API deprecated since version {deprecated_in}");
                if let Some(moved_to) = &self.moved_to {
                    message.push_str(&format!(". Use {moved_to} instead"));
                }
                return Compatibility {
                    is_compatible: true,
                    status: ApiStatus::Deprecated,
                    message,
                };
            }
        }

        Compatibility {
            is_compatible: true,
            status: ApiStatus::Available,
            message: "API available".to_string(),
        }
    }

    /// Cheap projection of [`evaluate`](Self::evaluate) for callers that
    /// only need a yes/no answer.
    pub fn is_compatible(&self, current: Version) -> bool {
        if let Some(added_in) = self.added_in {
            if current < added_in {
                return false;
            }
        }
        if let Some(removed_in) = self.removed_in {
            if current >= removed_in {
                return false;
            }
        }
        true
    }
}
