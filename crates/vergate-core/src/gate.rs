//! Call-time version enforcement
//!
//! The gate is the interception layer wrapper façades thread every
//! version-sensitive call through. Declaring an operation registers its
//! constraint once; every later invocation resolves the live host version,
//! evaluates the constraint, and either blocks the call, logs a deprecation
//! notice, or passes straight through.
//!
//! Copyright (c) 2025 Vergate Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::Arc;

use crate::constraint::{ApiStatus, Compatibility, VersionConstraint};
use crate::error::{Error, Result};
use crate::host::VersionProvider;
use crate::registry::{CompatibilityReport, VersionRegistry};
use crate::version::Version;

/// Log target for deprecation notices, so tooling can collect them
/// separately from ordinary output.
pub const DEPRECATION_TARGET: &str = "vergate::deprecation";

/// Declaration-time version requirements for one operation.
///
/// Version fields are dotted strings like `"20.0.0"` or `"19.1"`; they are
/// parsed when the operation is declared, so a malformed string fails at
/// startup rather than at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequirement {
    /// Version the operation first appeared in
    pub added_in: Option<String>,
    /// Version the operation was removed in
    pub removed_in: Option<String>,
    /// Version the operation was deprecated in
    pub deprecated_in: Option<String>,
    /// Replacement location when the operation moved elsewhere
    pub moved_to: Option<String>,
    /// Free-form compatibility notes
    pub notes: Option<String>,
}

impl VersionRequirement {
    /// Requirement for operations that only need a minimum host version.
    pub fn minimum(version: &str) -> Self {
        Self {
            added_in: Some(version.to_string()),
            ..Self::default()
        }
    }

    /// Requirement for operations available in `[min, max)` only.
    pub fn range(min: &str, max: &str) -> Self {
        Self {
            added_in: Some(min.to_string()),
            removed_in: Some(max.to_string()),
            ..Self::default()
        }
    }

    fn parse(&self) -> Result<VersionConstraint> {
        let parse = |field: &Option<String>| -> Result<Option<Version>> {
            field.as_deref().map(str::parse).transpose()
        };
        Ok(VersionConstraint {
            added_in: parse(&self.added_in)?,
            removed_in: parse(&self.removed_in)?,
            deprecated_in: parse(&self.deprecated_in)?,
            moved_to: self.moved_to.clone(),
            notes: self.notes.clone(),
        })
    }
}

/// Derive the registry key for an operation, `"Component.operation"`.
///
/// The bare operation name is used when the owning component is unnamed.
pub fn api_identifier(component: &str, operation: &str) -> String {
    if component.is_empty() {
        operation.to_string()
    } else {
        format!("{component}.{operation}")
    }
}

/// Version enforcement gate shared by the wrapper façades of a connection.
///
/// Cloning is cheap; clones share the same registry and version provider.
#[derive(Clone)]
pub struct VersionGate {
    registry: Arc<VersionRegistry>,
    provider: Arc<dyn VersionProvider>,
}

impl VersionGate {
    /// Create a gate over a registry and a live-version provider.
    pub fn new(registry: Arc<VersionRegistry>, provider: Arc<dyn VersionProvider>) -> Self {
        Self { registry, provider }
    }

    /// Registry this gate registers into and reads from.
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Declare a version-sensitive operation.
    ///
    /// Parses the requirement, registers the constraint under
    /// `"component.operation"`, and returns that identifier. Called once
    /// per operation while the façades are wired up; declaring the same
    /// operation again replaces the previous constraint.
    pub fn declare(
        &self,
        component: &str,
        operation: &str,
        requirement: VersionRequirement,
    ) -> Result<String> {
        let constraint = requirement.parse()?;
        let api_id = api_identifier(component, operation);
        self.registry.register(&api_id, constraint);
        Ok(api_id)
    }

    /// Check whether `api_identifier` may be called right now.
    ///
    /// Fails with a not-initialized error when no connection exists and
    /// with an incompatibility error for hard verdicts. A deprecated but
    /// functional API logs a notice on [`DEPRECATION_TARGET`] and
    /// succeeds. Identifiers with no registered constraint are treated as
    /// unconditionally available. The registry is never written here.
    pub fn check(&self, api_identifier: &str) -> Result<()> {
        let current = self
            .provider
            .current_version()
            .ok_or_else(|| Error::NotInitialized {
                message: format!(
                    "'{api_identifier}' called before a connection to the host application was established"
                ),
            })?;

        let Some(constraint) = self.registry.get_constraint(api_identifier) else {
            return Ok(());
        };

        let verdict = constraint.evaluate(current);
        if !verdict.is_compatible {
            return Err(Error::Incompatible {
                api_name: api_identifier.to_string(),
                current_version: current.to_string(),
                constraint: verdict.message,
                moved_to: constraint.moved_to,
            });
        }

        if verdict.status == ApiStatus::Deprecated {
            log::warn!(target: DEPRECATION_TARGET, "{api_identifier}: {}", verdict.message);
        }

        Ok(())
    }

    /// Run `operation` behind the version check for `api_identifier`.
    ///
    /// The underlying result is returned unchanged; the closure is never
    /// invoked when the check fails.
    pub fn enforce<T>(&self, api_identifier: &str, operation: impl FnOnce() -> T) -> Result<T> {
        self.check(api_identifier)?;
        Ok(operation())
    }

    /// Constraint registered for `api_identifier`, if any.
    pub fn constraint_for(&self, api_identifier: &str) -> Option<VersionConstraint> {
        self.registry.get_constraint(api_identifier)
    }

    /// Compatibility verdict for one identifier against the live version.
    ///
    /// `None` when the operation was never declared. Evaluation only: no
    /// notice is logged and nothing is blocked, which makes this the right
    /// query for diagnostic surfaces.
    pub fn status_for(&self, api_identifier: &str) -> Result<Option<Compatibility>> {
        let current = self.current_version()?;
        Ok(self
            .registry
            .get_constraint(api_identifier)
            .map(|constraint| constraint.evaluate(current)))
    }

    /// Version reported by the live connection.
    pub fn current_version(&self) -> Result<Version> {
        self.provider
            .current_version()
            .ok_or_else(|| Error::NotInitialized {
                message: "no connection to the host application has been established".to_string(),
            })
    }

    /// Whether the connected host is at least `version`.
    pub fn is_at_least(&self, version: Version) -> Result<bool> {
        Ok(self.current_version()? >= version)
    }

    /// Compatibility report for every declared operation against the live
    /// connection's version.
    pub fn compatibility_report(&self) -> Result<CompatibilityReport> {
        Ok(self.registry.list_all(self.current_version()?))
    }
}

impl fmt::Debug for VersionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionGate")
            .field("registered_apis", &self.registry.len())
            .field("current_version", &self.provider.current_version())
            .finish()
    }
}
