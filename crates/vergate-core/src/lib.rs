//! Vergate Core - version compatibility engine for remote scripting hosts
//!
//! This crate tracks, for every operation a scripting binding exposes,
//! which host application versions support it, and enforces that
//! compatibility automatically when the operation is called.
//!
//! # Main Components
//!
//! - **Version**: ordered `(major, minor, patch)` triple, parsed from
//!   constraint declarations and from the live connection's report
//! - **VersionConstraint**: lifecycle of one API (added / deprecated /
//!   removed / moved) and its compatibility verdict
//! - **VersionRegistry**: shared map from API identifier to constraint,
//!   populated once at declaration time
//! - **VersionGate**: call-time interception that blocks incompatible
//!   calls, logs deprecation notices, and passes everything else through
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vergate_core::{HostVersion, Result, VersionGate, VersionRegistry, VersionRequirement};
//!
//! fn example() -> Result<()> {
//!     let host = Arc::new(HostVersion::new());
//!     let gate = VersionGate::new(Arc::new(VersionRegistry::new()), host.clone());
//!
//!     // Declared once while the wrapper façades are wired up.
//!     let api_id = gate.declare(
//!         "Timeline",
//!         "export_subtitle",
//!         VersionRequirement::minimum("20.2.0"),
//!     )?;
//!
//!     // Recorded by the binding layer after connecting to the host.
//!     host.record_fields(&[20, 2, 0, 12345])?;
//!
//!     // Every call is checked; compatible calls pass through unchanged.
//!     let exported = gate.enforce(&api_id, || true)?;
//!     assert!(exported);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod constraint;
pub mod error;
pub mod gate;
pub mod host;
pub mod registry;
pub mod version;

// Re-export main types for convenience
pub use constraint::{ApiStatus, Compatibility, VersionConstraint};
pub use error::{Error, Result};
pub use gate::{api_identifier, VersionGate, VersionRequirement, DEPRECATION_TARGET};
pub use host::{HostVersion, VersionProvider};
pub use registry::{CompatibilityReport, ReportEntry, VersionRegistry};
pub use version::Version;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
