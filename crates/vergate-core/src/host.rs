//! Live connection version state
//!
//! Operations are declared long before a connection to the host application
//! exists, so the gate reads the current version through a provider seam
//! instead of a global. [`HostVersion`] is the shared-cell implementation
//! the binding layer records into whenever a connection is established.

use parking_lot::RwLock;

use crate::error::Result;
use crate::version::Version;

/// Source of the currently connected host application's version.
///
/// `None` means no connection has been established yet; the gate turns
/// that into a not-initialized error instead of guessing.
pub trait VersionProvider: Send + Sync {
    /// Version reported by the live connection, if any.
    fn current_version(&self) -> Option<Version>;
}

/// Shared cell holding the version reported by the live connection.
///
/// The binding layer calls [`record_fields`](Self::record_fields) after
/// each successful connection; reconnecting to a different host version
/// simply overwrites the cell.
#[derive(Debug, Default)]
pub struct HostVersion {
    cell: RwLock<Option<Version>>,
}

impl HostVersion {
    /// Create a cell with no version recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the version from the host's list-like report,
    /// `[major, minor, patch, build, ...]`.
    pub fn record_fields(&self, fields: &[u32]) -> Result<()> {
        let version = Version::from_fields(fields)?;
        *self.cell.write() = Some(version);
        Ok(())
    }

    /// Record an already-parsed version.
    pub fn record(&self, version: Version) {
        *self.cell.write() = Some(version);
    }

    /// Forget the recorded version. Test harness use only.
    pub fn reset(&self) {
        *self.cell.write() = None;
    }

    /// Whether the connected host is at least `version`.
    ///
    /// `false` when no connection has been established.
    pub fn is_at_least(&self, version: Version) -> bool {
        self.cell.read().map_or(false, |current| current >= version)
    }
}

impl VersionProvider for HostVersion {
    fn current_version(&self) -> Option<Version> {
        *self.cell.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_without_a_version() {
        let host = HostVersion::new();
        assert!(host.current_version().is_none());
        assert!(!host.is_at_least(Version::new(1, 0, 0)));
    }

    #[test]
    fn test_record_fields_parses_host_report() {
        let host = HostVersion::new();
        host.record_fields(&[20, 2, 0, 12345]).unwrap();
        assert_eq!(host.current_version(), Some(Version::new(20, 2, 0)));
    }

    #[test]
    fn test_record_fields_rejects_short_report() {
        let host = HostVersion::new();
        assert!(host.record_fields(&[20]).is_err());
        assert!(host.current_version().is_none());
    }

    #[test]
    fn test_reconnection_overwrites_version() {
        let host = HostVersion::new();
        host.record(Version::new(19, 5, 0));
        host.record_fields(&[20, 1, 0]).unwrap();
        assert_eq!(host.current_version(), Some(Version::new(20, 1, 0)));
    }

    #[test]
    fn test_is_at_least_uses_full_ordering() {
        let host = HostVersion::new();
        host.record(Version::new(20, 1, 0));
        assert!(host.is_at_least(Version::new(20, 1, 0)));
        assert!(host.is_at_least(Version::new(19, 9, 9)));
        assert!(!host.is_at_least(Version::new(20, 1, 1)));
    }

    #[test]
    fn test_reset_forgets_version() {
        let host = HostVersion::new();
        host.record(Version::new(20, 0, 0));
        host.reset();
        assert!(host.current_version().is_none());
    }
}
