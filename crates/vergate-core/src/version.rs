//! Host application version representation
//!
//! The host reports its version as an ordered list of numeric fields, while
//! constraint declarations use dotted strings like `"20.1.0"`. Both collapse
//! into the same `(major, minor, patch)` triple, compared lexicographically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A host application version as a `(major, minor, patch)` triple.
///
/// Ordering is lexicographic on the three fields. Build numbers and other
/// trailing metadata reported by the host never participate in ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Patch version number, 0 when the source omitted it
    pub patch: u32,
}

impl Version {
    /// Create a version from explicit fields.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Build a version from the list-like report returned by the host's
    /// version accessor, `[major, minor, patch, build, ...]`.
    ///
    /// At least two fields are required. The third field is taken as the
    /// patch level and defaults to 0; anything after it is ignored.
    pub fn from_fields(fields: &[u32]) -> Result<Self> {
        if fields.len() < 2 {
            return Err(Error::Parse {
                input: format!("{fields:?}"),
                message: "at least major and minor fields are required".to_string(),
            });
        }
        Ok(Self {
            major: fields[0],
            minor: fields[1],
            patch: fields.get(2).copied().unwrap_or(0),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Parse a dotted version string such as `"20.1.0"` or `"19.0"`.
    ///
    /// Only the first three dot-separated fields are inspected; a missing
    /// patch field defaults to 0.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() < 2 {
            return Err(Error::Parse {
                input: s.to_string(),
                message: "expected at least '<major>.<minor>'".to_string(),
            });
        }
        let field = |part: &str| -> Result<u32> {
            part.parse().map_err(|_| Error::Parse {
                input: s.to_string(),
                message: format!("invalid numeric field '{part}'"),
            })
        };
        Ok(Self {
            major: field(parts[0])?,
            minor: field(parts[1])?,
            patch: match parts.get(2) {
                Some(part) => field(part)?,
                None => 0,
            },
        })
    }
}
