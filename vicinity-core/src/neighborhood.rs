//! Identifiers for regions and the neighborhoods listed within them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Region descriptor used to scope neighborhood lookups.
///
/// # Examples
/// ```
/// use vicinity_core::Region;
///
/// let region = Region::from("seattle");
/// assert_eq!(region.as_str(), "seattle");
/// assert_eq!(region.to_string(), "seattle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Region(String);

impl Region {
    /// Wrap a region name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the region name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier assigned to a neighborhood by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NeighborhoodId(String);

impl NeighborhoodId {
    /// Wrap a directory identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NeighborhoodId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NeighborhoodId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NeighborhoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directory listing entry pairing an identifier with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeighborhoodEntry {
    /// Identifier used to fetch the neighborhood's metrics.
    pub id: NeighborhoodId,
    /// Human-facing name callers compare by.
    pub name: String,
}

impl NeighborhoodEntry {
    /// Build an entry from an identifier and a name.
    pub fn new(id: impl Into<NeighborhoodId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
