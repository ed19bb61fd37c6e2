//! Node identifier types
//!
//! Groups and layers of a host document live in an arena owned by the host.
//! Everything outside the host refers to them through these copyable ids,
//! which never own the node they point at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a group (folder) node
///
/// # Examples
///
/// ```
/// use leafex::domain::ids::GroupId;
///
/// let id = GroupId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "group#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(usize);

impl GroupId {
    /// Creates a group id from an arena index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Identifier of a layer node
///
/// # Examples
///
/// ```
/// use leafex::domain::ids::LayerId;
///
/// let id = LayerId::new(7);
/// assert_eq!(id.index(), 7);
/// assert_eq!(id.to_string(), "layer#7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(usize);

impl LayerId {
    /// Creates a layer id from an arena index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}
