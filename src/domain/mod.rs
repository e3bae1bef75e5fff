//! Strongly typed domain primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a cafe record.
///
/// Wraps the auto-assigned primary key so handlers and services cannot mix it
/// up with other integers (prices, seat counts, page numbers).
///
/// # Examples
///
/// ```rust
/// use cafe_wifi::domain::CafeId;
///
/// let id = CafeId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CafeId(i32);

impl CafeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CafeId> for i32 {
    fn from(id: CafeId) -> Self {
        id.0
    }
}

impl From<i32> for CafeId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for CafeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for CafeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cafe_id_conversions() {
        let id = CafeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(CafeId::from(42), id);
    }

    #[test]
    fn cafe_id_serialization() {
        let id = CafeId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: CafeId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }
}
