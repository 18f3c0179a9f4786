use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a lesson within the curriculum.
///
/// Lesson ids are opaque strings handed over by the curriculum layer
/// (slugs such as `"fractions-intro"`). No shape is enforced here; whatever
/// the curriculum uses as a key is accepted verbatim.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    /// Creates a `LessonId` from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({:?})", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LessonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LessonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_slug() {
        let id = LessonId::new("fractions-intro");
        assert_eq!(id.to_string(), "fractions-intro");
    }

    #[test]
    fn conversions_round_trip() {
        let id: LessonId = "algebra-1".into();
        assert_eq!(id.as_str(), "algebra-1");
        assert_eq!(id.into_string(), "algebra-1");
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(LessonId::new("l1"), 1);
        assert_eq!(map.get(&LessonId::new("l1")), Some(&1));
        assert_eq!(map.get(&LessonId::new("l2")), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = LessonId::new("l1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"l1\"");
        let back: LessonId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
