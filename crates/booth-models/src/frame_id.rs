//! Per-frame identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identity of a captured frame.
///
/// Detection results are keyed by frame identity so that a result arriving
/// after a newer frame has been submitted can be recognized as stale and
/// discarded instead of being applied to the wrong frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub Uuid);

impl FrameId {
    /// Generate a new random frame ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(FrameId::new(), FrameId::new());
    }

    #[test]
    fn test_display_round_trip() {
        let id = FrameId::new();
        let parsed: Uuid = id.to_string().parse().unwrap();
        assert_eq!(id.0, parsed);
    }
}
