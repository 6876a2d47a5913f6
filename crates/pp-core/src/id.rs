use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for frame IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Monotonic counter shared by every generated ID.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A lightweight, interned identifier for a frame in a scene.
///
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1). IDs are
/// opaque: nothing in the engine derives meaning from the string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(Spur);

impl FrameId {
    /// Intern a string as a FrameId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        FrameId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// A fresh ID for a foreground frame (product photo, prop, duplicate).
    pub fn fresh() -> Self {
        Self::with_prefix("frame")
    }

    /// A fresh ID for a background frame.
    pub fn fresh_background() -> Self {
        Self::with_prefix("bg")
    }

    /// Generate a unique ID with a prefix (e.g. `frame_3`, `bg_4`).
    pub fn with_prefix(prefix: &str) -> Self {
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}_{n}");
            // Skip names a caller already interned by hand.
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FrameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FrameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FrameId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = FrameId::intern("hero_bottle");
        let b = FrameId::intern("hero_bottle");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero_bottle");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = FrameId::fresh();
        let b = FrameId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("frame_"));
        assert!(FrameId::fresh_background().as_str().starts_with("bg_"));
    }

    #[test]
    fn fresh_skips_hand_interned_names() {
        let next = COUNTER.load(Ordering::Relaxed);
        let taken = FrameId::intern(&format!("frame_{next}"));
        let fresh = FrameId::fresh();
        assert_ne!(fresh, taken);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FrameId::intern("prop_podium");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"prop_podium\"");
        let back: FrameId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
