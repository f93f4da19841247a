use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a block, assigned at creation and never reused.
///
/// Ids survive content edits, retypes and reorders; only duplication and
/// re-parsing mint fresh ones.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Source of fresh block ids.
///
/// Injected rather than ambient so callers (and tests) can control id
/// generation deterministically.
pub trait IdSource {
    fn next_id(&mut self) -> BlockId;
}

/// Default id source backed by random UUID v4.
#[derive(Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> BlockId {
        BlockId(Uuid::new_v4())
    }
}

/// Deterministic id source that hands out sequential ids. Intended for tests
/// and reproducible fixtures.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    next: u128,
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> BlockId {
        self.next += 1;
        BlockId(Uuid::from_u128(self.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_distinct_and_stable() {
        let mut ids = SequentialIdSource::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);

        let mut again = SequentialIdSource::default();
        assert_eq!(again.next_id(), a);
        assert_eq!(again.next_id(), b);
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut ids = UuidIdSource;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}
