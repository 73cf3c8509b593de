//! Identifiers and a simple allocator for mounted cards.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// Monotonic allocator for CardId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_card: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_card(&mut self) -> CardId {
        let id = CardId(self.next_card);
        self.next_card = self.next_card.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_card(), CardId(0));
        assert_eq!(alloc.alloc_card(), CardId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_card(), CardId(0));
    }
}
