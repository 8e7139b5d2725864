//! Opaque element identifiers handed out by the host tree.

use serde::{Deserialize, Serialize};

/// Handle to a host element (DOM node, view, ...). The core never
/// dereferences it; adapters map it back to the real element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Monotonic allocator for ElementId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating above ids the host already uses.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    #[inline]
    pub fn alloc(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next = self.next.wrapping_add(1);
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
    fn ids_are_monotonic_and_reset() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.alloc(), ElementId(0));
        assert_eq!(ids.alloc(), ElementId(1));
        ids.reset();
        assert_eq!(ids.alloc(), ElementId(0));

        let mut offset = IdAllocator::starting_at(100);
        assert_eq!(offset.alloc(), ElementId(100));
    }
}
