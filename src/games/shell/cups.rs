//! Cup arrangement: which ground-truth slot sits at each visible position.

pub const CUP_COUNT: usize = 3;

/// Bijection from visible cup position to ground-truth slot.
///
/// Only ever changed by swapping two entries, so it stays a permutation of
/// `0..CUP_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cups([usize; CUP_COUNT]);

impl Default for Cups {
    fn default() -> Self {
        Self::identity()
    }
}

impl Cups {
    #[must_use]
    pub const fn identity() -> Self {
        Self([0, 1, 2])
    }

    /// Ground-truth slot under the cup shown at `visual`.
    #[must_use]
    pub fn slot_at(&self, visual: usize) -> Option<usize> {
        self.0.get(visual).copied()
    }

    /// Visible position currently showing ground-truth `slot`.
    #[must_use]
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.0.iter().position(|&s| s == slot)
    }

    /// Exchange the cups at two visible positions. Out-of-range positions
    /// are ignored.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < CUP_COUNT && b < CUP_COUNT {
            self.0.swap(a, b);
        }
    }

    #[must_use]
    pub fn as_array(&self) -> [usize; CUP_COUNT] {
        self.0
    }

    /// Whether every slot appears exactly once.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; CUP_COUNT];
        for &slot in &self.0 {
            if slot >= CUP_COUNT || seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }
}
