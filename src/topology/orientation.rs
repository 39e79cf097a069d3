//! Face orientation as the edge-flip group C₂.
//!
//! Two trees sharing a face either traverse the shared edge in the same
//! z-order direction or in opposite directions. Composing orientations along
//! a walk across several faces is plain xor; every element is its own inverse.

use core::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

/// A finite group capturing per-face orientations.
/// Implementations **must** satisfy for all `a`, `b`, `c`:
///   - associativity: `compose(a, compose(b, c)) == compose(compose(a, b), c)`
///   - identity:      `compose(id, a) == a == compose(a, id)` where `id = Default::default()`
///   - inverse:       `compose(a, inverse(a)) == id == compose(inverse(a), a)`
///
/// `compose(a, b)` = "cross with `a`, then with `b`" along a walk.
pub trait Orientation: Copy + Default + Debug + 'static {
    fn compose(a: Self, b: Self) -> Self;
    fn inverse(a: Self) -> Self;
}

/// 1-bit edge reversal; `EdgeFlip(true)` is orientation code 1.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EdgeFlip(pub bool);

impl EdgeFlip {
    /// The aligned orientation (code 0).
    pub const ALIGNED: Self = EdgeFlip(false);
    /// The reversed orientation (code 1).
    pub const REVERSED: Self = EdgeFlip(true);

    /// Decode the orientation bit of a `tree_to_face` entry.
    #[inline]
    pub fn from_code(code: u8) -> Self {
        EdgeFlip(code & 1 == 1)
    }

    /// The stored orientation bit.
    #[inline]
    pub fn code(self) -> u8 {
        u8::from(self.0)
    }

    #[inline]
    pub fn is_reversed(self) -> bool {
        self.0
    }

    /// Apply the flip to a position on a two-corner face.
    #[inline]
    pub fn apply(self, position: usize) -> usize {
        position ^ usize::from(self.0)
    }
}

impl Debug for EdgeFlip {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("EdgeFlip").field(&self.0).finish()
    }
}

impl Orientation for EdgeFlip {
    #[inline]
    fn compose(a: Self, b: Self) -> Self {
        EdgeFlip(a.0 ^ b.0)
    }
    #[inline]
    fn inverse(a: Self) -> Self {
        a
    }
}

/// Accumulate a sequence of orientations left to right.
pub fn compose_all<O, I>(steps: I) -> O
where
    O: Orientation,
    I: IntoIterator<Item = O>,
{
    steps.into_iter().fold(O::default(), O::compose)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EdgeFlip; 2] = [EdgeFlip::ALIGNED, EdgeFlip::REVERSED];

    #[test]
    fn edge_flip_group_laws() {
        let id = EdgeFlip::default();
        for a in ALL {
            assert_eq!(EdgeFlip::compose(id, a), a);
            assert_eq!(EdgeFlip::compose(a, EdgeFlip::inverse(a)), id);
            for b in ALL {
                for c in ALL {
                    assert_eq!(
                        EdgeFlip::compose(a, EdgeFlip::compose(b, c)),
                        EdgeFlip::compose(EdgeFlip::compose(a, b), c)
                    );
                }
            }
        }
    }

    #[test]
    fn code_round_trip_and_position() {
        for a in ALL {
            assert_eq!(EdgeFlip::from_code(a.code()), a);
        }
        assert_eq!(EdgeFlip::REVERSED.apply(0), 1);
        assert_eq!(EdgeFlip::ALIGNED.apply(1), 1);
    }

    #[test]
    fn compose_all_counts_parity() {
        let odd = [false, true, false, false, false].map(EdgeFlip);
        assert_eq!(compose_all::<EdgeFlip, _>(odd), EdgeFlip::REVERSED);
        assert_eq!(
            compose_all::<EdgeFlip, _>(odd.iter().chain(odd.iter()).copied()),
            EdgeFlip::ALIGNED
        );
    }
}
