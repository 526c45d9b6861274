//! Variable families used to encode graph nodes.
//!
//! A node is a 5-bit integer, so every node slot (source, target, intermediate)
//! gets its own family of 5 BDD variables. Families are interleaved bit by bit:
//!
//! ```text
//! level:  x0 y0 z0 x1 y1 z1 ... x4 y4 z4
//! var:     1  2  3  4  5  6 ... 13 14 15
//! ```
//!
//! Bit 0 is the most significant bit of the node.

use std::fmt;

/// Number of bits in a node encoding.
pub const NODE_BITS: u32 = 5;

/// Number of nodes representable with [`NODE_BITS`] bits.
pub const NUM_NODES: usize = 1 << NODE_BITS;

/// Per-node membership flags, indexed by node.
pub type Flags = [bool; NUM_NODES];

const NUM_FAMILIES: u32 = 3;

/// Named, ordered set of [`NODE_BITS`] BDD variables encoding one node slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Family {
    name: char,
    slot: u32,
}

/// Source family.
pub const X: Family = Family::new('x', 0);
/// Target family.
pub const Y: Family = Family::new('y', 1);
/// Intermediate family, only used while composing relations.
pub const Z: Family = Family::new('z', 2);

impl Family {
    const fn new(name: char, slot: u32) -> Self {
        assert!(slot < NUM_FAMILIES);
        Self { name, slot }
    }

    pub fn name(&self) -> char {
        self.name
    }

    /// BDD variable for bit `bit` (0 is the most significant).
    pub fn variable(&self, bit: u32) -> u32 {
        assert!(bit < NODE_BITS, "Bit {} is out of range", bit);
        bit * NUM_FAMILIES + self.slot + 1
    }

    /// All variables of the family, most significant bit first.
    pub fn variables(&self) -> Vec<u32> {
        (0..NODE_BITS).map(|bit| self.variable(bit)).collect()
    }

    pub fn contains(&self, variable: u32) -> bool {
        variable != 0 && (variable - 1) % NUM_FAMILIES == self.slot
    }

    /// Pairs `(self_i, other_i)` for every bit, as expected by [`Bdd::rename`][crate::bdd::Bdd::rename].
    pub fn rename_pairs(&self, other: Family) -> Vec<(u32, u32)> {
        (0..NODE_BITS)
            .map(|bit| (self.variable(bit), other.variable(bit)))
            .collect()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_families_are_disjoint() {
        let mut seen = HashSet::new();
        for family in [X, Y, Z] {
            for v in family.variables() {
                assert!(seen.insert(v), "variable {} is shared", v);
                assert!(family.contains(v));
            }
        }
        assert_eq!(seen.len(), 15);
        assert_eq!(seen.iter().min(), Some(&1));
    }

    #[test]
    fn test_interleaved_order() {
        assert_eq!(X.variables(), vec![1, 4, 7, 10, 13]);
        assert_eq!(Y.variables(), vec![2, 5, 8, 11, 14]);
        assert_eq!(Z.variables(), vec![3, 6, 9, 12, 15]);
        assert!(!X.contains(2));
        assert!(!Z.contains(0));
    }

    #[test]
    fn test_rename_pairs() {
        assert_eq!(X.rename_pairs(Z)[0], (1, 3));
        assert_eq!(Y.rename_pairs(Z)[4], (14, 15));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bit_out_of_range() {
        X.variable(NODE_BITS);
    }
}
