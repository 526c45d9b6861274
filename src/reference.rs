use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Handle to a BDD node owned by a [`Bdd`][crate::bdd::Bdd] manager.
///
/// The sign encodes a complement edge: `-r` denotes the negation of `r`.
/// The absolute value is the index of the node in the unique table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(i32);

impl Ref {
    pub const fn positive(index: u32) -> Self {
        Self(index as i32)
    }

    pub const fn negative(index: u32) -> Self {
        Self(-(index as i32))
    }

    pub const fn is_negated(&self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Index of the referenced node, ignoring the complement bit.
    pub const fn index(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Injective mapping into `u32`, used for hashing.
    pub const fn unsigned(self) -> u32 {
        (self.0.unsigned_abs() << 1) + (self.0 < 0) as u32
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}",
            if self.is_negated() { "~" } else { "" },
            self.index()
        )
    }
}
