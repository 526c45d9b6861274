/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// Wrapping arithmetic keeps large inputs from overflowing; the result is
/// only ever used as a hash.
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing2(a: u64, b: u64) -> u64 {
    if a < b {
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        a.wrapping_mul(a).wrapping_add(a).wrapping_add(b)
    }
}

/// Pairing function for three `u64` values.
pub fn pairing3(a: u64, b: u64, c: u64) -> u64 {
    pairing2(pairing2(a, b), c)
}

/// Hash used to pick a bucket in the unique table.
pub trait MyHash {
    fn hash(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_szudzik() {
        // a\b  0  1  2
        // ------------
        // 0    0  1  4
        // 1    2  3  5
        // 2    6  7  8
        assert_eq!(pairing2(0, 0), 0);
        assert_eq!(pairing2(0, 1), 1);
        assert_eq!(pairing2(1, 0), 2);
        assert_eq!(pairing2(1, 1), 3);
        assert_eq!(pairing2(0, 2), 4);
        assert_eq!(pairing2(1, 2), 5);
        assert_eq!(pairing2(2, 0), 6);
        assert_eq!(pairing2(2, 2), 8);
    }

    #[test]
    fn test_pairing3_order_matters() {
        assert_ne!(pairing3(1, 2, 3), pairing3(3, 2, 1));
        assert_eq!(pairing3(0, 0, 0), 0);
    }
}
