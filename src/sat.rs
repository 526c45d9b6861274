use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Returns one satisfying cube of `node` as signed literals, if any exists.
    ///
    /// Variables that do not appear on the chosen path are left out.
    pub fn one_sat(&self, node: Ref) -> Option<Vec<i32>> {
        if self.is_zero(node) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = node;

        // Walk down, preferring the high branch whenever it is satisfiable
        while !self.is_one(current) {
            let var = self.variable(current.index()) as i32;
            let high = self.high_node(current);
            if !self.is_zero(high) {
                path.push(var);
                current = high;
            } else {
                path.push(-var);
                current = self.low_node(current);
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments of `node` over `num_vars` variables.
    ///
    /// `num_vars` must be at least the size of the support of `node`.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << num_vars;
        self.sat_count_(node, &max, &mut cache)
    }

    fn sat_count_(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::ZERO;
        } else if self.is_one(node) {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let low = self.low(node.index());
        let high = self.high(node.index());

        let count_low = self.sat_count_(low, max, cache);
        let count_high = self.sat_count_(high, max, cache);

        // Each branch fixes the node variable, halving its share
        let count: BigUint = (count_low + count_high) >> 1;
        let count = if node.is_negated() { max - count } else { count };

        cache.insert(node, count.clone());
        count
    }
}
