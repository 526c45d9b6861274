//! Point queries against predicates and relations.

use crate::bdd::Bdd;
use crate::encoding::{check_node, point_assignment};
use crate::error::Result;
use crate::family::{Family, NUM_NODES, X, Y};
use crate::reference::Ref;

impl Bdd {
    /// Whether `node` satisfies `predicate` over `family`.
    pub fn node_in_predicate(&self, predicate: Ref, node: u32, family: Family) -> Result<bool> {
        self.decode_point_membership(predicate, node, family)
    }

    /// Whether the pair `(src, dst)` belongs to `relation`.
    pub fn edge_in_relation(&self, relation: Ref, src: u32, dst: u32) -> Result<bool> {
        check_node(src)?;
        check_node(dst)?;
        let mut values = point_assignment(src, X);
        values.extend(point_assignment(dst, Y));
        let res = self.restrict_multi(relation, &values);
        Ok(self.is_one(res))
    }

    /// Targets reachable from `src` in one application of `relation`, in ascending order.
    pub fn successors(&self, relation: Ref, src: u32) -> Result<Vec<u32>> {
        check_node(src)?;
        Ok(self.successors_unchecked(relation, src))
    }

    pub(crate) fn successors_unchecked(&self, relation: Ref, src: u32) -> Vec<u32> {
        let row = self.restrict_multi(relation, &point_assignment(src, X));
        if self.is_zero(row) {
            return Vec::new();
        }
        (0..NUM_NODES as u32)
            .filter(|&dst| self.is_one(self.restrict_multi(row, &point_assignment(dst, Y))))
            .collect()
    }
}
