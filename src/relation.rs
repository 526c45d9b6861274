//! Relations over pairs of nodes and predicates over single nodes.
//!
//! A relation is a BDD over the source family [`X`] and the target family
//! [`Y`]; a predicate is a BDD over a single family.

use log::debug;
use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::family::{Family, Flags, NODE_BITS, NUM_NODES, X, Y};
use crate::graph::Graph;
use crate::reference::Ref;

impl Bdd {
    /// Characteristic function of the edge set of `graph` over `(x, y)`.
    pub fn build_base_relation(&self, graph: &Graph) -> Ref {
        let relation = self.apply_or_many(graph.edges().map(|(i, j)| {
            let src = self.point_cube(i as u32, X);
            let dst = self.point_cube(j as u32, Y);
            self.apply_and(src, dst)
        }));
        debug!(
            "build_base_relation: {} edges, {} nodes",
            graph.num_edges(),
            self.size(relation)
        );
        relation
    }

    /// Predicate over `family` holding exactly for the flagged nodes.
    pub fn build_predicate(&self, flags: &Flags, family: Family) -> Ref {
        self.encode_set(flags, family)
    }

    /// Number of `(x, y)` pairs in `relation`.
    pub fn count_pairs(&self, relation: Ref) -> BigUint {
        self.sat_count(relation, 2 * NODE_BITS as usize)
    }

    /// Number of nodes satisfying `predicate`, a function over a single family.
    pub fn count_members(&self, predicate: Ref) -> BigUint {
        self.sat_count(predicate, NODE_BITS as usize)
    }

    /// All pairs of `relation`, sorted by source then target.
    pub fn pairs(&self, relation: Ref) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        for src in 0..NUM_NODES as u32 {
            for dst in self.successors_unchecked(relation, src) {
                pairs.push((src, dst));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_base_relation_edges() {
        let bdd = Bdd::default();
        let graph = Graph::standard();
        let rr = bdd.build_base_relation(&graph);

        assert!(bdd.edge_in_relation(rr, 27, (27 + 3) % 32).unwrap());
        assert!(bdd.edge_in_relation(rr, 27, (27 + 8) % 32).unwrap());
        assert!(bdd.edge_in_relation(rr, 27, 3).unwrap());
        assert!(!bdd.edge_in_relation(rr, 16, 20).unwrap());
        assert!(bdd.edge_in_relation(rr, 16, 19).unwrap());
        assert!(bdd.edge_in_relation(rr, 16, 24).unwrap());
    }

    #[test]
    fn test_base_relation_matches_graph() {
        let bdd = Bdd::default();
        let graph = Graph::standard();
        let rr = bdd.build_base_relation(&graph);

        let expected: Vec<(u32, u32)> = graph.edges().map(|(i, j)| (i as u32, j as u32)).collect();
        assert_eq!(bdd.pairs(rr), expected);
        assert_eq!(bdd.count_pairs(rr), BigUint::from(64u32));
    }

    #[test]
    fn test_base_relation_support() {
        let bdd = Bdd::default();
        let rr = bdd.build_base_relation(&Graph::standard());

        let support = bdd.support(rr);
        assert!(support.iter().all(|&v| X.contains(v) || Y.contains(v)));
    }

    #[test]
    fn test_empty_graph_is_false() {
        let bdd = Bdd::default();
        let rr = bdd.build_base_relation(&Graph::empty());

        assert!(bdd.is_zero(rr));
        assert_eq!(bdd.count_pairs(rr), BigUint::from(0u32));
    }

    #[test]
    fn test_predicate_count() {
        let bdd = Bdd::default();

        let mut flags = [false; NUM_NODES];
        flags[3] = true;
        flags[17] = true;
        flags[31] = true;
        let p = bdd.build_predicate(&flags, Y);

        assert_eq!(bdd.count_members(p), BigUint::from(3u32));
        assert!(bdd.node_in_predicate(p, 17, Y).unwrap());
        assert!(!bdd.node_in_predicate(p, 16, Y).unwrap());
    }
}
