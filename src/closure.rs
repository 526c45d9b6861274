//! Relational composition and the squaring fixpoint.
//!
//! Composition introduces the intermediate family [`Z`]:
//!
//! ```text
//! (R ∘ R)(x, y) = ∃z. R(x, z) ∧ R(z, y)
//! ```
//!
//! The fixpoint repeatedly squares a relation, so iterate `k` holds the pairs
//! connected by paths of exactly `2^k` times the seed's length. Iteration
//! stops as soon as squaring no longer changes the relation.

use log::debug;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::family::{NUM_NODES, X, Y, Z};
use crate::reference::Ref;

/// Limits for [`Bdd::transitive_closure`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClosureConfig {
    /// Squarings attempted before giving up with [`Error::NoConvergence`].
    pub max_iterations: usize,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2 * NUM_NODES * NUM_NODES,
        }
    }
}

impl ClosureConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Bdd {
    /// Compose `relation` with itself: `∃z. R(x, z) ∧ R(z, y)`.
    ///
    /// Fails with [`Error::FamilyCollision`] if `relation` already mentions a `z` variable.
    pub fn compose_square(&self, relation: Ref) -> Result<Ref> {
        if let Some(&variable) = self.support(relation).iter().find(|&&v| Z.contains(v)) {
            return Err(Error::FamilyCollision {
                family: Z.name(),
                variable,
            });
        }

        // R(z, y): edge from the intermediate node to the target
        let tail = self.rename(relation, &X.rename_pairs(Z));
        // R(x, z): edge from the source to the intermediate node
        let head = self.rename(relation, &Y.rename_pairs(Z));

        let joined = self.apply_and(head, tail);
        let res = self.exists(joined, &Z.variables());
        debug!(
            "compose_square(relation = {}) -> {} of size {}",
            relation,
            res,
            self.size(res)
        );
        Ok(res)
    }

    /// Fixpoint of `next = compose_square(current)` starting from `seed`.
    pub fn transitive_closure(&self, seed: Ref, config: &ClosureConfig) -> Result<Ref> {
        let iterates = self.closure_iterates(seed, config)?;
        Ok(*iterates.last().unwrap_or(&seed))
    }

    /// Every distinct iterate of the squaring fixpoint, starting with `seed` and ending with the fixpoint.
    pub fn closure_iterates(&self, seed: Ref, config: &ClosureConfig) -> Result<Vec<Ref>> {
        let mut iterates = vec![seed];
        let mut current = seed;

        for iteration in 1..=config.max_iterations {
            let next = self.compose_square(current)?;
            if self.is_equivalent(next, current) {
                debug!("Fixpoint reached after {} iterations", iteration);
                return Ok(iterates);
            }
            debug!(
                "Iteration {}: {} pairs, {} nodes",
                iteration,
                self.count_pairs(next),
                self.size(next)
            );
            iterates.push(next);
            current = next;
        }

        Err(Error::NoConvergence {
            iterations: config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use test_log::test;

    use super::*;
    use crate::graph::Graph;

    fn relation_from_edges(bdd: &Bdd, edges: &[(usize, usize)]) -> Ref {
        let mut graph = Graph::empty();
        for &(i, j) in edges {
            graph.add_edge(i, j);
        }
        bdd.build_base_relation(&graph)
    }

    #[test]
    fn test_compose_square_two_steps() {
        let bdd = Bdd::default();
        let rr = bdd.build_base_relation(&Graph::standard());
        let rr2 = bdd.compose_square(rr).unwrap();

        assert!(bdd.edge_in_relation(rr2, 27, 6).unwrap());
        assert!(!bdd.edge_in_relation(rr2, 27, 9).unwrap());
        assert_eq!(bdd.successors(rr2, 27).unwrap(), vec![1, 6, 11]);
        assert_eq!(bdd.count_pairs(rr2), BigUint::from(96u32));
    }

    #[test]
    fn test_compose_square_stays_over_xy() {
        let bdd = Bdd::default();
        let rr = bdd.build_base_relation(&Graph::standard());
        let rr2 = bdd.compose_square(rr).unwrap();

        assert!(bdd.support(rr2).iter().all(|&v| X.contains(v) || Y.contains(v)));
    }

    #[test]
    fn test_compose_square_chain() {
        let bdd = Bdd::default();

        // 0 -> 1 -> 2 -> 3
        let rr = relation_from_edges(&bdd, &[(0, 1), (1, 2), (2, 3)]);
        let rr2 = bdd.compose_square(rr).unwrap();
        assert_eq!(bdd.pairs(rr2), vec![(0, 2), (1, 3)]);

        // The input is left untouched
        assert_eq!(bdd.pairs(rr), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_compose_square_rejects_intermediate_family() {
        let bdd = Bdd::default();

        let z = bdd.mk_var(Z.variable(2));
        let rr = bdd.apply_and(bdd.build_base_relation(&Graph::standard()), z);
        assert_eq!(
            bdd.compose_square(rr),
            Err(Error::FamilyCollision {
                family: 'z',
                variable: Z.variable(2)
            })
        );
    }

    #[test]
    fn test_transitive_closure_standard_graph() {
        let bdd = Bdd::default();
        let rr = bdd.build_base_relation(&Graph::standard());
        let rr2 = bdd.compose_square(rr).unwrap();

        let iterates = bdd.closure_iterates(rr2, &ClosureConfig::default()).unwrap();
        let counts: Vec<BigUint> = iterates.iter().map(|&r| bdd.count_pairs(r)).collect();
        let expected: Vec<BigUint> = [96u32, 160, 288, 544, 1024].into_iter().map(BigUint::from).collect();
        assert_eq!(counts, expected);

        let star = bdd.transitive_closure(rr2, &ClosureConfig::default()).unwrap();
        assert_eq!(Some(&star), iterates.last());
        assert!(bdd.is_one(star));
        assert!(bdd.edge_in_relation(star, 27, 3).unwrap());
        assert!(bdd.edge_in_relation(star, 27, 6).unwrap());
    }

    #[test]
    fn test_transitive_closure_is_idempotent() {
        let bdd = Bdd::default();
        let rr = relation_from_edges(&bdd, &[(0, 1), (1, 2), (2, 3), (3, 0), (3, 4)]);
        let rr2 = bdd.compose_square(rr).unwrap();

        let star = bdd.transitive_closure(rr2, &ClosureConfig::default()).unwrap();
        assert!(bdd.is_equivalent(bdd.compose_square(star).unwrap(), star));
    }

    #[test]
    fn test_seed_already_fixpoint() {
        let bdd = Bdd::default();

        let identity: Vec<(usize, usize)> = (0..NUM_NODES).map(|i| (i, i)).collect();
        let rr = relation_from_edges(&bdd, &identity);

        let iterates = bdd.closure_iterates(rr, &ClosureConfig::default().with_max_iterations(1)).unwrap();
        assert_eq!(iterates, vec![rr]);
        assert_eq!(bdd.transitive_closure(rr, &ClosureConfig::default()).unwrap(), rr);
    }

    #[test]
    fn test_empty_relation_is_fixpoint() {
        let bdd = Bdd::default();

        let star = bdd.transitive_closure(bdd.zero, &ClosureConfig::default()).unwrap();
        assert!(bdd.is_zero(star));
    }

    #[test]
    fn test_squaring_oscillates_on_odd_cycle() {
        let bdd = Bdd::default();

        // R^4 = R on a 3-cycle, so squaring alternates between R and R^2
        let rr = relation_from_edges(&bdd, &[(0, 1), (1, 2), (2, 0)]);
        let config = ClosureConfig::default().with_max_iterations(10);
        assert_eq!(
            bdd.transitive_closure(rr, &config),
            Err(Error::NoConvergence { iterations: 10 })
        );
    }
}
