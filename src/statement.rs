//! Evaluation of "StatementA": every prime node reaches some even node.
//!
//! ```text
//! ∀u. prime(u) → ∃v. even(v) ∧ R*(u, v)
//! ```
//!
//! `R*` is the squaring fixpoint of the 2-step relation, see [`crate::closure`].

use log::{debug, info};

use crate::bdd::Bdd;
use crate::closure::ClosureConfig;
use crate::error::Result;
use crate::family::{Flags, NUM_NODES, X, Y};
use crate::graph::Graph;
use crate::reference::Ref;

/// Nodes treated as prime. Note that 2 is not in the list.
pub const PRIMES: [u32; 10] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

pub fn prime_flags() -> Flags {
    let mut flags = [false; NUM_NODES];
    for p in PRIMES {
        flags[p as usize] = true;
    }
    flags
}

pub fn even_flags() -> Flags {
    let mut flags = [false; NUM_NODES];
    for (i, flag) in flags.iter_mut().enumerate() {
        *flag = i % 2 == 0;
    }
    flags
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StatementConfig {
    pub closure: ClosureConfig,
    /// Rebuild the base relation and its closure for every prime source
    /// instead of computing them once.
    pub recompute_base_per_source: bool,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            closure: ClosureConfig::default(),
            recompute_base_per_source: true,
        }
    }
}

/// Line printed for the verdict.
pub fn verdict_line(result: bool) -> &'static str {
    if result {
        "StatementA is true"
    } else {
        "StatementA is false"
    }
}

impl Bdd {
    fn closure_of(&self, graph: &Graph, config: &ClosureConfig) -> Result<Ref> {
        let rr1 = self.build_base_relation(graph);
        let rr2 = self.compose_square(rr1)?;
        self.transitive_closure(rr2, config)
    }

    /// Evaluate StatementA over `graph`.
    ///
    /// Holds vacuously when no node is prime.
    pub fn evaluate_statement_a(&self, graph: &Graph, config: &StatementConfig) -> Result<bool> {
        let prime = self.build_predicate(&prime_flags(), Y);
        let even = self.build_predicate(&even_flags(), X);

        let shared = if config.recompute_base_per_source {
            None
        } else {
            Some(self.closure_of(graph, &config.closure)?)
        };

        let mut closures = Vec::new();
        for u in 0..NUM_NODES as u32 {
            if self.node_in_predicate(prime, u, Y)? {
                let star = match shared {
                    Some(star) => star,
                    None => self.closure_of(graph, &config.closure)?,
                };
                debug!("Closure for source {}: {} pairs", u, self.count_pairs(star));
                closures.push((u, star));
            }
        }

        for (u, star) in closures {
            let mut witness = None;
            for v in 0..NUM_NODES as u32 {
                if self.node_in_predicate(even, v, X)? && self.edge_in_relation(star, u, v)? {
                    witness = Some(v);
                    break;
                }
            }
            match witness {
                Some(v) => info!("Prime {} reaches even {}", u, v),
                None => {
                    info!("Prime {} reaches no even node", u);
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_prime_predicate() {
        let bdd = Bdd::default();
        let prime = bdd.build_predicate(&prime_flags(), Y);

        assert!(bdd.node_in_predicate(prime, 13, Y).unwrap());
        assert!(!bdd.node_in_predicate(prime, 2, Y).unwrap());
        for n in 0..NUM_NODES as u32 {
            assert_eq!(bdd.node_in_predicate(prime, n, Y).unwrap(), PRIMES.contains(&n));
        }
    }

    #[test]
    fn test_even_predicate() {
        let bdd = Bdd::default();
        let even = bdd.build_predicate(&even_flags(), X);

        assert!(bdd.node_in_predicate(even, 6, X).unwrap());
        assert!(!bdd.node_in_predicate(even, 17, X).unwrap());
    }

    #[test]
    fn test_statement_a_holds() {
        let bdd = Bdd::default();

        let result = bdd
            .evaluate_statement_a(&Graph::standard(), &StatementConfig::default())
            .unwrap();
        assert!(result);
        assert_eq!(verdict_line(result), "StatementA is true");
    }

    #[test]
    fn test_statement_a_shared_base() {
        let bdd = Bdd::default();
        let config = StatementConfig {
            recompute_base_per_source: false,
            ..Default::default()
        };

        assert!(bdd.evaluate_statement_a(&Graph::standard(), &config).unwrap());
    }

    #[test]
    fn test_statement_a_fails_with_self_loops() {
        let bdd = Bdd::default();

        // Self-loops only: every node reaches just itself, and primes are odd
        let graph = Graph::with_strides(&[0]);
        assert!(!bdd.evaluate_statement_a(&graph, &StatementConfig::default()).unwrap());
        assert_eq!(verdict_line(false), "StatementA is false");
    }

    #[test]
    fn test_statement_a_propagates_no_convergence() {
        let bdd = Bdd::default();
        let config = StatementConfig {
            closure: ClosureConfig::default().with_max_iterations(2),
            ..Default::default()
        };

        assert!(bdd.evaluate_statement_a(&Graph::standard(), &config).is_err());
    }
}
