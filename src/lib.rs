//! # bdd-closure: symbolic transitive closure with BDDs
//!
//! **`bdd-closure`** represents node sets and edge relations of a fixed
//! 32-node graph as **Binary Decision Diagrams (BDDs)**, squares relations
//! symbolically until they stop changing, and answers point queries against
//! the result.
//!
//! ## Layers
//!
//! - **[`bdd`]**: the [`Bdd`][crate::bdd::Bdd] manager. Hash-consed nodes with
//!   complement edges, ITE with a computed table, restriction, composition,
//!   renaming and existential quantification.
//! - **[`family`]**: the variable families `x`, `y` and `z` that encode node slots.
//! - **[`encoding`]**: nodes and node sets as boolean functions.
//! - **[`relation`]**: the base edge relation of a [`Graph`][crate::graph::Graph] and node predicates.
//! - **[`closure`]**: relational composition and the squaring fixpoint.
//! - **[`query`]**: membership and edge tests.
//! - **[`statement`]**: "every prime node reaches some even node".
//!
//! ## Example
//!
//! ```rust
//! use bdd_closure::bdd::Bdd;
//! use bdd_closure::closure::ClosureConfig;
//! use bdd_closure::graph::Graph;
//!
//! let bdd = Bdd::default();
//! let rr1 = bdd.build_base_relation(&Graph::standard());
//! let rr2 = bdd.compose_square(rr1).unwrap();
//! assert!(bdd.edge_in_relation(rr2, 27, 6).unwrap());
//!
//! let star = bdd.transitive_closure(rr2, &ClosureConfig::default()).unwrap();
//! assert!(bdd.edge_in_relation(star, 27, 3).unwrap());
//! ```

pub mod bdd;
pub mod cache;
pub mod closure;
pub mod encoding;
pub mod error;
pub mod family;
pub mod graph;
pub mod node;
pub mod query;
pub mod reference;
pub mod relation;
pub mod sat;
pub mod statement;
pub mod table;
pub mod utils;

pub use error::{Error, Result};
