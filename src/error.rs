//! Errors reported by the relational layer.

/// Result type for relational operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node {node} is out of range: expected a value in 0..{limit}")]
    NodeOutOfRange { node: u32, limit: usize },

    #[error("Variable {variable} of intermediate family '{family}' already occurs in the relation")]
    FamilyCollision { family: char, variable: u32 },

    #[error("Fixpoint did not converge within {iterations} iterations")]
    NoConvergence { iterations: usize },
}
