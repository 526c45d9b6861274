//! Fixed-size directed graph over [`NUM_NODES`] nodes.

use crate::family::NUM_NODES;

/// Adjacency matrix: `edges[i][j]` is set iff there is an edge `i -> j`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Graph {
    edges: [[bool; NUM_NODES]; NUM_NODES],
}

impl Graph {
    pub fn empty() -> Self {
        Self {
            edges: [[false; NUM_NODES]; NUM_NODES],
        }
    }

    /// Every node `i` gets an edge to `(i + s) mod N` for each stride `s`.
    pub fn with_strides(strides: &[usize]) -> Self {
        let mut graph = Self::empty();
        for i in 0..NUM_NODES {
            for j in 0..NUM_NODES {
                graph.edges[i][j] = strides
                    .iter()
                    .any(|&s| (i + s) % NUM_NODES == j % NUM_NODES);
            }
        }
        graph
    }

    /// The graph the statement is evaluated on: strides 3 and 8.
    pub fn standard() -> Self {
        Self::with_strides(&[3, 8])
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges[from][to] = true;
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges[from][to]
    }

    /// All edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..NUM_NODES).flat_map(move |i| {
            (0..NUM_NODES)
                .filter(move |&j| self.edges[i][j])
                .map(move |j| (i, j))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_graph() {
        let graph = Graph::standard();

        assert_eq!(graph.num_edges(), 2 * NUM_NODES);
        assert!(graph.has_edge(27, 30));
        assert!(graph.has_edge(27, 3));
        assert!(graph.has_edge(16, 19));
        assert!(graph.has_edge(16, 24));
        assert!(!graph.has_edge(16, 20));
        for i in 0..NUM_NODES {
            let out = (0..NUM_NODES).filter(|&j| graph.has_edge(i, j)).count();
            assert_eq!(out, 2);
        }
    }

    #[test]
    fn test_empty_and_manual_edges() {
        let mut graph = Graph::empty();
        assert_eq!(graph.num_edges(), 0);

        graph.add_edge(1, 2);
        graph.add_edge(0, 5);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 5), (1, 2)]);
    }
}
