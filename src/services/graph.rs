use std::time::Instant;

use crate::models::Book;

/// Undirected similarity graph over catalogue positions.
///
/// Node `i` is the book at position `i` of the catalogue. Two distinct books
/// are joined when they share an author or a genre.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    /// Adjacency lists in insertion order; read back newest-first
    adj: Vec<Vec<usize>>,
}

impl SimilarityGraph {
    /// Creates a graph with `node_count` nodes and no edges
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); node_count],
        }
    }

    /// Builds the graph by comparing every unordered pair of books.
    ///
    /// Quadratic in the catalogue size; this one-time build dominates the cost
    /// of the whole program on large catalogues.
    pub fn build(books: &[Book]) -> Self {
        let started = Instant::now();
        let mut graph = Self::with_nodes(books.len());

        for (i, a) in books.iter().enumerate() {
            for (j, b) in books.iter().enumerate().skip(i + 1) {
                if a.is_similar_to(b) {
                    graph.add_edge(i, j);
                }
            }
        }

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity graph built"
        );

        graph
    }

    /// Adds the undirected edge `src`-`dst`. Self loops and out-of-range
    /// nodes are ignored.
    pub fn add_edge(&mut self, src: usize, dst: usize) {
        if src == dst || src >= self.adj.len() || dst >= self.adj.len() {
            return;
        }
        self.adj[src].push(dst);
        self.adj[dst].push(src);
    }

    /// Neighbors of `node`, most recently linked first
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj
            .get(node)
            .into_iter()
            .flat_map(|list| list.iter().rev().copied())
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(|list| list.len()).sum::<usize>() / 2
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adj.get(a).is_some_and(|list| list.contains(&b))
    }

    /// Frees all adjacency storage
    pub fn release(&mut self) {
        tracing::debug!(nodes = self.adj.len(), "Releasing similarity graph");
        self.adj = Vec::new();
    }
}
