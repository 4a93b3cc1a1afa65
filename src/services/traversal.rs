use std::collections::VecDeque;

use super::graph::SimilarityGraph;

/// Breadth-first traversal whose visited set and discovery list persist
/// across seeds.
///
/// A node is appended to the discovery list when it is first seen, not when
/// it is dequeued. Seeds themselves are marked visited but never discovered,
/// unless an earlier seed already reached them.
pub struct Traversal<'g> {
    graph: &'g SimilarityGraph,
    visited: Vec<bool>,
    discovered: Vec<usize>,
}

impl<'g> Traversal<'g> {
    pub fn new(graph: &'g SimilarityGraph) -> Self {
        Self {
            graph,
            visited: vec![false; graph.node_count()],
            discovered: Vec::new(),
        }
    }

    /// Runs BFS from `seed`, extending the shared discovery list
    pub fn visit_from(&mut self, seed: usize) {
        if seed >= self.visited.len() {
            tracing::warn!(seed, nodes = self.visited.len(), "Traversal seed out of range");
            return;
        }

        let before = self.discovered.len();
        let mut frontier = VecDeque::from([seed]);
        self.visited[seed] = true;

        while let Some(current) = frontier.pop_front() {
            for next in self.graph.neighbors(current) {
                if !self.visited[next] {
                    self.visited[next] = true;
                    frontier.push_back(next);
                    self.discovered.push(next);
                }
            }
        }

        tracing::trace!(
            seed,
            newly_discovered = self.discovered.len() - before,
            "BFS pass finished"
        );
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Nodes in first-discovery order
    pub fn discovered(&self) -> &[usize] {
        &self.discovered
    }

    pub fn into_discovered(self) -> Vec<usize> {
        self.discovered
    }
}
