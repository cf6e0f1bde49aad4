//! Branch/head layout over permanent indices

use super::{traversal, GraphLayout, LinearGraph, NodeRef};

/// Layout index per node plus the head each node was laid out under.
///
/// Heads are walked in order. Within a walk a node takes the current layout
/// index on first visit, and the index advances every time the walk bottoms
/// out, so each branch tip-to-fork segment shares one index. Layout indices
/// start at 1.
#[derive(Debug, Clone)]
pub struct GraphLayoutImpl {
    layout_index: Vec<usize>,
    head_nodes: Vec<usize>,
    // First layout index assigned under head_nodes[i]; strictly increasing
    head_starts: Vec<usize>,
}

impl GraphLayoutImpl {
    /// Heads are the nodes without up nodes, in index order
    pub fn build<G: LinearGraph + ?Sized>(graph: &G) -> Self {
        let heads: Vec<usize> = (0..graph.nodes_count())
            .filter(|&i| graph.up_nodes(i).iter().all(|n| n.is_not_loaded()))
            .collect();
        Self::build_with_heads(graph, &heads)
    }

    /// Nodes not reachable from `heads` are walked afterwards as extra heads
    pub fn build_with_heads<G: LinearGraph + ?Sized>(graph: &G, heads: &[usize]) -> Self {
        let nodes_count = graph.nodes_count();
        let mut layout = Self {
            layout_index: vec![0; nodes_count],
            head_nodes: Vec::new(),
            head_starts: Vec::new(),
        };
        let mut current = 1;

        for &head in heads {
            layout.lay_out_from(graph, head, &mut current);
        }
        let given_heads = layout.head_nodes.len();
        for node in 0..nodes_count {
            layout.lay_out_from(graph, node, &mut current);
        }

        tracing::debug!(
            "Layout built: {} nodes, {} heads ({} unreachable from given heads), {} layout indices",
            nodes_count,
            layout.head_nodes.len(),
            layout.head_nodes.len() - given_heads,
            current - 1
        );
        layout
    }

    fn lay_out_from<G: LinearGraph + ?Sized>(&mut self, graph: &G, head: usize, current: &mut usize) {
        if self.layout_index[head] != 0 {
            return;
        }
        self.head_nodes.push(head);
        self.head_starts.push(*current);

        let layout_index = &mut self.layout_index;
        traversal::walk(head, |node| {
            let first_visit = layout_index[node] == 0;
            if first_visit {
                layout_index[node] = *current;
            }

            let child = graph
                .down_nodes(node)
                .into_iter()
                .filter_map(NodeRef::index)
                .find(|&child| layout_index[child] == 0);

            if child.is_none() && first_visit {
                *current += 1;
            }
            child
        });
    }
}

impl GraphLayout for GraphLayoutImpl {
    fn nodes_count(&self) -> usize {
        self.layout_index.len()
    }

    fn layout_index(&self, node_index: usize) -> usize {
        self.layout_index[node_index]
    }

    fn one_of_head_node_index(&self, node_index: usize) -> usize {
        let layout_index = self.layout_index[node_index];
        let head = self.head_starts.partition_point(|&start| start <= layout_index) - 1;
        self.head_nodes[head]
    }

    fn head_node_indices(&self) -> &[usize] {
        &self.head_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PermanentLinearGraph;

    fn graph(down: &[&[usize]]) -> PermanentLinearGraph {
        PermanentLinearGraph::from_down_nodes(
            down.iter().map(|parents| parents.iter().map(|&p| NodeRef::Index(p)).collect()).collect(),
        )
    }

    #[test]
    fn test_linear_history_single_layout_index() {
        let g = graph(&[&[1], &[2], &[]]);
        let layout = GraphLayoutImpl::build(&g);

        assert_eq!(layout.head_node_indices(), &[0]);
        assert!((0..3).all(|i| layout.layout_index(i) == 1));
        assert!((0..3).all(|i| layout.one_of_head_node_index(i) == 0));
    }

    #[test]
    fn test_merge_second_parent_gets_new_index() {
        // 0 merges 1 and 2; both on top of 3
        let g = graph(&[&[1, 2], &[3], &[3], &[]]);
        let layout = GraphLayoutImpl::build(&g);

        assert_eq!(layout.layout_index(0), 1);
        assert_eq!(layout.layout_index(1), 1);
        assert_eq!(layout.layout_index(3), 1);
        assert_eq!(layout.layout_index(2), 2);
    }

    #[test]
    fn test_two_heads() {
        // Heads 0 and 1 share parent 2
        let g = graph(&[&[2], &[2], &[]]);
        let layout = GraphLayoutImpl::build(&g);

        assert_eq!(layout.head_node_indices(), &[0, 1]);
        assert_eq!(layout.one_of_head_node_index(2), 0);
        assert_eq!(layout.one_of_head_node_index(1), 1);
        assert!(layout.layout_index(1) > layout.layout_index(0));
    }

    #[test]
    fn test_unreachable_nodes_become_heads() {
        let g = graph(&[&[1], &[], &[]]);
        let layout = GraphLayoutImpl::build_with_heads(&g, &[0]);

        assert_eq!(layout.head_node_indices(), &[0, 2]);
        assert_eq!(layout.one_of_head_node_index(2), 2);
        assert!((0..3).all(|i| layout.layout_index(i) > 0));
    }
}
