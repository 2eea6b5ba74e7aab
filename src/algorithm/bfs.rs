//! 无权最短路径（BFS）

use super::result::{ensure_endpoints, trace_back, PathResult};
use crate::error::Result;
use crate::graph::{successors, Graph};
use crate::types::NodeId;
use std::collections::{HashMap, HashSet, VecDeque};

/// BFS 最短路径查找
///
/// 返回边数最少的路径，总权重为边数。第一次发现终点时立即返回；
/// 多条最短路径之间的选择取决于邻居枚举顺序。
///
/// 图只提供基础能力时，每次扩展都要对全部顶点检查 `has_edge`，整体 O(V²)。
#[tracing::instrument(skip(graph))]
pub fn bfs<G>(graph: &G, source: NodeId, target: NodeId) -> Result<PathResult<usize>>
where
    G: Graph + ?Sized,
{
    ensure_endpoints(graph, source, target)?;

    if source == target {
        return Ok(PathResult::found(vec![source], 0));
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();

    visited.insert(source);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for neighbor in successors(graph, current) {
            if !visited.insert(neighbor) {
                continue;
            }
            parent.insert(neighbor, current);

            if neighbor == target {
                // 重构路径
                return Ok(match trace_back(&parent, source, target) {
                    Some(vertices) => {
                        let hops = vertices.len() - 1;
                        tracing::debug!(hops, "找到最短路径");
                        PathResult::found(vertices, hops)
                    }
                    None => PathResult::none(),
                });
            }
            queue.push_back(neighbor);
        }
    }

    Ok(PathResult::none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::{DiGraph, UnGraph};

    /// 只暴露基础能力的图，用来走逐点检查的退化路径
    struct EdgeListGraph {
        inner: DiGraph<u32>,
    }

    impl Graph for EdgeListGraph {
        type Weight = u32;

        fn node_count(&self) -> usize {
            self.inner.node_count()
        }

        fn edge_count(&self) -> usize {
            self.inner.edge_count()
        }

        fn nodes(&self) -> Vec<NodeId> {
            self.inner.nodes()
        }

        fn contains_node(&self, node: NodeId) -> bool {
            self.inner.contains_node(node)
        }

        fn degree(&self, node: NodeId) -> usize {
            self.inner.degree(node)
        }

        fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
            self.inner.has_edge(src, dst)
        }

        fn edge_weight(&self, src: NodeId, dst: NodeId) -> Option<u32> {
            self.inner.edge_weight(src, dst)
        }
    }

    fn create_test_graph() -> DiGraph<u32> {
        // 创建顶点: 1 -> 2 -> 3 -> 4
        //              \-> 5 -> 4
        let mut graph = DiGraph::new();
        for id in 1..=5 {
            graph.add_node_with_id(NodeId::new(id));
        }
        for (a, b) in [(1, 2), (2, 3), (3, 4), (1, 5), (5, 4)] {
            graph.add_edge(NodeId::new(a), NodeId::new(b), 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_shortest_path() {
        let graph = create_test_graph();

        let path = bfs(&graph, NodeId::new(1), NodeId::new(4)).unwrap();
        assert_eq!(path.length, 2);
        assert_eq!(
            path.vertices,
            vec![NodeId::new(1), NodeId::new(5), NodeId::new(4)]
        );
        assert_eq!(path.total_weight, Some(2));
    }

    #[test]
    fn test_same_source_and_target() {
        let graph = create_test_graph();
        let path = bfs(&graph, NodeId::new(3), NodeId::new(3)).unwrap();
        assert_eq!(path.vertices, vec![NodeId::new(3)]);
        assert_eq!(path.total_weight, Some(0));
    }

    #[test]
    fn test_unreachable() {
        let graph = create_test_graph();
        let path = bfs(&graph, NodeId::new(4), NodeId::new(1)).unwrap();
        assert!(!path.is_found());
    }

    #[test]
    fn test_missing_node() {
        let graph = create_test_graph();
        let err = bfs(&graph, NodeId::new(1), NodeId::new(42)).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(id) if id == NodeId::new(42)));
    }

    #[test]
    fn test_base_capability_fallback() {
        let graph = EdgeListGraph {
            inner: create_test_graph(),
        };
        assert!(graph.as_directed().is_none());

        let path = bfs(&graph, NodeId::new(1), NodeId::new(4)).unwrap();
        assert_eq!(path.length, 2);
        assert_eq!(path.source(), Some(NodeId::new(1)));
        assert_eq!(path.target(), Some(NodeId::new(4)));
    }

    #[test]
    fn test_undirected() {
        let mut graph = UnGraph::with_nodes(4);
        graph.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        graph.add_edge(NodeId::new(1), NodeId::new(2), 1).unwrap();
        graph.add_edge(NodeId::new(3), NodeId::new(2), 1).unwrap();

        let path = bfs(&graph, NodeId::new(3), NodeId::new(0)).unwrap();
        assert_eq!(path.length, 3);
    }
}
