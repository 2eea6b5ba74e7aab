//! Floyd-Warshall 全源最短路径，O(V³)

use crate::error::{Error, Result};
use crate::graph::{successors, Graph};
use crate::numeric::Weight;
use crate::types::NodeId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 计算所有有序顶点对之间的最短距离
///
/// 结果覆盖每一对 (i, j)；不可达的顶点对映射到 `Weight::infinity()`。
/// 任何顶点到自身的距离为负时返回 `Error::NegativeCycle`。
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn floyd_warshall<G>(graph: &G) -> Result<HashMap<(NodeId, NodeId), G::Weight>>
where
    G: Graph + ?Sized,
    G::Weight: Weight,
{
    let infinity = G::Weight::infinity().ok_or(Error::MissingOperation("infinity"))?;
    let is_finite = |d: &G::Weight| d.compare(&infinity) != Ordering::Equal;

    let nodes = graph.nodes();
    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let n = nodes.len();

    let mut dist = vec![vec![infinity.clone(); n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = G::Weight::zero();
    }

    for (i, &u) in nodes.iter().enumerate() {
        for v in successors(graph, u) {
            let (Some(&j), Some(w)) = (index.get(&v), graph.edge_weight(u, v)) else {
                continue;
            };
            if w.compare(&dist[i][j]) == Ordering::Less {
                dist[i][j] = w;
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            if !is_finite(&dist[i][k]) {
                continue;
            }
            for j in 0..n {
                // 跳过任何含无穷的组合，避免溢出
                if !is_finite(&dist[k][j]) {
                    continue;
                }
                let through = dist[i][k].combine(&dist[k][j]);
                if through.compare(&dist[i][j]) == Ordering::Less {
                    dist[i][j] = through;
                }
            }
        }
    }

    if let Some(i) = (0..n).find(|&i| dist[i][i].is_negative()) {
        tracing::warn!(node = %nodes[i], "检测到负权环");
        return Err(Error::NegativeCycle);
    }

    let mut result = HashMap::with_capacity(n * n);
    for (i, &u) in nodes.iter().enumerate() {
        for (j, &v) in nodes.iter().enumerate() {
            result.insert((u, v), dist[i][j].clone());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, UnGraph};

    fn n(id: u64) -> NodeId {
        NodeId::new(id)
    }

    #[test]
    fn test_all_pairs() {
        let mut graph = DiGraph::with_nodes(4);
        graph.add_edge(n(0), n(1), 3).unwrap();
        graph.add_edge(n(1), n(2), -1).unwrap();
        graph.add_edge(n(0), n(2), 5).unwrap();
        graph.add_edge(n(2), n(3), 2).unwrap();

        let dist = floyd_warshall(&graph).unwrap();
        assert_eq!(dist.len(), 16);
        assert_eq!(dist[&(n(0), n(2))], 2);
        assert_eq!(dist[&(n(0), n(3))], 4);
        assert_eq!(dist[&(n(3), n(0))], i32::MAX);
        for i in 0..4 {
            assert_eq!(dist[&(n(i), n(i))], 0);
        }
    }

    #[test]
    fn test_undirected_symmetric() {
        let mut graph = UnGraph::with_nodes(3);
        graph.add_edge(n(0), n(1), 1.5).unwrap();
        graph.add_edge(n(1), n(2), 2.5).unwrap();

        let dist = floyd_warshall(&graph).unwrap();
        assert_eq!(dist[&(n(0), n(2))], 4.0);
        assert_eq!(dist[&(n(2), n(0))], 4.0);
    }

    #[test]
    fn test_negative_cycle() {
        let mut graph = DiGraph::with_nodes(3);
        graph.add_edge(n(0), n(1), 5).unwrap();
        graph.add_edge(n(1), n(2), -10).unwrap();
        graph.add_edge(n(2), n(0), 1).unwrap();

        let err = floyd_warshall(&graph).unwrap_err();
        assert!(err.is_negative_cycle());
    }

    #[test]
    fn test_negative_self_loop() {
        let mut graph = DiGraph::with_nodes(1);
        graph.add_edge(n(0), n(0), -1).unwrap();
        assert!(floyd_warshall(&graph).unwrap_err().is_negative_cycle());
    }

    #[test]
    fn test_negative_zero_self_loop_is_not_a_cycle() {
        let mut graph = DiGraph::with_nodes(2);
        graph.add_edge(n(0), n(0), -0.0f64).unwrap();
        graph.add_edge(n(0), n(1), 1.5).unwrap();

        let dist = floyd_warshall(&graph).unwrap();
        assert_eq!(dist[&(n(0), n(1))], 1.5);
    }

    #[test]
    fn test_empty_graph() {
        let graph: DiGraph<u32> = DiGraph::new();
        assert!(floyd_warshall(&graph).unwrap().is_empty());
    }
}
