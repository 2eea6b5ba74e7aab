//! 图能力契约
//!
//! 算法只通过这些只读接口访问图，从不修改图。

use crate::types::NodeId;

/// 基础能力：计数、顶点枚举、边存在性和边权查询
///
/// 实现了 `DirectedGraph` 或 `UndirectedGraph` 的类型应当覆盖对应的
/// `as_directed` / `as_undirected`，否则算法只能退化为逐点检查边。
pub trait Graph {
    type Weight;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// 所有顶点（顺序即枚举顺序）
    fn nodes(&self) -> Vec<NodeId>;

    fn contains_node(&self, node: NodeId) -> bool;

    fn degree(&self, node: NodeId) -> usize;

    fn has_edge(&self, src: NodeId, dst: NodeId) -> bool;

    fn edge_weight(&self, src: NodeId, dst: NodeId) -> Option<Self::Weight>;

    /// 有向能力查询
    fn as_directed(&self) -> Option<&dyn DirectedGraph<Weight = Self::Weight>> {
        None
    }

    /// 无向能力查询
    fn as_undirected(&self) -> Option<&dyn UndirectedGraph<Weight = Self::Weight>> {
        None
    }
}

/// 有向图：出边 / 入边邻居
pub trait DirectedGraph: Graph {
    fn out_neighbors(&self, node: NodeId) -> Vec<NodeId>;

    fn in_neighbors(&self, node: NodeId) -> Vec<NodeId>;

    fn out_degree(&self, node: NodeId) -> usize {
        self.out_neighbors(node).len()
    }

    fn in_degree(&self, node: NodeId) -> usize {
        self.in_neighbors(node).len()
    }
}

/// 无向图：邻居
pub trait UndirectedGraph: Graph {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;
}

/// 顶点的后继：优先使用有向出边，其次无向邻居，
/// 都不支持时逐个顶点检查 `has_edge`（每次 O(V)）。
pub fn successors<G: Graph + ?Sized>(graph: &G, node: NodeId) -> Vec<NodeId> {
    if let Some(directed) = graph.as_directed() {
        return directed.out_neighbors(node);
    }
    if let Some(undirected) = graph.as_undirected() {
        return undirected.neighbors(node);
    }
    graph
        .nodes()
        .into_iter()
        .filter(|&candidate| graph.has_edge(node, candidate))
        .collect()
}
