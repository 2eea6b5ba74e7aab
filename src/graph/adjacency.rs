//! 邻接表图存储
//!
//! 按插入顺序保存邻居，保证邻居枚举顺序（以及 BFS 的平局选择）是确定的。

use super::contract::{DirectedGraph, Graph, UndirectedGraph};
use crate::error::{Error, Result};
use crate::types::{NodeId, WeightedEdge};
use indexmap::{IndexMap, IndexSet};

/// 有向图
#[derive(Debug, Clone)]
pub struct DiGraph<W> {
    /// 出边：源 -> (目标 -> 权重)
    outgoing: IndexMap<NodeId, IndexMap<NodeId, W>>,
    /// 入边：目标 -> 源集合
    incoming: IndexMap<NodeId, IndexSet<NodeId>>,
    /// 边数量
    edge_count: usize,
    /// 下一个顶点 ID，用尽后为 None
    next_id: Option<u64>,
}

impl<W> Default for DiGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DiGraph<W> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            outgoing: IndexMap::new(),
            incoming: IndexMap::new(),
            edge_count: 0,
            next_id: Some(0),
        }
    }

    /// 创建包含顶点 0..n 的图
    pub fn with_nodes(n: usize) -> Self {
        let mut g = Self::new();
        for id in 0..n as u64 {
            g.add_node_with_id(NodeId::new(id));
        }
        g
    }

    /// 由带权边构建，缺失的端点自动添加
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = WeightedEdge<W>>,
    {
        let mut g = Self::new();
        for e in edges {
            let (edge, weight) = e.into_parts();
            g.add_node_with_id(edge.src());
            g.add_node_with_id(edge.dst());
            g.insert_edge(edge.src(), edge.dst(), weight);
        }
        g
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，ID 顺序分配且不复用；ID 用尽时返回 `Error::IdExhausted`
    pub fn add_node(&mut self) -> Result<NodeId> {
        let id = NodeId::new(self.next_id.ok_or(Error::IdExhausted)?);
        self.add_node_with_id(id);
        Ok(id)
    }

    /// 以指定 ID 添加顶点（已存在时不变）
    pub fn add_node_with_id(&mut self, id: NodeId) {
        self.outgoing.entry(id).or_default();
        self.incoming.entry(id).or_default();
        if self.next_id.is_some_and(|next| id.as_u64() >= next) {
            self.next_id = id.as_u64().checked_add(1);
        }
    }

    // ==================== 边操作 ====================

    /// 添加边；重复添加会覆盖权重
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, weight: W) -> Result<()> {
        if !self.outgoing.contains_key(&src) {
            return Err(Error::NodeNotFound(src));
        }
        if !self.outgoing.contains_key(&dst) {
            return Err(Error::NodeNotFound(dst));
        }
        self.insert_edge(src, dst, weight);
        Ok(())
    }

    fn insert_edge(&mut self, src: NodeId, dst: NodeId, weight: W) {
        let targets = self.outgoing.entry(src).or_default();
        if targets.insert(dst, weight).is_none() {
            self.edge_count += 1;
        }
        self.incoming.entry(dst).or_default().insert(src);
    }

    /// 删除边，返回原权重
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) -> Option<W> {
        let weight = self.outgoing.get_mut(&src)?.shift_remove(&dst)?;
        if let Some(sources) = self.incoming.get_mut(&dst) {
            sources.shift_remove(&src);
        }
        self.edge_count -= 1;
        Some(weight)
    }

    /// 所有带权边（按插入顺序）
    pub fn edges(&self) -> Vec<WeightedEdge<W>>
    where
        W: Clone,
    {
        self.outgoing
            .iter()
            .flat_map(|(&src, targets)| {
                targets
                    .iter()
                    .map(move |(&dst, w)| WeightedEdge::new(src, dst, w.clone()))
            })
            .collect()
    }
}

impl<W: Clone> Graph for DiGraph<W> {
    type Weight = W;

    fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.outgoing.keys().copied().collect()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.outgoing.contains_key(&node)
    }

    fn degree(&self, node: NodeId) -> usize {
        self.out_degree(node) + self.in_degree(node)
    }

    fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.outgoing
            .get(&src)
            .map(|targets| targets.contains_key(&dst))
            .unwrap_or(false)
    }

    fn edge_weight(&self, src: NodeId, dst: NodeId) -> Option<W> {
        self.outgoing.get(&src)?.get(&dst).cloned()
    }

    fn as_directed(&self) -> Option<&dyn DirectedGraph<Weight = W>> {
        Some(self)
    }
}

impl<W: Clone> DirectedGraph for DiGraph<W> {
    fn out_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.outgoing
            .get(&node)
            .map(|targets| targets.keys().copied().collect())
            .unwrap_or_default()
    }

    fn in_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.incoming
            .get(&node)
            .map(|sources| sources.iter().copied().collect())
            .unwrap_or_default()
    }

    fn out_degree(&self, node: NodeId) -> usize {
        self.outgoing.get(&node).map_or(0, |t| t.len())
    }

    fn in_degree(&self, node: NodeId) -> usize {
        self.incoming.get(&node).map_or(0, |s| s.len())
    }
}

/// 无向图，每条边在两个端点的邻接表中各保存一次
#[derive(Debug, Clone)]
pub struct UnGraph<W> {
    adjacency: IndexMap<NodeId, IndexMap<NodeId, W>>,
    edge_count: usize,
    next_id: Option<u64>,
}

impl<W: Clone> Default for UnGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Clone> UnGraph<W> {
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
            edge_count: 0,
            next_id: Some(0),
        }
    }

    pub fn with_nodes(n: usize) -> Self {
        let mut g = Self::new();
        for id in 0..n as u64 {
            g.add_node_with_id(NodeId::new(id));
        }
        g
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = WeightedEdge<W>>,
    {
        let mut g = Self::new();
        for e in edges {
            let (edge, weight) = e.into_parts();
            g.add_node_with_id(edge.src());
            g.add_node_with_id(edge.dst());
            g.insert_edge(edge.src(), edge.dst(), weight);
        }
        g
    }

    pub fn add_node(&mut self) -> Result<NodeId> {
        let id = NodeId::new(self.next_id.ok_or(Error::IdExhausted)?);
        self.add_node_with_id(id);
        Ok(id)
    }

    pub fn add_node_with_id(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
        if self.next_id.is_some_and(|next| id.as_u64() >= next) {
            self.next_id = id.as_u64().checked_add(1);
        }
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: W) -> Result<()> {
        if !self.adjacency.contains_key(&a) {
            return Err(Error::NodeNotFound(a));
        }
        if !self.adjacency.contains_key(&b) {
            return Err(Error::NodeNotFound(b));
        }
        self.insert_edge(a, b, weight);
        Ok(())
    }

    fn insert_edge(&mut self, a: NodeId, b: NodeId, weight: W) {
        let fresh = self
            .adjacency
            .entry(a)
            .or_default()
            .insert(b, weight.clone())
            .is_none();
        self.adjacency.entry(b).or_default().insert(a, weight);
        if fresh {
            self.edge_count += 1;
        }
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Option<W> {
        let weight = self.adjacency.get_mut(&a)?.shift_remove(&b)?;
        if let Some(adj) = self.adjacency.get_mut(&b) {
            adj.shift_remove(&a);
        }
        self.edge_count -= 1;
        Some(weight)
    }

    /// 所有边，每条无向边只出现一次（源 ID 不大于目标 ID）
    pub fn edges(&self) -> Vec<WeightedEdge<W>> {
        self.adjacency
            .iter()
            .flat_map(|(&a, adj)| {
                adj.iter()
                    .filter(move |(b, _)| a <= **b)
                    .map(move |(&b, w)| WeightedEdge::new(a, b, w.clone()))
            })
            .collect()
    }
}

impl<W: Clone> Graph for UnGraph<W> {
    type Weight = W;

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, |adj| adj.len())
    }

    fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.adjacency
            .get(&src)
            .map(|adj| adj.contains_key(&dst))
            .unwrap_or(false)
    }

    fn edge_weight(&self, src: NodeId, dst: NodeId) -> Option<W> {
        self.adjacency.get(&src)?.get(&dst).cloned()
    }

    fn as_undirected(&self) -> Option<&dyn UndirectedGraph<Weight = W>> {
        Some(self)
    }
}

impl<W: Clone> UndirectedGraph for UnGraph<W> {
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(&node)
            .map(|adj| adj.keys().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digraph_basic() {
        let mut graph = DiGraph::with_nodes(3);
        let (v0, v1, v2) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));

        graph.add_edge(v0, v1, 4).unwrap();
        graph.add_edge(v0, v2, 1).unwrap();
        graph.add_edge(v1, v2, 2).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.out_neighbors(v0), vec![v1, v2]);
        assert_eq!(graph.in_neighbors(v2), vec![v0, v1]);
        assert_eq!(graph.out_degree(v0), 2);
        assert_eq!(graph.in_degree(v2), 2);
        assert_eq!(graph.degree(v1), 2);
        assert_eq!(graph.edge_weight(v0, v1), Some(4));
        assert!(!graph.has_edge(v1, v0));
    }

    #[test]
    fn test_digraph_overwrite_and_remove() {
        let mut graph = DiGraph::with_nodes(2);
        let (a, b) = (NodeId::new(0), NodeId::new(1));

        graph.add_edge(a, b, 1.0).unwrap();
        graph.add_edge(a, b, 2.5).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(a, b), Some(2.5));

        assert_eq!(graph.remove_edge(a, b), Some(2.5));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.in_neighbors(b).is_empty());
        assert_eq!(graph.remove_edge(a, b), None);
    }

    #[test]
    fn test_add_edge_missing_node() {
        let mut graph: DiGraph<i32> = DiGraph::with_nodes(1);
        let err = graph
            .add_edge(NodeId::new(0), NodeId::new(7), 1)
            .unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(id) if id == NodeId::new(7)));
    }

    #[test]
    fn test_node_ids_not_recycled() {
        let mut graph: DiGraph<i32> = DiGraph::new();
        graph.add_node_with_id(NodeId::new(10));
        assert_eq!(graph.add_node().unwrap(), NodeId::new(11));
    }

    #[test]
    fn test_node_ids_exhausted() {
        let mut graph: DiGraph<i32> = DiGraph::new();
        graph.add_node_with_id(NodeId::new(u64::MAX));
        assert!(matches!(graph.add_node(), Err(Error::IdExhausted)));
        assert_eq!(graph.node_count(), 1);

        // 较小的 ID 仍可显式添加
        graph.add_node_with_id(NodeId::new(3));
        assert!(matches!(graph.add_node(), Err(Error::IdExhausted)));

        let mut graph: UnGraph<i32> = UnGraph::new();
        graph.add_node_with_id(NodeId::new(u64::MAX));
        assert!(matches!(graph.add_node(), Err(Error::IdExhausted)));
    }

    #[test]
    fn test_from_edges() {
        let graph = DiGraph::from_edges(vec![
            WeightedEdge::new(NodeId::new(0), NodeId::new(1), 3),
            WeightedEdge::new(NodeId::new(1), NodeId::new(2), 5),
        ]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.as_directed().is_some());
        assert!(graph.as_undirected().is_none());
    }

    #[test]
    fn test_ungraph_symmetric() {
        let mut graph = UnGraph::with_nodes(3);
        let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));

        graph.add_edge(a, b, 2).unwrap();
        graph.add_edge(b, c, 3).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(b, a));
        assert_eq!(graph.edge_weight(c, b), Some(3));
        assert_eq!(graph.neighbors(b), vec![a, c]);
        assert_eq!(graph.edges().len(), 2);

        graph.remove_edge(b, a);
        assert!(!graph.has_edge(a, b));
        assert_eq!(graph.edge_count(), 1);
    }
}
