//! 顶点和边的实体类型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（不透明句柄，同一张图内不会复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 有向边：有序的 (源, 目标) 对，反向边是不同的值
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    src: NodeId,
    dst: NodeId,
}

impl Edge {
    pub fn new(src: NodeId, dst: NodeId) -> Self {
        Self { src, dst }
    }

    /// 源顶点
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// 目标顶点
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    /// 反向边
    pub fn reversed(&self) -> Self {
        Self {
            src: self.dst,
            dst: self.src,
        }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((src, dst): (NodeId, NodeId)) -> Self {
        Self::new(src, dst)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// 带权边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge<W> {
    edge: Edge,
    weight: W,
}

impl<W> WeightedEdge<W> {
    pub fn new(src: NodeId, dst: NodeId, weight: W) -> Self {
        Self {
            edge: Edge::new(src, dst),
            weight,
        }
    }

    pub fn src(&self) -> NodeId {
        self.edge.src()
    }

    pub fn dst(&self) -> NodeId {
        self.edge.dst()
    }

    /// 边的权重 / 容量
    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// 丢弃权重，得到普通边
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn into_parts(self) -> (Edge, W) {
        (self.edge, self.weight)
    }
}

impl<W> From<WeightedEdge<W>> for Edge {
    fn from(e: WeightedEdge<W>) -> Self {
        e.edge
    }
}
