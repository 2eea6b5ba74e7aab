//! 算法结果
//!
//! 结果由算法一次性构造后交给调用方，不持有对图的引用。

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::numeric::Weight;
use crate::types::{Edge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult<W> {
    /// 路径上的顶点序列（含起点和终点），无路径时为空
    pub vertices: Vec<NodeId>,
    /// 路径边数
    pub length: usize,
    /// 路径总权重，无路径时为 None
    pub total_weight: Option<W>,
}

impl<W> PathResult<W> {
    /// 无路径
    pub fn none() -> Self {
        Self {
            vertices: Vec::new(),
            length: 0,
            total_weight: None,
        }
    }

    pub(crate) fn found(vertices: Vec<NodeId>, total_weight: W) -> Self {
        Self {
            length: vertices.len().saturating_sub(1),
            vertices,
            total_weight: Some(total_weight),
        }
    }

    pub fn is_found(&self) -> bool {
        self.total_weight.is_some()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.vertices.last().copied()
    }

    /// 路径经过的边
    pub fn edges(&self) -> Vec<Edge> {
        self.vertices
            .windows(2)
            .map(|pair| Edge::new(pair[0], pair[1]))
            .collect()
    }
}

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResult<W> {
    /// 最大流量值
    pub value: W,
    /// 流量分配（边 -> 流量），只包含非零流量的边
    pub flows: HashMap<Edge, W>,
    /// 增广次数
    pub augmentations: usize,
}

impl<W: Weight> FlowResult<W> {
    pub(crate) fn empty() -> Self {
        Self {
            value: W::zero(),
            flows: HashMap::new(),
            augmentations: 0,
        }
    }

    /// 边上的流量
    pub fn flow_on(&self, edge: Edge) -> Option<&W> {
        self.flows.get(&edge)
    }

    /// 流入顶点的总流量
    pub fn inflow(&self, node: NodeId) -> W {
        self.flows
            .iter()
            .filter(|(e, _)| e.dst() == node)
            .fold(W::zero(), |acc, (_, f)| acc.combine(f))
    }

    /// 流出顶点的总流量
    pub fn outflow(&self, node: NodeId) -> W {
        self.flows
            .iter()
            .filter(|(e, _)| e.src() == node)
            .fold(W::zero(), |acc, (_, f)| acc.combine(f))
    }

    /// 按边排序的流量列表
    pub fn sorted_flows(&self) -> Vec<(Edge, W)> {
        let mut flows: Vec<(Edge, W)> = self
            .flows
            .iter()
            .map(|(e, f)| (*e, f.clone()))
            .collect();
        flows.sort_by_key(|(e, _)| *e);
        flows
    }
}

/// 最小割结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutResult<W> {
    /// 割容量
    pub capacity: W,
    /// 割边（源侧 -> 汇侧），按边排序
    pub cut_edges: Vec<Edge>,
    /// 残量图中从源点可达的顶点
    pub source_side: BTreeSet<NodeId>,
    /// 其余顶点
    pub sink_side: BTreeSet<NodeId>,
    /// 同一次计算得到的最大流量
    pub flow_value: W,
}

/// 检查起点和终点都在图中
pub(crate) fn ensure_endpoints<G: Graph + ?Sized>(
    graph: &G,
    source: NodeId,
    target: NodeId,
) -> Result<()> {
    for node in [source, target] {
        if !graph.contains_node(node) {
            tracing::warn!(%node, "顶点不在图中");
            return Err(Error::NodeNotFound(node));
        }
    }
    Ok(())
}

/// 沿前驱表从终点回溯到起点；前驱链断开或成环时返回 None
pub(crate) fn trace_back(
    parent: &HashMap<NodeId, NodeId>,
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let mut vertices = vec![target];
    let mut current = target;

    while current != source {
        current = *parent.get(&current)?;
        vertices.push(current);
        if vertices.len() > parent.len() + 1 {
            return None;
        }
    }

    vertices.reverse();
    Some(vertices)
}
