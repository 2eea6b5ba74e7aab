//! 最小割
//!
//! 先用 Edmonds-Karp 算出最大流，再在最终残量图中找源点可达集合。
//! 割边为从可达侧指向不可达侧的原图边，割容量恒等于最大流量。

use super::max_flow::{solve, FlowConfig, SearchStrategy};
use super::result::CutResult;
use crate::error::Result;
use crate::graph::DirectedGraph;
use crate::numeric::{Capacity, Weight};
use crate::types::{Edge, NodeId};
use std::collections::BTreeSet;

/// 计算 source 与 sink 之间的最小割
pub fn min_cut<G>(graph: &G, source: NodeId, sink: NodeId) -> Result<CutResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    min_cut_with(graph, source, sink, &FlowConfig::new())
}

/// 按配置计算最小割；配置中的搜索策略被忽略，总是使用广度优先
#[tracing::instrument(skip(graph, config))]
pub fn min_cut_with<G>(
    graph: &G,
    source: NodeId,
    sink: NodeId,
    config: &FlowConfig,
) -> Result<CutResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    let config = config.clone().with_strategy(SearchStrategy::BreadthFirst);
    let (flow, residual) = solve(graph, source, sink, &config)?;

    // 源汇相同时没有需要割开的边
    let reachable = if source == sink {
        graph.nodes().into_iter().collect()
    } else {
        residual.reachable_from(source)
    };

    let mut cut_edges: Vec<Edge> = reachable
        .iter()
        .flat_map(|&u| {
            graph
                .out_neighbors(u)
                .into_iter()
                .filter(|v| !reachable.contains(v))
                .map(move |v| Edge::new(u, v))
        })
        .collect();
    cut_edges.sort();

    // 按排序后的割边累加，浮点容量的结果与集合遍历顺序无关
    let capacity = cut_edges
        .iter()
        .filter_map(|e| graph.edge_weight(e.src(), e.dst()))
        .fold(G::Weight::zero(), |acc, w| acc.combine(&w));

    let source_side: BTreeSet<NodeId> = reachable.iter().copied().collect();
    let sink_side: BTreeSet<NodeId> = graph
        .nodes()
        .into_iter()
        .filter(|v| !reachable.contains(v))
        .collect();

    tracing::debug!(
        cut_edges = cut_edges.len(),
        capacity = ?capacity,
        flow = ?flow.value,
        "最小割计算完成"
    );

    Ok(CutResult {
        capacity,
        cut_edges,
        source_side,
        sink_side,
        flow_value: flow.value,
    })
}
