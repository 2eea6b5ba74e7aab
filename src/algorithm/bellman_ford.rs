//! Bellman-Ford 单源最短路径
//!
//! 支持负权边；从源点可达的负权环会使计算失败（`Error::NegativeCycle`），
//! 这与"无路径"是不同的结果。

use super::cancel::{self, CancelToken};
use super::result::{ensure_endpoints, trace_back, PathResult};
use crate::error::{Error, Result};
use crate::graph::{successors, Graph};
use crate::numeric::Weight;
use crate::types::NodeId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 计算 source 到 target 的最短路径
pub fn bellman_ford<G>(graph: &G, source: NodeId, target: NodeId) -> Result<PathResult<G::Weight>>
where
    G: Graph + ?Sized,
    G::Weight: Weight,
{
    bellman_ford_with(graph, source, target, None)
}

/// 同 `bellman_ford`，每轮松弛前检查取消令牌
#[tracing::instrument(skip(graph, cancel))]
pub fn bellman_ford_with<G>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    cancel: Option<&CancelToken>,
) -> Result<PathResult<G::Weight>>
where
    G: Graph + ?Sized,
    G::Weight: Weight,
{
    let infinity = G::Weight::infinity().ok_or(Error::MissingOperation("infinity"))?;
    ensure_endpoints(graph, source, target)?;

    let nodes = graph.nodes();
    let edges = collect_edges(graph, &nodes);
    let is_finite = |d: &G::Weight| d.compare(&infinity) != Ordering::Equal;

    let mut dist: HashMap<NodeId, G::Weight> = nodes
        .iter()
        .map(|&node| (node, infinity.clone()))
        .collect();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    dist.insert(source, G::Weight::zero());

    // 最多 V-1 轮，某轮没有松弛则提前结束
    for pass in 0..nodes.len().saturating_sub(1) {
        cancel::check(cancel)?;

        let mut relaxed = false;
        for (u, v, w) in &edges {
            let Some(du) = dist.get(u).filter(|d| is_finite(*d)).cloned() else {
                continue;
            };
            let candidate = du.combine(w);
            if dist
                .get(v)
                .map_or(true, |dv| candidate.compare(dv) == Ordering::Less)
            {
                dist.insert(*v, candidate);
                parent.insert(*v, *u);
                relaxed = true;
            }
        }

        tracing::trace!(pass, relaxed, "松弛轮次完成");
        if !relaxed {
            break;
        }
    }

    // 再做一轮检查：仍能松弛说明存在负权环
    for (u, v, w) in &edges {
        let (Some(du), Some(dv)) = (dist.get(u), dist.get(v)) else {
            continue;
        };
        if is_finite(du) && du.combine(w).compare(dv) == Ordering::Less {
            tracing::warn!(from = %u, to = %v, "检测到负权环");
            return Err(Error::NegativeCycle);
        }
    }

    match dist.get(&target) {
        Some(total) if is_finite(total) => Ok(match trace_back(&parent, source, target) {
            Some(vertices) => PathResult::found(vertices, total.clone()),
            None => PathResult::none(),
        }),
        _ => Ok(PathResult::none()),
    }
}

/// 收集图中所有可遍历的带权边
fn collect_edges<G>(graph: &G, nodes: &[NodeId]) -> Vec<(NodeId, NodeId, G::Weight)>
where
    G: Graph + ?Sized,
{
    let mut edges = Vec::with_capacity(graph.edge_count());
    for &u in nodes {
        for v in successors(graph, u) {
            if let Some(w) = graph.edge_weight(u, v) {
                edges.push((u, v, w));
            }
        }
    }
    edges
}
