//! Dijkstra 单源最短路径
//!
//! 前提：所有边权非负（不做检查）。复杂度 O((V+E) log V)。

use super::frontier::Priority;
use super::result::{ensure_endpoints, trace_back, PathResult};
use crate::error::Result;
use crate::graph::{successors, Graph};
use crate::numeric::Weight;
use crate::types::NodeId;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// 计算 source 到 target 的最短路径，弹出终点时立即结束
#[tracing::instrument(skip(graph))]
pub fn dijkstra<G>(graph: &G, source: NodeId, target: NodeId) -> Result<PathResult<G::Weight>>
where
    G: Graph + ?Sized,
    G::Weight: Weight,
{
    ensure_endpoints(graph, source, target)?;

    let mut dist: HashMap<NodeId, G::Weight> = HashMap::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut finalized: HashSet<NodeId> = HashSet::new();
    let mut frontier: BinaryHeap<Reverse<Priority<G::Weight>>> = BinaryHeap::new();

    dist.insert(source, G::Weight::zero());
    frontier.push(Reverse(Priority::new(G::Weight::zero(), source)));

    while let Some(Reverse(entry)) = frontier.pop() {
        let (distance, current) = entry.into_parts();
        if !finalized.insert(current) {
            continue;
        }

        if current == target {
            tracing::debug!(settled = finalized.len(), "到达终点");
            return Ok(match trace_back(&parent, source, target) {
                Some(vertices) => PathResult::found(vertices, distance),
                None => PathResult::none(),
            });
        }

        for neighbor in successors(graph, current) {
            if finalized.contains(&neighbor) {
                continue;
            }
            let Some(weight) = graph.edge_weight(current, neighbor) else {
                continue;
            };

            let candidate = distance.combine(&weight);
            let improved = dist
                .get(&neighbor)
                .map_or(true, |known| candidate.compare(known) == Ordering::Less);

            if improved {
                dist.insert(neighbor, candidate.clone());
                parent.insert(neighbor, current);
                frontier.push(Reverse(Priority::new(candidate, neighbor)));
            }
        }
    }

    Ok(PathResult::none())
}
