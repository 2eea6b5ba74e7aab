//! A* 启发式搜索
//!
//! 按 f = g + h 排序的 Dijkstra。启发函数必须可采纳（不高估剩余代价），
//! 引擎不做验证。

use super::frontier::Priority;
use super::result::{ensure_endpoints, trace_back, PathResult};
use crate::error::Result;
use crate::graph::{successors, Graph};
use crate::numeric::Weight;
use crate::types::NodeId;
use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

/// 启发式最短路径
///
/// `heuristic(node, target)` 估计 node 到 target 的剩余代价。
/// 节点的 f 值变小时，队列中的旧条目被新条目替换；已展开的节点
/// 找到更短的 g 值后会重新入队。
#[tracing::instrument(skip(graph, heuristic))]
pub fn astar<G, H>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    heuristic: H,
) -> Result<PathResult<G::Weight>>
where
    G: Graph + ?Sized,
    G::Weight: Weight,
    H: Fn(NodeId, NodeId) -> G::Weight,
{
    ensure_endpoints(graph, source, target)?;

    let mut g_score: HashMap<NodeId, G::Weight> = HashMap::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut expanded = 0usize;
    let mut open: PriorityQueue<NodeId, Reverse<Priority<G::Weight>>> = PriorityQueue::new();

    g_score.insert(source, G::Weight::zero());
    open.push(source, Reverse(Priority::new(heuristic(source, target), source)));

    while let Some((current, _)) = open.pop() {
        if current == target {
            tracing::debug!(expanded, "到达终点");
            let Some(total) = g_score.get(&target).cloned() else {
                break;
            };
            return Ok(match trace_back(&parent, source, target) {
                Some(vertices) => PathResult::found(vertices, total),
                None => PathResult::none(),
            });
        }
        expanded += 1;

        let Some(current_g) = g_score.get(&current).cloned() else {
            continue;
        };

        for neighbor in successors(graph, current) {
            let Some(weight) = graph.edge_weight(current, neighbor) else {
                continue;
            };

            let tentative = current_g.combine(&weight);
            let improved = g_score
                .get(&neighbor)
                .map_or(true, |known| tentative.compare(known) == Ordering::Less);
            if !improved {
                continue;
            }

            let f_score = tentative.combine(&heuristic(neighbor, target));
            g_score.insert(neighbor, tentative);
            parent.insert(neighbor, current);
            open.push(neighbor, Reverse(Priority::new(f_score, neighbor)));
        }
    }

    Ok(PathResult::none())
}
