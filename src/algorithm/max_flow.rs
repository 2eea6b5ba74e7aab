//! 最大流算法
//!
//! 增广路径框架（Ford-Fulkerson），两种路径搜索策略：
//! - 深度优先：迭代次数没有多项式上界（依赖容量大小）
//! - 广度优先（Edmonds-Karp）：O(V·E²)，每次找边数最少的增广路径
//!
//! 残量图是隐式的：正向残量 = 容量 - 已用流量，反向残量 = 原边上的已用流量。

use super::cancel::{self, CancelToken};
use super::result::{ensure_endpoints, FlowResult};
use crate::error::{Error, Result};
use crate::graph::DirectedGraph;
use crate::numeric::{Capacity, Weight};
use crate::types::{Edge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// 增广路径搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// 深度优先（显式栈）
    DepthFirst,
    /// 广度优先（Edmonds-Karp）
    #[default]
    BreadthFirst,
}

/// 最大流计算配置
#[derive(Debug, Clone, Default)]
pub struct FlowConfig {
    /// 路径搜索策略
    pub strategy: SearchStrategy,
    /// 取消令牌
    pub cancel: Option<CancelToken>,
    /// 增广次数上限，超过后返回 `Error::Cancelled`
    pub max_augmentations: Option<usize>,
}

impl FlowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = Some(limit);
        self
    }
}

/// 残量图中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// 沿原边 (from, to) 正向推流
    Forward(NodeId),
    /// 抵消原边 (to, from) 上的流量
    Backward(NodeId),
}

impl Step {
    fn origin(&self) -> NodeId {
        match *self {
            Step::Forward(u) | Step::Backward(u) => u,
        }
    }
}

/// 一次计算内的流量状态
pub(crate) struct Residual<'g, G: DirectedGraph + ?Sized> {
    graph: &'g G,
    flow: HashMap<Edge, G::Weight>,
}

impl<'g, G> Residual<'g, G>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    fn new(graph: &'g G) -> Self {
        Self {
            graph,
            flow: HashMap::new(),
        }
    }

    fn flow_on(&self, edge: &Edge) -> G::Weight {
        self.flow
            .get(edge)
            .cloned()
            .unwrap_or_else(G::Weight::zero)
    }

    /// 正向残量：容量 - 已用流量
    fn forward_residual(&self, u: NodeId, v: NodeId) -> Option<G::Weight> {
        let capacity = self.graph.edge_weight(u, v)?;
        Some(capacity.subtract(&self.flow_on(&Edge::new(u, v))))
    }

    /// 反向残量：原边 (v, u) 上的已用流量
    fn backward_residual(&self, u: NodeId, v: NodeId) -> Option<G::Weight> {
        if !self.graph.has_edge(v, u) {
            return None;
        }
        Some(self.flow_on(&Edge::new(v, u)))
    }

    fn step_residual(&self, to: NodeId, step: Step) -> Option<G::Weight> {
        match step {
            Step::Forward(from) => self.forward_residual(from, to),
            Step::Backward(from) => self.backward_residual(from, to),
        }
    }

    /// 从 u 出发、残量为正的所有步，正向边在前
    fn residual_steps(&self, u: NodeId) -> Vec<(NodeId, Step)> {
        let forward = self
            .graph
            .out_neighbors(u)
            .into_iter()
            .filter(|&v| self.forward_residual(u, v).is_some_and(|r| r.is_positive()))
            .map(|v| (v, Step::Forward(u)));
        let backward = self
            .graph
            .in_neighbors(u)
            .into_iter()
            .filter(|&v| self.backward_residual(u, v).is_some_and(|r| r.is_positive()))
            .map(|v| (v, Step::Backward(u)));
        forward.chain(backward).collect()
    }

    /// BFS 找增广路径
    fn breadth_first(
        &self,
        source: NodeId,
        sink: NodeId,
        cancel: Option<&CancelToken>,
    ) -> Result<Option<HashMap<NodeId, Step>>> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut parent: HashMap<NodeId, Step> = HashMap::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            cancel::check(cancel)?;
            for (v, step) in self.residual_steps(u) {
                if !visited.insert(v) {
                    continue;
                }
                parent.insert(v, step);
                if v == sink {
                    return Ok(Some(parent));
                }
                queue.push_back(v);
            }
        }

        Ok(None)
    }

    /// DFS 找增广路径（显式栈，不递归）
    fn depth_first(
        &self,
        source: NodeId,
        sink: NodeId,
        cancel: Option<&CancelToken>,
    ) -> Result<Option<HashMap<NodeId, Step>>> {
        let mut visited = HashSet::new();
        let mut parent: HashMap<NodeId, Step> = HashMap::new();
        let mut stack: Vec<(NodeId, Option<Step>)> = vec![(source, None)];

        while let Some((u, via)) = stack.pop() {
            if !visited.insert(u) {
                continue;
            }
            if let Some(step) = via {
                parent.insert(u, step);
            }
            if u == sink {
                return Ok(Some(parent));
            }
            cancel::check(cancel)?;

            // 逆序压栈，使第一个邻居最先展开
            for (v, step) in self.residual_steps(u).into_iter().rev() {
                if !visited.contains(&v) {
                    stack.push((v, Some(step)));
                }
            }
        }

        Ok(None)
    }

    /// 沿路径增广瓶颈流量，返回瓶颈值
    fn augment(&mut self, path: &[(NodeId, Step)]) -> Option<G::Weight> {
        let bottleneck = path
            .iter()
            .map(|&(to, step)| self.step_residual(to, step))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .reduce(|a, b| a.min_of(b))?;

        for &(to, step) in path {
            match step {
                Step::Forward(from) => {
                    let edge = Edge::new(from, to);
                    let updated = self.flow_on(&edge).combine(&bottleneck);
                    self.flow.insert(edge, updated);
                }
                Step::Backward(from) => {
                    let edge = Edge::new(to, from);
                    let updated = self.flow_on(&edge).subtract(&bottleneck);
                    self.flow.insert(edge, updated);
                }
            }
        }

        Some(bottleneck)
    }

    /// 残量图中从 source 可达的顶点
    pub(crate) fn reachable_from(&self, source: NodeId) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for (v, _) in self.residual_steps(u) {
                if visited.insert(v) {
                    queue.push_back(v);
                }
            }
        }

        visited
    }

    /// 只保留非零流量
    fn nonzero_flows(&self) -> HashMap<Edge, G::Weight> {
        self.flow
            .iter()
            .filter(|(_, f)| !f.is_zero())
            .map(|(e, f)| (*e, f.clone()))
            .collect()
    }
}

/// 沿前驱表从汇点回到源点，得到 (到达顶点, 步) 序列
fn collect_path(parent: &HashMap<NodeId, Step>, source: NodeId, sink: NodeId) -> Vec<(NodeId, Step)> {
    let mut path = Vec::new();
    let mut current = sink;
    while current != source {
        let Some(&step) = parent.get(&current) else {
            break;
        };
        path.push((current, step));
        current = step.origin();
    }
    path.reverse();
    path
}

/// 计算最大流，同时返回最终残量状态（最小割需要）
pub(crate) fn solve<'g, G>(
    graph: &'g G,
    source: NodeId,
    sink: NodeId,
    config: &FlowConfig,
) -> Result<(FlowResult<G::Weight>, Residual<'g, G>)>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    ensure_endpoints(graph, source, sink)?;

    let mut residual = Residual::new(graph);
    if source == sink {
        return Ok((FlowResult::empty(), residual));
    }

    let cancel = config.cancel.as_ref();
    let mut total = G::Weight::zero();
    let mut augmentations = 0usize;

    loop {
        cancel::check(cancel)?;

        let parent = match config.strategy {
            SearchStrategy::BreadthFirst => residual.breadth_first(source, sink, cancel)?,
            SearchStrategy::DepthFirst => residual.depth_first(source, sink, cancel)?,
        };
        let Some(parent) = parent else {
            break;
        };

        if config
            .max_augmentations
            .is_some_and(|limit| augmentations >= limit)
        {
            tracing::warn!(augmentations, "增广次数达到上限");
            return Err(Error::Cancelled);
        }

        let path = collect_path(&parent, source, sink);
        let Some(bottleneck) = residual.augment(&path) else {
            break;
        };
        tracing::trace!(hops = path.len(), bottleneck = ?bottleneck, "增广");

        total = total.combine(&bottleneck);
        augmentations += 1;
    }

    tracing::debug!(augmentations, value = ?total, "最大流计算完成");

    let flows = residual.nonzero_flows();
    Ok((
        FlowResult {
            value: total,
            flows,
            augmentations,
        },
        residual,
    ))
}

/// 计算从 source 到 sink 的最大流
#[tracing::instrument(skip(graph))]
pub fn max_flow<G>(
    graph: &G,
    source: NodeId,
    sink: NodeId,
    strategy: SearchStrategy,
) -> Result<FlowResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    max_flow_with(graph, source, sink, &FlowConfig::new().with_strategy(strategy))
}

/// 按配置计算最大流
pub fn max_flow_with<G>(
    graph: &G,
    source: NodeId,
    sink: NodeId,
    config: &FlowConfig,
) -> Result<FlowResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    solve(graph, source, sink, config).map(|(result, _)| result)
}

/// 深度优先增广（Ford-Fulkerson）
pub fn ford_fulkerson<G>(graph: &G, source: NodeId, sink: NodeId) -> Result<FlowResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    max_flow(graph, source, sink, SearchStrategy::DepthFirst)
}

/// 广度优先增广（Edmonds-Karp）
pub fn edmonds_karp<G>(graph: &G, source: NodeId, sink: NodeId) -> Result<FlowResult<G::Weight>>
where
    G: DirectedGraph + ?Sized,
    G::Weight: Capacity,
{
    max_flow(graph, source, sink, SearchStrategy::BreadthFirst)
}
