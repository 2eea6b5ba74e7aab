//! 图算法模块
//!
//! 包含最短路径（BFS、Dijkstra、A*、Bellman-Ford、Floyd-Warshall）
//! 以及最大流与最小割算法

mod astar;
mod bellman_ford;
mod bfs;
mod cancel;
mod dijkstra;
mod floyd_warshall;
mod frontier;
mod max_flow;
mod min_cut;
mod result;

pub use astar::astar;
pub use bellman_ford::{bellman_ford, bellman_ford_with};
pub use bfs::bfs;
pub use cancel::CancelToken;
pub use dijkstra::dijkstra;
pub use floyd_warshall::floyd_warshall;
pub use max_flow::{
    edmonds_karp, ford_fulkerson, max_flow, max_flow_with, FlowConfig, SearchStrategy,
};
pub use min_cut::{min_cut, min_cut_with};
pub use result::{CutResult, FlowResult, PathResult};
