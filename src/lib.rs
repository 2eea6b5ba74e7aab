//! GraphFlow - 泛型图算法引擎
//!
//! 在任意满足图能力契约的结构上运行经典图算法：
//! - 最短路径：BFS、Dijkstra、A*、Bellman-Ford、Floyd-Warshall
//! - 网络流：增广路最大流（DFS / Edmonds-Karp）与最小割
//! - 数值运算由 `Weight` / `Capacity` trait 在编译期提供
//! - CSV 边表导入

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod import;
pub mod numeric;
pub mod types;

// 重导出常用类型
pub use algorithm::{CancelToken, CutResult, FlowConfig, FlowResult, PathResult, SearchStrategy};
pub use error::{Error, Result};
pub use graph::{DiGraph, DirectedGraph, Graph, UnGraph, UndirectedGraph};
pub use numeric::{Capacity, TokenAmount, Weight};
pub use types::{Edge, NodeId, WeightedEdge};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
