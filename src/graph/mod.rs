//! 图模块
//!
//! 算法依赖的能力契约，以及一个内存邻接表实现

mod adjacency;
mod contract;

pub use adjacency::{DiGraph, UnGraph};
pub use contract::{successors, DirectedGraph, Graph, UndirectedGraph};
