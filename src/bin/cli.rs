//! GraphFlow CLI 工具
//!
//! 从 CSV 边表加载图，运行单个算法并以 JSON 输出结果

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use graphflow::algorithm::{
    bellman_ford, bfs, dijkstra, floyd_warshall, max_flow, min_cut, SearchStrategy,
};
use graphflow::graph::{DiGraph, Graph};
use graphflow::import::{load_edge_list, LoadedGraph};
use graphflow::types::NodeId;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "graphflow-cli")]
#[command(about = "GraphFlow 图算法命令行工具")]
struct Args {
    /// 边表 CSV（表头 src,dst,weight）
    #[arg(short, long)]
    input: PathBuf,

    /// 按无向图加载
    #[arg(short, long)]
    undirected: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 最少跳数路径
    Bfs { src: u64, dst: u64 },
    /// 非负权最短路径
    Dijkstra { src: u64, dst: u64 },
    /// 允许负权的最短路径
    BellmanFord { src: u64, dst: u64 },
    /// 全源最短距离
    AllPairs,
    /// 最大流
    MaxFlow {
        src: u64,
        sink: u64,
        /// 使用深度优先搜索增广路
        #[arg(long)]
        dfs: bool,
    },
    /// 最小割
    MinCut { src: u64, sink: u64 },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "graphflow=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let imported = load_edge_list(&args.input, !args.undirected)
        .with_context(|| format!("无法加载边表 {:?}", args.input))?;
    tracing::info!(
        vertices = imported.stats.vertices_imported,
        edges = imported.stats.edges_imported,
        errors = imported.stats.errors,
        duration_ms = imported.stats.duration_ms,
        "边表已加载"
    );

    let output = match &imported.graph {
        LoadedGraph::Directed(graph) => run(graph, &args.command)?,
        LoadedGraph::Undirected(graph) => run_paths(graph, &args.command)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// 最短路径类命令在两种图上都可以运行
fn run_paths<G>(graph: &G, command: &Command) -> anyhow::Result<serde_json::Value>
where
    G: Graph<Weight = f64>,
{
    let value = match *command {
        Command::Bfs { src, dst } => serde_json::to_value(bfs(graph, src.into(), dst.into())?)?,
        Command::Dijkstra { src, dst } => {
            serde_json::to_value(dijkstra(graph, src.into(), dst.into())?)?
        }
        Command::BellmanFord { src, dst } => {
            serde_json::to_value(bellman_ford(graph, src.into(), dst.into())?)?
        }
        Command::AllPairs => {
            let mut rows: Vec<(NodeId, NodeId, f64)> = floyd_warshall(graph)?
                .into_iter()
                .map(|((u, v), d)| (u, v, d))
                .collect();
            rows.sort_by_key(|&(u, v, _)| (u, v));
            let rows: Vec<_> = rows
                .into_iter()
                .map(|(u, v, d)| {
                    json!({
                        "src": u,
                        "dst": v,
                        "distance": d.is_finite().then_some(d),
                    })
                })
                .collect();
            json!(rows)
        }
        Command::MaxFlow { .. } | Command::MinCut { .. } => {
            bail!("网络流算法需要有向图，请去掉 --undirected")
        }
    };
    Ok(value)
}

fn run(graph: &DiGraph<f64>, command: &Command) -> anyhow::Result<serde_json::Value> {
    match *command {
        Command::MaxFlow { src, sink, dfs } => {
            let strategy = if dfs {
                SearchStrategy::DepthFirst
            } else {
                SearchStrategy::BreadthFirst
            };
            let flow = max_flow(graph, src.into(), sink.into(), strategy)?;
            let flows: Vec<_> = flow
                .sorted_flows()
                .into_iter()
                .map(|(edge, f)| json!({ "src": edge.src(), "dst": edge.dst(), "flow": f }))
                .collect();
            Ok(json!({
                "value": flow.value,
                "augmentations": flow.augmentations,
                "flows": flows,
            }))
        }
        Command::MinCut { src, sink } => {
            Ok(serde_json::to_value(min_cut(graph, src.into(), sink.into())?)?)
        }
        _ => run_paths(graph, command),
    }
}
