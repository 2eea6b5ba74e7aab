//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 边表构建带 `f64` 权重的图

use crate::error::{Error, Result};
use crate::graph::{DiGraph, Graph, UnGraph};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 边记录（CSV 表头 `src,dst,weight`，JSON 字段同名）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeRecord {
    src: u64,
    dst: u64,
    weight: f64,
}

/// 导入得到的图
#[derive(Debug, Clone)]
pub enum LoadedGraph {
    Directed(DiGraph<f64>),
    Undirected(UnGraph<f64>),
}

impl LoadedGraph {
    fn new(directed: bool) -> Self {
        if directed {
            LoadedGraph::Directed(DiGraph::new())
        } else {
            LoadedGraph::Undirected(UnGraph::new())
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, LoadedGraph::Directed(_))
    }

    pub fn node_count(&self) -> usize {
        match self {
            LoadedGraph::Directed(g) => g.node_count(),
            LoadedGraph::Undirected(g) => g.node_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            LoadedGraph::Directed(g) => g.edge_count(),
            LoadedGraph::Undirected(g) => g.edge_count(),
        }
    }

    fn contains_node(&self, node: NodeId) -> bool {
        match self {
            LoadedGraph::Directed(g) => g.contains_node(node),
            LoadedGraph::Undirected(g) => g.contains_node(node),
        }
    }

    /// 插入一条记录，返回新增的顶点数
    fn insert(&mut self, record: &EdgeRecord) -> Result<usize> {
        if record.weight.is_nan() {
            return Err(Error::ImportError(format!(
                "边 {} -> {} 的权重不是数值",
                record.src, record.dst
            )));
        }

        let src = NodeId::new(record.src);
        let dst = NodeId::new(record.dst);
        let mut added = usize::from(!self.contains_node(src));
        if src != dst && !self.contains_node(dst) {
            added += 1;
        }

        match self {
            LoadedGraph::Directed(g) => {
                g.add_node_with_id(src);
                g.add_node_with_id(dst);
                g.add_edge(src, dst, record.weight)?;
            }
            LoadedGraph::Undirected(g) => {
                g.add_node_with_id(src);
                g.add_node_with_id(dst);
                g.add_edge(src, dst, record.weight)?;
            }
        }
        Ok(added)
    }
}

/// 导入结果
#[derive(Debug, Clone)]
pub struct ImportedGraph {
    pub graph: LoadedGraph,
    pub stats: ImportStats,
}

/// 批量导入器
pub struct BatchImporter {
    directed: bool,
}

impl BatchImporter {
    /// 创建导入器
    pub fn new(directed: bool) -> Self {
        Self { directed }
    }

    /// 从 CSV 导入边表，格式错误的行计入 errors 并跳过
    #[tracing::instrument(skip(self, path), fields(directed = self.directed))]
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<ImportedGraph> {
        let start = std::time::Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut graph = LoadedGraph::new(self.directed);
        let mut stats = ImportStats::default();

        for (row, record) in reader.deserialize::<EdgeRecord>().enumerate() {
            let outcome = record
                .map_err(Error::from)
                .and_then(|record| graph.insert(&record));
            Self::tally(&mut stats, row, outcome);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(?stats, "CSV 导入完成");
        Ok(ImportedGraph { graph, stats })
    }

    /// 从 JSON Lines 导入，每行一个 `{"src":..,"dst":..,"weight":..}`
    #[tracing::instrument(skip(self, path), fields(directed = self.directed))]
    pub fn import_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<ImportedGraph> {
        let start = std::time::Instant::now();
        let reader = BufReader::new(File::open(path)?);

        let mut graph = LoadedGraph::new(self.directed);
        let mut stats = ImportStats::default();

        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = serde_json::from_str::<EdgeRecord>(&line)
                .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| graph.insert(&record));
            Self::tally(&mut stats, row, outcome);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(?stats, "JSONL 导入完成");
        Ok(ImportedGraph { graph, stats })
    }

    fn tally(stats: &mut ImportStats, row: usize, outcome: Result<usize>) {
        match outcome {
            Ok(added) => {
                stats.vertices_imported += added;
                stats.edges_imported += 1;
            }
            Err(e) => {
                tracing::debug!(row, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }
    }
}

/// 从 CSV 边表加载图
pub fn load_edge_list<P: AsRef<Path>>(path: P, directed: bool) -> Result<ImportedGraph> {
    BatchImporter::new(directed).import_csv(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn n(id: u64) -> NodeId {
        NodeId::new(id)
    }

    #[test]
    fn test_import_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "src,dst,weight").unwrap();
        writeln!(file, "0,1,2.5").unwrap();
        writeln!(file, "1, 2, 1.0").unwrap();
        writeln!(file, "2,0,-3").unwrap();

        let imported = load_edge_list(file.path(), true).unwrap();
        assert_eq!(imported.stats.vertices_imported, 3);
        assert_eq!(imported.stats.edges_imported, 3);
        assert_eq!(imported.stats.errors, 0);

        let LoadedGraph::Directed(graph) = imported.graph else {
            panic!("应为有向图");
        };
        assert_eq!(graph.edge_weight(n(1), n(2)), Some(1.0));
        assert_eq!(graph.edge_weight(n(2), n(0)), Some(-3.0));
        assert_eq!(graph.in_neighbors(n(0)), vec![n(2)]);
    }

    #[test]
    fn test_import_csv_skips_malformed_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "src,dst,weight").unwrap();
        writeln!(file, "0,1,1.0").unwrap();
        writeln!(file, "x,1,1.0").unwrap();
        writeln!(file, "1,2,heavy").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "1,2,NaN").unwrap();
        writeln!(file, "1,2,4.0").unwrap();

        let imported = load_edge_list(file.path(), true).unwrap();
        assert_eq!(imported.stats.edges_imported, 2);
        assert_eq!(imported.stats.errors, 4);
        assert_eq!(imported.graph.edge_count(), 2);
    }

    #[test]
    fn test_import_undirected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "src,dst,weight").unwrap();
        writeln!(file, "5,7,1.5").unwrap();
        writeln!(file, "7,7,0.5").unwrap();

        let imported = load_edge_list(file.path(), false).unwrap();
        assert!(!imported.graph.is_directed());
        assert_eq!(imported.stats.vertices_imported, 2);

        let LoadedGraph::Undirected(graph) = imported.graph else {
            panic!("应为无向图");
        };
        assert_eq!(graph.edge_weight(n(7), n(5)), Some(1.5));
        assert!(graph.has_edge(n(7), n(7)));
    }

    #[test]
    fn test_import_max_node_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "src,dst,weight").unwrap();
        writeln!(file, "0,18446744073709551615,1.0").unwrap();
        writeln!(file, "18446744073709551615,1,2.0").unwrap();

        let imported = load_edge_list(file.path(), true).unwrap();
        assert_eq!(imported.stats.edges_imported, 2);
        assert_eq!(imported.stats.vertices_imported, 3);
        assert_eq!(imported.stats.errors, 0);

        let LoadedGraph::Directed(mut graph) = imported.graph else {
            panic!("应为有向图");
        };
        assert_eq!(graph.edge_weight(n(u64::MAX), n(1)), Some(2.0));
        assert!(matches!(graph.add_node(), Err(Error::IdExhausted)));
    }

    #[test]
    fn test_import_missing_file() {
        assert!(load_edge_list("/nonexistent/edges.csv", true).is_err());
    }

    #[test]
    fn test_import_jsonl() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"src":0,"dst":1,"weight":3.0}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"src":1,"dst":"two","weight":3.0}}"#).unwrap();

        let imported = BatchImporter::new(true).import_jsonl(file.path()).unwrap();
        assert_eq!(imported.stats.vertices_imported, 2);
        assert_eq!(imported.stats.edges_imported, 1);
        assert_eq!(imported.stats.errors, 1);
    }
}
