//! 错误类型定义

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    NodeNotFound(NodeId),

    #[error("顶点 ID 已用尽")]
    IdExhausted,

    #[error("权重类型缺少运算: {0}")]
    MissingOperation(&'static str),

    #[error("检测到从源点可达的负权环")]
    NegativeCycle,

    #[error("计算已取消")]
    Cancelled,

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// 是否为负权环错误
    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Error::NegativeCycle)
    }

    /// 是否为前置条件错误（顶点缺失或运算缺失）
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::NodeNotFound(_) | Error::MissingOperation(_))
    }
}
