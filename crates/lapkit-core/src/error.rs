//! 统一错误类型定义.
//!
//! 所有 lapkit crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// lapkit 统一错误类型
#[derive(Debug, Error)]
pub enum LapError {
    /// 块大小不属于当前配置的短块/长块
    #[error("无效块大小: {0}")]
    InvalidBlockSize(usize),

    /// 块序列为空
    #[error("块序列为空")]
    EmptySequence,

    /// 单条记录无法解析
    #[error("记录格式错误 (第 {line} 行): {reason}")]
    MalformedRecord {
        /// 源中的行号 (从 1 开始, 0 表示未知)
        line: usize,
        /// 失败原因
        reason: String,
    },

    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl LapError {
    /// 构造不带行号的记录格式错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line: 0,
            reason: reason.into(),
        }
    }

    /// 为记录格式错误补充行号, 其它错误原样返回
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedRecord { reason, .. } => Self::MalformedRecord { line, reason },
            other => other,
        }
    }

    /// 是否为可跳过的单条记录错误
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

/// lapkit 统一 Result 类型
pub type LapResult<T> = Result<T, LapError>;
