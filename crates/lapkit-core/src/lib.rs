//! # lapkit-core
//!
//! lapkit 核心库, 提供错误类型、块大小配置与采样数组等基础类型.
//!
//! 窗函数构建 (`lapkit-window`) 与序列对比 (`lapkit-compare`) 共用本 crate 的类型.

pub mod block;
pub mod error;
pub mod sample;

// 重导出常用类型
pub use block::{BlockDescriptor, BlockKind, BlockSizes};
pub use error::{LapError, LapResult};
pub use sample::SampleArray;
