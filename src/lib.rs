//! # lapkit
//!
//! MDCT 编解码器调试工具集: 变长块窗函数构建与中间数据序列对比.
//!
//! - **窗函数**: 按短块/长块序列构建每块的窗包络, 并放置到公共时间轴上
//! - **重叠相加**: 加窗后的块按过渡区拼接输出
//! - **序列对比**: 读取两份日志中同一标签的记录, 逐帧计算最大绝对误差
//!
//! # 快速开始
//!
//! ```rust
//! use lapkit::core::BlockSizes;
//! use lapkit::window::build_window;
//!
//! let placed = build_window(BlockSizes::default(), &[256, 1024, 1024, 256]).unwrap();
//! assert_eq!(placed.len(), 4);
//! assert_eq!(placed[0].right_span(), placed[1].left_span());
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `lapkit-core` | 错误类型、块大小配置、采样数组 |
//! | `lapkit-window` | 窗函数构建与重叠相加 |
//! | `lapkit-compare` | 日志记录解析与序列对比 |

/// 核心类型
pub use lapkit_core as core;

/// 窗函数构建
pub use lapkit_window as window;

/// 序列对比
pub use lapkit_compare as compare;

/// 获取 lapkit 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
