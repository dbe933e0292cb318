//! # lapkit-window
//!
//! 变长块 MDCT 窗函数构建.
//!
//! 每个块的窗由三段组成: 左过渡区 (0 -> 1 上升), 中间平坦区 (恒为 1),
//! 右过渡区 (1 -> 0 下降). 长块与短块相邻时, 长块一侧的过渡区收窄为短块的宽度,
//! 使相邻两块的过渡区在公共时间轴上完全重合, 且重合处增益平方和恒为 1.
//!
//! - [`curve`]: 窗曲线 `sin(π/2 · sin²(π/K · (j + 0.5)))`
//! - [`shape`]: 单个块的过渡区位置
//! - [`builder`]: 按块序列构建窗并计算时间轴偏移
//! - [`timeline`]: 在公共时间轴上叠加与检查
//! - [`lapping`]: 加窗与重叠相加

pub mod builder;
pub mod curve;
pub mod lapping;
pub mod shape;
pub mod timeline;

pub use builder::{PlacedEnvelope, WindowBuilder, WindowEnvelope, build_window};
pub use curve::vorbis_window;
pub use lapping::{OverlapAdder, apply_window};
pub use shape::{TransitionRegion, WindowShape};
pub use timeline::{Timeline, overlap_energy};
