//! 单个块的窗形状.
//!
//! 块长为 `n` 时:
//! - 左过渡区默认覆盖 `[0, n/2)`, 由长度 `n` 的完整窗前半段驱动;
//!   长块的左邻为短块时收窄为以 `n/4` 为中心、半宽 `S/4` 的区间, 由长度 `S` 的窗驱动.
//! - 右过渡区与之镜像, 默认覆盖 `[n/2, n)`, 收窄时以 `3n/4` 为中心.
//! - 左过渡区之前与右过渡区之后增益为 0, 两者之间增益为 1.

use std::ops::Range;

use lapkit_core::{BlockDescriptor, BlockSizes, LapResult};
use serde::Serialize;

use crate::curve::vorbis_window;

/// 过渡区: 块内的 `[start, end)` 区间及驱动它的完整窗长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRegion {
    /// 起始样本 (含)
    pub start: usize,
    /// 结束样本 (不含)
    pub end: usize,
    /// 完整窗长度 K, 过渡区长度为 K/2
    pub window_len: usize,
}

impl TransitionRegion {
    fn full(start: usize, n: usize) -> Self {
        Self {
            start,
            end: start + n / 2,
            window_len: n,
        }
    }

    fn narrow(center: usize, short: usize) -> Self {
        Self {
            start: center - short / 4,
            end: center + short / 4,
            window_len: short,
        }
    }

    /// 过渡区长度
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// 过渡区是否为空
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// 样本区间
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// 上升沿第 `i` 个样本的增益
    pub fn rising(&self, i: usize) -> f64 {
        vorbis_window(i, self.window_len)
    }

    /// 下降沿第 `i` 个样本的增益
    pub fn falling(&self, i: usize) -> f64 {
        vorbis_window(self.window_len / 2 + i, self.window_len)
    }
}

/// 单个块的窗形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowShape {
    /// 块长
    pub len: usize,
    /// 左过渡区 (上升)
    pub left: TransitionRegion,
    /// 右过渡区 (下降)
    pub right: TransitionRegion,
}

impl WindowShape {
    /// 按解码器包头中的窗标志确定形状.
    ///
    /// 只有长块才会使用 `prev_long`/`next_long`; 标志为 false 时对应一侧收窄到短块宽度.
    pub fn from_flags(
        sizes: &BlockSizes,
        long_block: bool,
        prev_long: bool,
        next_long: bool,
    ) -> Self {
        let n = if long_block { sizes.long } else { sizes.short };
        let narrow_left = long_block && sizes.long != sizes.short && !prev_long;
        let narrow_right = long_block && sizes.long != sizes.short && !next_long;

        let left = if narrow_left {
            TransitionRegion::narrow(n / 4, sizes.short)
        } else {
            TransitionRegion::full(0, n)
        };
        let right = if narrow_right {
            TransitionRegion::narrow(n * 3 / 4, sizes.short)
        } else {
            TransitionRegion::full(n / 2, n)
        };

        Self { len: n, left, right }
    }

    /// 按相邻块的大小确定形状.
    ///
    /// `n`, `left_n`, `right_n` 都必须是短块或长块长度, 否则返回 `InvalidBlockSize`.
    pub fn for_neighbors(
        sizes: &BlockSizes,
        n: BlockDescriptor,
        left_n: BlockDescriptor,
        right_n: BlockDescriptor,
    ) -> LapResult<Self> {
        sizes.classify(n)?;
        sizes.classify(left_n)?;
        sizes.classify(right_n)?;
        Ok(Self::from_flags(
            sizes,
            sizes.is_long(n),
            sizes.is_long(left_n),
            sizes.is_long(right_n),
        ))
    }

    /// 块内第 `i` 个样本的增益
    pub fn gain(&self, i: usize) -> f64 {
        if i < self.left.start || i >= self.right.end {
            0.0
        } else if i < self.left.end {
            self.left.rising(i - self.left.start)
        } else if i < self.right.start {
            1.0
        } else {
            self.right.falling(i - self.right.start)
        }
    }

    /// 渲染整块窗包络
    pub fn envelope(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.gain(i)).collect()
    }

    /// 本块在重叠相加后可最终输出的样本区间 `[left.start, right.start)`
    pub fn output_range(&self) -> Range<usize> {
        self.left.start..self.right.start
    }
}
