//! 按块序列构建窗包络.

use std::ops::Range;

use lapkit_core::{BlockDescriptor, BlockSizes, LapError, LapResult};
use log::debug;
use serde::Serialize;

use crate::shape::WindowShape;

/// 窗包络: 每个样本一个增益值
pub type WindowEnvelope = Vec<f64>;

/// 放置到公共时间轴上的单块窗
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEnvelope {
    /// 块首样本在公共时间轴上的位置
    pub offset: i64,
    /// 块的窗形状
    pub shape: WindowShape,
    /// 窗包络
    pub envelope: WindowEnvelope,
}

impl PlacedEnvelope {
    /// 左过渡区在公共时间轴上的区间
    pub fn left_span(&self) -> Range<i64> {
        self.offset + self.shape.left.start as i64..self.offset + self.shape.left.end as i64
    }

    /// 右过渡区在公共时间轴上的区间
    pub fn right_span(&self) -> Range<i64> {
        self.offset + self.shape.right.start as i64..self.offset + self.shape.right.end as i64
    }

    /// 整块在公共时间轴上的区间
    pub fn span(&self) -> Range<i64> {
        self.offset..self.offset + self.envelope.len() as i64
    }

    /// 公共时间轴位置 `t` 处的增益, 块外为 0
    pub fn gain_at(&self, t: i64) -> f64 {
        if !self.span().contains(&t) {
            return 0.0;
        }
        self.envelope[(t - self.offset) as usize]
    }
}

/// 窗构建器
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowBuilder {
    sizes: BlockSizes,
}

impl WindowBuilder {
    /// 以给定短块/长块配置创建构建器
    pub fn new(sizes: BlockSizes) -> Self {
        Self { sizes }
    }

    /// 块大小配置
    pub fn sizes(&self) -> &BlockSizes {
        &self.sizes
    }

    /// 计算每个块的窗形状.
    ///
    /// 首块的左邻与末块的右邻视为其自身.
    pub fn shapes(&self, blocks: &[BlockDescriptor]) -> LapResult<Vec<WindowShape>> {
        if blocks.is_empty() {
            return Err(LapError::EmptySequence);
        }
        let last = blocks.len() - 1;
        blocks
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let left_n = if i > 0 { blocks[i - 1] } else { n };
                let right_n = if i < last { blocks[i + 1] } else { n };
                WindowShape::for_neighbors(&self.sizes, n, left_n, right_n)
            })
            .collect()
    }

    /// 构建每个块的窗包络并放置到公共时间轴上.
    ///
    /// 偏移在绘制块之前减去左过渡区起点, 之后加上右过渡区起点,
    /// 使相邻块的过渡区在时间轴上重合.
    pub fn build(&self, blocks: &[BlockDescriptor]) -> LapResult<Vec<PlacedEnvelope>> {
        let shapes = self.shapes(blocks)?;
        let mut t = 0i64;
        let placed: Vec<PlacedEnvelope> = shapes
            .into_iter()
            .map(|shape| {
                t -= shape.left.start as i64;
                let offset = t;
                t += shape.right.start as i64;
                PlacedEnvelope {
                    offset,
                    shape,
                    envelope: shape.envelope(),
                }
            })
            .collect();
        debug!(
            "窗构建完成: 块数={}, 短块={}, 长块={}, 时间轴终点={}",
            placed.len(),
            self.sizes.short,
            self.sizes.long,
            t
        );
        Ok(placed)
    }
}

/// 以给定配置构建块序列的窗包络
pub fn build_window(
    sizes: BlockSizes,
    blocks: &[BlockDescriptor],
) -> LapResult<Vec<PlacedEnvelope>> {
    WindowBuilder::new(sizes).build(blocks)
}
