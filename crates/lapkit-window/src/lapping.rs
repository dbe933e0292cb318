//! 加窗与重叠相加.
//!
//! IMDCT 输出的块先乘以窗包络, 再与上一块保留的右过渡区尾部相加.
//! 每个块最终输出 `[left.start, right.start)` 区间的样本,
//! `[right.start, right.end)` 保留给下一块.

use lapkit_core::{LapError, LapResult};
use log::trace;

use crate::shape::WindowShape;

/// 将块样本原地乘以窗包络 (过渡区外置零)
pub fn apply_window(shape: &WindowShape, samples: &mut [f64]) -> LapResult<()> {
    if samples.len() != shape.len {
        return Err(LapError::InvalidArgument(format!(
            "加窗样本数 {} 与块长 {} 不一致",
            samples.len(),
            shape.len
        )));
    }
    for (i, s) in samples.iter_mut().enumerate() {
        *s *= shape.gain(i);
    }
    Ok(())
}

/// 重叠相加状态: 保存上一块右过渡区的样本
#[derive(Debug, Clone, Default)]
pub struct OverlapAdder {
    tail: Option<Vec<f64>>,
}

impl OverlapAdder {
    /// 创建空状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入一个已加窗的块, 返回本块可最终输出的样本.
    ///
    /// 上一块保留的尾部长度必须等于本块左过渡区长度.
    pub fn push(&mut self, shape: &WindowShape, windowed: &[f64]) -> LapResult<Vec<f64>> {
        if windowed.len() != shape.len {
            return Err(LapError::InvalidArgument(format!(
                "重叠相加样本数 {} 与块长 {} 不一致",
                windowed.len(),
                shape.len
            )));
        }

        let mut out = windowed[shape.output_range()].to_vec();
        if let Some(tail) = &self.tail {
            if tail.len() != shape.left.len() {
                return Err(LapError::InvalidArgument(format!(
                    "上一块重叠长度 {} 与本块左过渡区长度 {} 不一致",
                    tail.len(),
                    shape.left.len()
                )));
            }
            for (o, &t) in out.iter_mut().zip(tail) {
                *o += t;
            }
        }

        self.tail = Some(windowed[shape.right.range()].to_vec());
        trace!("重叠相加: 块长={}, 输出={}", shape.len, out.len());
        Ok(out)
    }

    /// 取出尚未输出的尾部样本
    pub fn flush(&mut self) -> Vec<f64> {
        self.tail.take().unwrap_or_default()
    }

    /// 丢弃尾部, 回到初始状态
    pub fn reset(&mut self) {
        self.tail = None;
    }

    /// 是否持有上一块的尾部
    pub fn has_tail(&self) -> bool {
        self.tail.is_some()
    }
}
