//! 公共时间轴上的窗叠加.

use crate::builder::PlacedEnvelope;

/// 叠加到公共时间轴上的增益序列
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// `gains[0]` 对应的时间轴位置
    pub start: i64,
    /// 每个时间轴位置的叠加结果
    pub gains: Vec<f64>,
}

impl Timeline {
    /// 逐点累加所有块的增益
    pub fn sum(placed: &[PlacedEnvelope]) -> Self {
        Self::accumulate(placed, |g| g)
    }

    /// 逐点累加所有块增益的平方 (分析窗与合成窗相乘后的能量)
    pub fn power_sum(placed: &[PlacedEnvelope]) -> Self {
        Self::accumulate(placed, |g| g * g)
    }

    fn accumulate(placed: &[PlacedEnvelope], f: impl Fn(f64) -> f64) -> Self {
        let Some(start) = placed.iter().map(|p| p.offset).min() else {
            return Self {
                start: 0,
                gains: Vec::new(),
            };
        };
        let end = placed.iter().map(|p| p.span().end).max().unwrap_or(start);
        let mut gains = vec![0.0f64; (end - start) as usize];
        for p in placed {
            let base = (p.offset - start) as usize;
            for (i, &g) in p.envelope.iter().enumerate() {
                gains[base + i] += f(g);
            }
        }
        Self { start, gains }
    }

    /// 时间轴位置 `t` 处的值, 越界为 0
    pub fn get(&self, t: i64) -> f64 {
        if t < self.start {
            return 0.0;
        }
        self.gains
            .get((t - self.start) as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// 时间轴终点 (不含)
    pub fn end(&self) -> i64 {
        self.start + self.gains.len() as i64
    }
}

/// 相邻两块在重叠区内逐点的增益平方和.
///
/// 重叠区取 `a` 的右过渡区与 `b` 的左过渡区在时间轴上的交集; 两者不相交时返回空.
pub fn overlap_energy(a: &PlacedEnvelope, b: &PlacedEnvelope) -> Vec<f64> {
    let ra = a.right_span();
    let lb = b.left_span();
    let from = ra.start.max(lb.start);
    let to = ra.end.min(lb.end);
    (from..to)
        .map(|t| {
            let ga = a.gain_at(t);
            let gb = b.gain_at(t);
            ga * ga + gb * gb
        })
        .collect()
}
