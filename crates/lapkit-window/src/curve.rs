//! Vorbis 窗曲线.

use std::f64::consts::PI;

/// 长度为 `k` 的完整窗在下标 `j` 处的增益.
///
/// `j` 超出 `[0, k)` 时返回 0. 前半段 (`j < k/2`) 为上升沿, 后半段为下降沿.
pub fn vorbis_window(j: usize, k: usize) -> f64 {
    if j >= k {
        return 0.0;
    }
    let z = (PI / k as f64 * (j as f64 + 0.5)).sin();
    (PI * 0.5 * z * z).sin()
}
