//! 采样数组.
//!
//! 一帧解码中间数据 (floor 曲线、residue 向量、MDCT 向量等) 的数值序列,
//! 由日志中的一条带标签记录解析而来.

use serde::{Deserialize, Serialize};

/// 一帧采样数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleArray {
    values: Vec<f64>,
}

impl SampleArray {
    /// 由数值序列创建
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// 样本数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 只读访问样本
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 取出内部数值
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// 绝对值最大的样本幅度, 空数组返回 0
    pub fn peak(&self) -> f64 {
        self.values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
    }
}

impl From<Vec<f64>> for SampleArray {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for SampleArray {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for SampleArray {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
