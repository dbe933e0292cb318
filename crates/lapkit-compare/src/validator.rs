//! 参考序列与候选序列的逐帧对比.
//!
//! 第 n 个参考数组与第 n 个候选数组配对, 任一序列耗尽即停止.
//! 候选数组先按 `len / 4.0` 缩放, 再在两者公共前缀上求最大绝对误差.

use lapkit_core::LapResult;
use log::debug;
use serde::Serialize;

/// 候选数据缩放的除数.
///
/// 产出候选日志的流水线以 `len / 4.0` 归一化, 该常数来自实测, 需原样保留.
pub const LEGACY_RESCALE_DIVISOR: f64 = 4.0;

/// 按候选数组自身长度缩放: `x * len / 4.0`
pub fn rescale_candidate(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    values
        .iter()
        .map(|&x| x * n / LEGACY_RESCALE_DIVISOR)
        .collect()
}

/// 单对数组的对比结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStats {
    /// 配对序号 (从 0 开始)
    pub index: usize,
    /// 参考数组长度
    pub reference_len: usize,
    /// 候选数组长度
    pub candidate_len: usize,
    /// 实际参与比较的样本数
    pub compared: usize,
    /// 最大绝对误差, 无可比较样本时为 0
    pub max_err: f64,
}

impl PairStats {
    /// 候选长度减参考长度
    pub fn length_diff(&self) -> i64 {
        self.candidate_len as i64 - self.reference_len as i64
    }

    /// 两者长度是否不同
    pub fn is_length_mismatch(&self) -> bool {
        self.reference_len != self.candidate_len
    }
}

/// 对比单对数组: 缩放候选后在公共前缀上求最大绝对误差
pub fn compare_pair(index: usize, reference: &[f64], candidate: &[f64]) -> PairStats {
    let scaled = rescale_candidate(candidate);
    let compared = reference.len().min(scaled.len());
    let max_err = reference
        .iter()
        .zip(&scaled)
        .fold(0.0f64, |acc, (r, c)| acc.max((r - c).abs()));

    if reference.len() != candidate.len() {
        debug!(
            "第 {} 对长度不一致: 参考={}, 候选={}, DIFF={}, 按前 {} 个样本比较",
            index,
            reference.len(),
            candidate.len(),
            candidate.len() as i64 - reference.len() as i64,
            compared
        );
    }

    PairStats {
        index,
        reference_len: reference.len(),
        candidate_len: candidate.len(),
        compared,
        max_err,
    }
}

/// 误差序列: 每对数组一个最大绝对误差, 按配对顺序排列
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorTrace {
    values: Vec<f64>,
}

impl ErrorTrace {
    /// 误差值
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 配对数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有任何配对
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 最大误差
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// 最大误差所在的配对序号 (相同时取最早的)
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }

    /// 遍历误差值
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl From<Vec<f64>> for ErrorTrace {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// 完整对比报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompareReport {
    /// 每对数组的统计
    pub pairs: Vec<PairStats>,
}

impl CompareReport {
    /// 提取误差序列
    pub fn trace(&self) -> ErrorTrace {
        self.pairs.iter().map(|p| p.max_err).collect::<Vec<_>>().into()
    }

    /// 长度不一致的配对
    pub fn mismatches(&self) -> impl Iterator<Item = &PairStats> {
        self.pairs.iter().filter(|p| p.is_length_mismatch())
    }
}

impl From<CompareReport> for ErrorTrace {
    fn from(report: CompareReport) -> Self {
        report.trace()
    }
}

/// 对比两个序列并给出逐对统计.
///
/// 按位置配对, 较长序列多出的部分被丢弃.
pub fn compare_detailed<R, C>(reference: R, candidate: C) -> CompareReport
where
    R: IntoIterator,
    R::Item: AsRef<[f64]>,
    C: IntoIterator,
    C::Item: AsRef<[f64]>,
{
    let pairs: Vec<PairStats> = reference
        .into_iter()
        .zip(candidate)
        .enumerate()
        .map(|(i, (r, c))| compare_pair(i, r.as_ref(), c.as_ref()))
        .collect();
    debug!("序列对比结束: 配对数={}", pairs.len());
    CompareReport { pairs }
}

/// 对比两个序列, 返回误差序列
pub fn compare<R, C>(reference: R, candidate: C) -> ErrorTrace
where
    R: IntoIterator,
    R::Item: AsRef<[f64]>,
    C: IntoIterator,
    C::Item: AsRef<[f64]>,
{
    compare_detailed(reference, candidate).trace()
}

/// 对比两个可能出错的序列 (如 [`TaggedRecords`](crate::TaggedRecords)).
///
/// 遇到第一个错误即返回该错误.
pub fn try_compare<R, C, A, B>(reference: R, candidate: C) -> LapResult<CompareReport>
where
    R: IntoIterator<Item = LapResult<A>>,
    C: IntoIterator<Item = LapResult<B>>,
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    let mut reference = reference.into_iter();
    let mut candidate = candidate.into_iter();
    let mut pairs = Vec::new();
    loop {
        let Some(r) = reference.next() else {
            debug!("参考序列耗尽, 配对数={}", pairs.len());
            break;
        };
        let r = r?;
        let Some(c) = candidate.next() else {
            debug!("候选序列耗尽, 配对数={}", pairs.len());
            break;
        };
        let c = c?;
        pairs.push(compare_pair(pairs.len(), r.as_ref(), c.as_ref()));
    }
    Ok(CompareReport { pairs })
}
