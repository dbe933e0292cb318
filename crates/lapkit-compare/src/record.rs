//! 带标签记录行.
//!
//! 记录格式为 `<TAG>: v1,v2,...,vk`, 末尾允许多一个逗号.
//! 坐标对记录按 `x1,y1,x2,y2,...` 交错存放整数.

use lapkit_core::{LapError, LapResult, SampleArray};

/// 解码各阶段的常用标签
pub mod tags {
    /// floor 曲线
    pub const FLOOR: &str = "FLOOR";
    /// floor 逆变换结果
    pub const FLOOR_INVERSE: &str = "FLOOR INVERSE";
    /// residue 向量
    pub const RESIDUE: &str = "RESIDUE";
    /// floor × residue, 即 IMDCT 输入频谱
    pub const RESIDUE_INVERSE: &str = "RESIDUE INVERSE";
    /// IMDCT 输入
    pub const MDCT_IN: &str = "MDCT_IN";
    /// IMDCT 输出
    pub const MDCT_OUT: &str = "MDCT_OUT";
    /// floor 折线端点 (坐标对)
    pub const DP: &str = "DP";
}

/// 规范化标签: 去掉末尾的一个 `:` 及空白, `"FLOOR: "` 与 `"FLOOR"` 等价
pub fn normalize_tag(tag: &str) -> &str {
    let tag = tag.trim_end();
    tag.strip_suffix(':').unwrap_or(tag).trim_end()
}

/// 若行以 `tag:` 开头, 返回去掉标签后的数据部分
pub fn record_body<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(normalize_tag(tag))?
        .strip_prefix(':')
        .map(str::trim)
}

fn tokens(body: &str) -> Vec<&str> {
    let body = body.trim();
    let body = body.strip_suffix(',').unwrap_or(body).trim_end();
    if body.is_empty() {
        return Vec::new();
    }
    body.split(',').map(str::trim).collect()
}

/// 解析逗号分隔的浮点数列表
pub fn parse_values(body: &str) -> LapResult<Vec<f64>> {
    tokens(body)
        .into_iter()
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<f64>()
                .map_err(|_| LapError::malformed(format!("第 {} 个值 '{}' 不是浮点数", i + 1, tok)))
        })
        .collect()
}

/// 解析一行记录.
///
/// 行不带该标签时返回 `None`; 带标签但数据无法解析时返回 `MalformedRecord`.
pub fn parse_record(line: &str, tag: &str) -> Option<LapResult<SampleArray>> {
    let body = record_body(line, tag)?;
    Some(parse_values(body).map(SampleArray::new))
}

/// 生成一行记录 (`TAG: v1,v2,...`)
pub fn format_record(tag: &str, values: &[f64]) -> String {
    let mut line = String::with_capacity(tag.len() + 2 + values.len() * 8);
    line.push_str(tag);
    line.push_str(": ");
    for (i, v) in values.iter().enumerate() {
        if i != 0 {
            line.push(',');
        }
        line.push_str(&v.to_string());
    }
    line
}

/// 解析坐标对记录, 返回按 x 升序排列的点.
///
/// 相邻两个整数组成一个点, 落单的最后一个值被丢弃; x 相同时按 y 排序.
pub fn parse_points(body: &str) -> LapResult<Vec<(i64, i64)>> {
    let values = tokens(body)
        .into_iter()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| LapError::malformed(format!("坐标 '{tok}' 不是整数")))
        })
        .collect::<LapResult<Vec<i64>>>()?;
    let mut points: Vec<(i64, i64)> = values.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    points.sort();
    Ok(points)
}
