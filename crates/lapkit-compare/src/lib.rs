//! # lapkit-compare
//!
//! 将候选实现输出的中间数据序列与参考 (golden) 序列逐帧对比.
//!
//! - [`record`]: `TAG: v1,v2,...` 记录行的解析与生成, 以及坐标对记录
//! - [`reader`]: 从文本源惰性读取指定标签的记录
//! - [`validator`]: 按位置配对、候选数据缩放与最大绝对误差统计
//!
//! 对比只输出误差序列用于观察趋势, 不给出通过/失败结论.

pub mod reader;
pub mod record;
pub mod validator;

pub use reader::TaggedRecords;
pub use record::{
    format_record, normalize_tag, parse_points, parse_record, parse_values, record_body,
};
pub use validator::{
    CompareReport, ErrorTrace, PairStats, compare, compare_detailed, compare_pair,
    rescale_candidate, try_compare,
};
