//! 块大小配置.
//!
//! MDCT 编解码器只使用两种块长: 短块 (blocksize0) 与长块 (blocksize1).
//! 两者均为 2 的幂, 指数范围 6..=13, 且短块不大于长块.

use serde::{Deserialize, Serialize};

use crate::error::{LapError, LapResult};

/// 块描述: 单个变换块的样本数
///
/// 必须等于所在 [`BlockSizes`] 的短块或长块长度.
pub type BlockDescriptor = usize;

/// 块大小指数下限 (64)
pub const MIN_BLOCKSIZE_EXP: u32 = 6;
/// 块大小指数上限 (8192)
pub const MAX_BLOCKSIZE_EXP: u32 = 13;

/// 块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// 短块
    Short,
    /// 长块
    Long,
}

/// 短块/长块长度配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSizes {
    /// 短块长度 (blocksize0)
    pub short: usize,
    /// 长块长度 (blocksize1)
    pub long: usize,
}

impl Default for BlockSizes {
    fn default() -> Self {
        Self {
            short: 256,
            long: 1024,
        }
    }
}

impl BlockSizes {
    /// 创建块大小配置并校验
    pub fn new(short: usize, long: usize) -> LapResult<Self> {
        for (name, size) in [("短块", short), ("长块", long)] {
            if !size.is_power_of_two()
                || size < 1 << MIN_BLOCKSIZE_EXP
                || size > 1 << MAX_BLOCKSIZE_EXP
            {
                return Err(LapError::InvalidArgument(format!(
                    "{name}长度 {size} 必须是 {}..={} 之间的 2 的幂",
                    1usize << MIN_BLOCKSIZE_EXP,
                    1usize << MAX_BLOCKSIZE_EXP,
                )));
            }
        }
        if short > long {
            return Err(LapError::InvalidArgument(format!(
                "短块长度 {short} 不能大于长块长度 {long}"
            )));
        }
        Ok(Self { short, long })
    }

    /// 由 identification 头中的两个 4 位指数构造
    pub fn from_exponents(exp0: u32, exp1: u32) -> LapResult<Self> {
        for exp in [exp0, exp1] {
            if !(MIN_BLOCKSIZE_EXP..=MAX_BLOCKSIZE_EXP).contains(&exp) {
                return Err(LapError::InvalidArgument(format!(
                    "块大小指数越界: 2^{exp}"
                )));
            }
        }
        Self::new(1 << exp0, 1 << exp1)
    }

    /// 判定块长属于短块还是长块
    ///
    /// 两种长度相同时统一视为短块.
    pub fn classify(&self, size: BlockDescriptor) -> LapResult<BlockKind> {
        if size == self.short {
            Ok(BlockKind::Short)
        } else if size == self.long {
            Ok(BlockKind::Long)
        } else {
            Err(LapError::InvalidBlockSize(size))
        }
    }

    /// 是否为长块 (短块与长块等长时恒为 false)
    pub fn is_long(&self, size: BlockDescriptor) -> bool {
        size == self.long && self.long != self.short
    }

    /// 按类型取块长
    pub fn size_of(&self, kind: BlockKind) -> usize {
        match kind {
            BlockKind::Short => self.short,
            BlockKind::Long => self.long,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_默认配置() {
        let sizes = BlockSizes::default();
        assert_eq!(sizes.short, 256);
        assert_eq!(sizes.long, 1024);
        assert_eq!(sizes.long / sizes.short, 4);
    }

    #[test]
    fn test_指数构造() {
        let sizes = BlockSizes::from_exponents(8, 11).unwrap();
        assert_eq!(sizes, BlockSizes::new(256, 2048).unwrap());
        assert!(BlockSizes::from_exponents(5, 11).is_err());
        assert!(BlockSizes::from_exponents(8, 14).is_err());
    }

    #[test]
    fn test_非法配置() {
        assert!(BlockSizes::new(300, 1024).is_err());
        assert!(BlockSizes::new(32, 1024).is_err());
        assert!(BlockSizes::new(2048, 1024).is_err());
        assert!(BlockSizes::new(512, 512).is_ok());
    }

    #[test]
    fn test_块类型判定() {
        let sizes = BlockSizes::default();
        assert_eq!(sizes.classify(256).unwrap(), BlockKind::Short);
        assert_eq!(sizes.classify(1024).unwrap(), BlockKind::Long);
        assert!(matches!(
            sizes.classify(512),
            Err(LapError::InvalidBlockSize(512))
        ));
        assert_eq!(sizes.size_of(BlockKind::Long), 1024);
    }

    #[test]
    fn test_等长配置不区分长块() {
        let sizes = BlockSizes::new(512, 512).unwrap();
        assert!(!sizes.is_long(512));
        assert_eq!(sizes.classify(512).unwrap(), BlockKind::Short);
    }

    #[test]
    fn test_序列化() {
        let json = serde_json::to_string(&BlockSizes::default()).unwrap();
        assert_eq!(json, r#"{"short":256,"long":1024}"#);
        let back: BlockSizes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BlockSizes::default());
    }
}
