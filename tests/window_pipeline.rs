//! 窗函数构建管线测试.
//!
//! 覆盖:
//! - 所有短块/长块组合下相邻块重叠区重合且增益平方和为 1
//! - 孤立长块的包络形状
//! - 加窗 + 重叠相加对全 1 信号的重建

use lapkit::core::{BlockSizes, LapError};
use lapkit::window::{
    OverlapAdder, Timeline, WindowBuilder, apply_window, build_window, overlap_energy,
};

const S: usize = 256;
const L: usize = 1024;

/// 生成长度为 `len` 的全部短块/长块组合
fn all_sequences(len: usize) -> Vec<Vec<usize>> {
    (0..1u32 << len)
        .map(|mask| {
            (0..len)
                .map(|i| if mask & (1 << i) != 0 { L } else { S })
                .collect()
        })
        .collect()
}

#[test]
fn test_全部组合重叠区能量为一() {
    let builder = WindowBuilder::new(BlockSizes::default());
    for len in 1..=6 {
        for blocks in all_sequences(len) {
            let placed = builder.build(&blocks).unwrap();
            assert_eq!(placed.len(), blocks.len());
            for pair in placed.windows(2) {
                assert_eq!(
                    pair[0].right_span(),
                    pair[1].left_span(),
                    "过渡区未重合: {blocks:?}"
                );
                for e in overlap_energy(&pair[0], &pair[1]) {
                    assert!((e - 1.0).abs() < 1e-9, "{blocks:?}: 能量={e}");
                }
            }
        }
    }
}

#[test]
fn test_短长长短序列() {
    let placed = build_window(BlockSizes::default(), &[S, L, L, S]).unwrap();
    assert_eq!(placed.len(), 4);
    let lens: Vec<usize> = placed.iter().map(|p| p.envelope.len()).collect();
    assert_eq!(lens, vec![S, L, L, S]);
    for pair in placed.windows(2) {
        assert_eq!(pair[0].right_span(), pair[1].left_span());
        assert!(!pair[0].right_span().is_empty());
    }
}

#[test]
fn test_孤立长块() {
    let placed = build_window(BlockSizes::default(), &[L]).unwrap();
    let env = &placed[0].envelope;
    assert!(env[0].abs() < 1e-4);
    assert!(env[L - 1].abs() < 1e-4);
    assert!((env[L / 2] - 1.0).abs() < 1e-4);
    assert!(env.iter().all(|g| (0.0..=1.0).contains(g)));
    for i in 0..L / 2 {
        assert!((env[i] - env[L - 1 - i]).abs() < 1e-12);
    }
}

#[test]
fn test_非法块大小() {
    let res = build_window(BlockSizes::default(), &[S, L, 2048]);
    assert!(matches!(res, Err(LapError::InvalidBlockSize(2048))));
    let res = build_window(BlockSizes::default(), &[]);
    assert!(matches!(res, Err(LapError::EmptySequence)));
}

#[test]
fn test_其它块大小配置() {
    let sizes = BlockSizes::from_exponents(7, 11).unwrap();
    let blocks = [2048, 128, 128, 2048, 2048];
    let placed = build_window(sizes, &blocks).unwrap();
    let tl = Timeline::power_sum(&placed);
    let from = placed[0].right_span().start;
    let to = placed[placed.len() - 1].left_span().end;
    for t in from..to {
        assert!((tl.get(t) - 1.0).abs() < 1e-9, "t={t}");
    }
}

#[test]
fn test_重叠相加重建() {
    let blocks = [L, L, S, S, L, S, L, L];
    let shapes = WindowBuilder::new(BlockSizes::default())
        .shapes(&blocks)
        .unwrap();

    let mut lapper = OverlapAdder::new();
    let mut total = 0usize;
    for (i, shape) in shapes.iter().enumerate() {
        let mut block = vec![1.0f64; shape.len];
        apply_window(shape, &mut block).unwrap();
        apply_window(shape, &mut block).unwrap();
        let out = lapper.push(shape, &block).unwrap();
        total += out.len();
        if i > 0 {
            for v in out {
                assert!((v - 1.0).abs() < 1e-9);
            }
        }
    }
    // 输出样本数等于首块左过渡区起点到末块右过渡区起点的时间轴长度
    let placed = build_window(BlockSizes::default(), &blocks).unwrap();
    let first = placed[0].left_span().start;
    let last = placed[placed.len() - 1].right_span().start;
    assert_eq!(total as i64, last - first);
}
