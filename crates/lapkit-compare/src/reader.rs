//! 惰性记录读取.
//!
//! 逐行扫描文本源, 只产出指定标签的记录. 单条记录格式错误时跳过并告警,
//! I/O 错误产出一次后结束. 读取只前进不回退, 重读需要重新打开源.
//!
//! 行按字节读取, 非 UTF-8 字节以替换字符解码: 无标签的行照常忽略,
//! 带标签的行因数值无法解析而按格式错误跳过.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lapkit_core::{LapResult, SampleArray};
use log::{debug, warn};

use crate::record::{normalize_tag, parse_record};

/// 指定标签记录的惰性迭代器
pub struct TaggedRecords<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    tag: String,
    line_no: usize,
    produced: usize,
    skipped: usize,
    done: bool,
}

impl TaggedRecords<BufReader<File>> {
    /// 打开文件并读取其中的 `tag` 记录
    pub fn open(path: impl AsRef<Path>, tag: &str) -> LapResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), tag))
    }
}

impl<R: BufRead> TaggedRecords<R> {
    /// 从任意缓冲读取源创建
    pub fn new(reader: R, tag: &str) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            tag: normalize_tag(tag).to_string(),
            line_no: 0,
            produced: 0,
            skipped: 0,
            done: false,
        }
    }

    /// 识别的标签
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 已产出的记录数
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// 因格式错误被跳过的记录数
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// 已读取的行数
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TaggedRecords<R> {
    type Item = LapResult<SampleArray>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    debug!(
                        "记录流耗尽: tag={}, 行数={}, 记录={}, 跳过={}",
                        self.tag, self.line_no, self.produced, self.skipped
                    );
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_no += 1;

            let line = String::from_utf8_lossy(&self.buf);
            match parse_record(&line, &self.tag) {
                None => continue,
                Some(Ok(arr)) => {
                    self.produced += 1;
                    return Some(Ok(arr));
                }
                Some(Err(e)) => {
                    self.skipped += 1;
                    warn!("跳过无法解析的记录: {}", e.at_line(self.line_no));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;
    use lapkit_core::LapError;

    const LOG: &str = "\
Block size 0: 256
FLOOR: 1,2,3,

FLOOR: 4,x,6,
RESIDUE: 9,9
  FLOOR: 7.5,
";

    #[test]
    fn test_跳过非法与无关行() {
        let mut records = TaggedRecords::new(Cursor::new(LOG), "FLOOR");
        let all: Vec<SampleArray> = records.by_ref().map(|r| r.unwrap()).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].values(), &[1.0, 2.0, 3.0]);
        assert_eq!(all[1].values(), &[7.5]);
        assert_eq!(records.produced(), 2);
        assert_eq!(records.skipped(), 1);
        assert_eq!(records.lines_read(), 6);
    }

    #[test]
    fn test_耗尽后不再产出() {
        let mut records = TaggedRecords::new(Cursor::new("FLOOR: 1\n"), "FLOOR");
        assert!(records.next().is_some());
        assert!(records.next().is_none());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_惰性读取() {
        let mut records = TaggedRecords::new(Cursor::new("FLOOR: 1,2\nFLOOR: 3\n"), "FLOOR");
        assert!(records.next().unwrap().is_ok());
        assert_eq!(records.lines_read(), 1);
    }

    #[test]
    fn test_非_utf8_行不中断读取() {
        // 无标签的 Latin-1 行被忽略, 带标签的坏行按格式错误跳过
        let mut data = b"FLOOR: 1,2\n".to_vec();
        data.extend_from_slice(b"debug: caf\xe9\n");
        data.extend_from_slice(b"FLOOR: 3,\xff\n");
        data.extend_from_slice(b"FLOOR: 3,4\nFLOOR: 5,6\n");
        let mut records = TaggedRecords::new(Cursor::new(data), "FLOOR");
        let all: Vec<SampleArray> = records.by_ref().map(|r| r.unwrap()).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].values(), &[5.0, 6.0]);
        assert_eq!(records.skipped(), 1);
        assert_eq!(records.lines_read(), 5);
    }

    #[test]
    fn test_读取错误结束流() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("断开"))
            }
        }
        let mut records = TaggedRecords::new(BufReader::new(Broken), "FLOOR");
        assert!(matches!(records.next(), Some(Err(LapError::Io(_)))));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_标签带冒号() {
        let records =
            TaggedRecords::new(Cursor::new("RESIDUE INVERSE: 1,2,\n"), "RESIDUE INVERSE: ");
        assert_eq!(records.tag(), "RESIDUE INVERSE");
        assert_eq!(records.count(), 1);
    }

    #[test]
    fn test_打开文件() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MDCT_OUT: 0.5,0.25,").unwrap();
        writeln!(file, "MDCT_OUT: 1,").unwrap();
        file.flush().unwrap();

        let records = TaggedRecords::open(file.path(), "MDCT_OUT").unwrap();
        assert_eq!(records.tag(), "MDCT_OUT");
        let lens: Vec<usize> = records.map(|r| r.unwrap().len()).collect();
        assert_eq!(lens, vec![2, 1]);
    }

    #[test]
    fn test_文件不存在() {
        let res = TaggedRecords::open("/nonexistent/lapkit/none.txt", "FLOOR");
        assert!(matches!(res, Err(LapError::Io(_))));
    }
}
