//! lapkit - MDCT 调试命令行工具
//!
//! 子命令:
//! - `window`: 按块序列构建窗包络, 输出为记录行或 JSON
//! - `compare`: 对比参考日志与候选日志中同一标签的记录, 输出误差序列
//! - `dump`: 重新输出日志中某标签的全部记录
//! - `points`: 输出坐标对记录排序后的点

mod logging;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use lapkit_compare::record::tags;
use lapkit_compare::{TaggedRecords, format_record, parse_points, record_body, try_compare};
use lapkit_core::BlockSizes;
use lapkit_window::WindowBuilder;

#[derive(Parser, Debug)]
#[command(name = "lapkit", version, about = "MDCT 窗函数与中间数据对比工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 日志目录
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    /// 不写日志文件
    #[arg(long, global = true)]
    no_log_file: bool,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 构建块序列的窗包络
    Window {
        /// 短块长度
        #[arg(long, default_value_t = 256)]
        short: usize,

        /// 长块长度
        #[arg(long, default_value_t = 1024)]
        long: usize,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,

        /// 块长序列 (如 256 1024 1024 256)
        #[arg(required = true)]
        blocks: Vec<usize>,
    },

    /// 逐帧对比参考日志与候选日志
    Compare {
        /// 记录标签
        #[arg(long, default_value = tags::RESIDUE_INVERSE)]
        tag: String,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,

        /// 参考 (golden) 日志
        reference: PathBuf,

        /// 候选日志
        candidate: PathBuf,
    },

    /// 重新输出某标签的全部记录
    Dump {
        /// 记录标签
        #[arg(long, default_value = tags::MDCT_OUT)]
        tag: String,

        /// 日志文件
        input: PathBuf,
    },

    /// 输出坐标对记录排序后的点
    Points {
        /// 记录标签
        #[arg(long, default_value = tags::DP)]
        tag: String,

        /// 日志文件
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let log_dir = (!cli.no_log_file).then_some(cli.log_dir.as_path());
    if let Err(e) = logging::init(log_dir, cli.verbose) {
        eprintln!("错误: {e:#}");
        process::exit(1);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match command {
        Command::Window {
            short,
            long,
            json,
            blocks,
        } => run_window(&mut out, BlockSizes::new(short, long)?, &blocks, json)?,
        Command::Compare {
            tag,
            json,
            reference,
            candidate,
        } => run_compare(&mut out, &tag, &reference, &candidate, json)?,
        Command::Dump { tag, input } => run_dump(&mut out, &tag, &input)?,
        Command::Points { tag, input } => run_points(&mut out, &tag, &input)?,
    }
    out.flush()?;
    Ok(())
}

fn run_window(out: &mut impl Write, sizes: BlockSizes, blocks: &[usize], json: bool) -> Result<()> {
    let placed = WindowBuilder::new(sizes)
        .build(blocks)
        .context("构建窗函数失败")?;
    info!(
        "窗函数: 块数={}, 短块={}, 长块={}",
        placed.len(),
        sizes.short,
        sizes.long
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, &placed)?;
        writeln!(out)?;
        return Ok(());
    }
    for p in &placed {
        writeln!(out, "{}", format_record(&format!("WINDOW@{}", p.offset), &p.envelope))?;
    }
    Ok(())
}

fn open_records(path: &Path, tag: &str) -> Result<TaggedRecords<BufReader<File>>> {
    TaggedRecords::open(path, tag).with_context(|| format!("打开日志失败, path={}", path.display()))
}

fn run_compare(
    out: &mut impl Write,
    tag: &str,
    reference: &Path,
    candidate: &Path,
    json: bool,
) -> Result<()> {
    let mut ref_records = open_records(reference, tag)?;
    let mut cand_records = open_records(candidate, tag)?;
    let report = try_compare(ref_records.by_ref(), cand_records.by_ref())
        .context("读取记录失败")?;

    for pair in report.mismatches() {
        info!(
            "第 {} 对 DIFF: {} (参考={}, 候选={})",
            pair.index,
            pair.length_diff(),
            pair.reference_len,
            pair.candidate_len
        );
    }
    if ref_records.skipped() > 0 || cand_records.skipped() > 0 {
        warn!(
            "跳过格式错误的记录: 参考={}, 候选={}",
            ref_records.skipped(),
            cand_records.skipped()
        );
    }

    let trace = report.trace();
    match (trace.max(), trace.argmax()) {
        (Some(max), Some(at)) => info!(
            "[{}] 对比 {} 对, 最大误差={:.9} (第 {} 对)",
            tag,
            trace.len(),
            max,
            at
        ),
        _ => warn!("[{}] 没有可配对的记录", tag),
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", format_record("ERROR TRACE", trace.values()))?;
    }
    Ok(())
}

fn run_dump(out: &mut impl Write, tag: &str, input: &Path) -> Result<()> {
    let mut records = open_records(input, tag)?;
    for (i, arr) in records.by_ref().enumerate() {
        let arr = arr.context("读取记录失败")?;
        info!("#{} 样本数={}, 峰值={:.6}", i, arr.len(), arr.peak());
        writeln!(out, "{}", format_record(tag, arr.values()))?;
    }
    info!(
        "[{}] 共 {} 条记录, 跳过 {} 条",
        tag,
        records.produced(),
        records.skipped()
    );
    Ok(())
}

fn run_points(out: &mut impl Write, tag: &str, input: &Path) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("打开日志失败, path={}", input.display()))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut index = 0usize;
    let mut line_no = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).context("读取日志失败")? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        let Some(body) = record_body(&line, tag) else {
            continue;
        };
        match parse_points(body) {
            Ok(points) => {
                let flat: Vec<String> = points.iter().map(|(x, y)| format!("{x},{y}")).collect();
                writeln!(out, "POINTS #{}: {}", index, flat.join(","))?;
                index += 1;
            }
            Err(e) => warn!("跳过无法解析的记录: {}", e.at_line(line_no)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_log(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_窗函数记录输出() {
        let mut out = Vec::new();
        run_window(&mut out, BlockSizes::default(), &[256, 1024], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("WINDOW@0: "));
        assert!(lines[1].starts_with("WINDOW@-64: "));
    }

    #[test]
    fn test_窗函数非法块() {
        let mut out = Vec::new();
        assert!(run_window(&mut out, BlockSizes::default(), &[256, 300], false).is_err());
    }

    #[test]
    fn test_对比输出误差序列() {
        let reference = write_log(&["RESIDUE INVERSE: 1,2,3,", "RESIDUE INVERSE: 1,1,1,1,"]);
        let candidate = write_log(&[
            "noise",
            "RESIDUE INVERSE: 1,2,3,9,",
            "RESIDUE INVERSE: bad,",
            "RESIDUE INVERSE: 1,1,1,1.5,",
            "RESIDUE INVERSE: 7,7,7,7,",
        ]);
        let mut out = Vec::new();
        run_compare(
            &mut out,
            tags::RESIDUE_INVERSE,
            reference.path(),
            candidate.path(),
            false,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ERROR TRACE: 0,0.5\n");
    }

    #[test]
    fn test_坐标对输出() {
        let mut input = write_log(&["DP: 10,1,0,5,", "DP: 3,x,"]);
        input.write_all(b"note: caf\xe9\n").unwrap();
        writeln!(input, "DP: 2,2,1,1").unwrap();
        input.flush().unwrap();
        let mut out = Vec::new();
        run_points(&mut out, tags::DP, input.path()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "POINTS #0: 0,5,10,1\nPOINTS #1: 1,1,2,2\n"
        );
    }

    #[test]
    fn test_重新输出记录() {
        let input = write_log(&["MDCT_OUT: 1.0,2.5,", "FLOOR: 3"]);
        let mut out = Vec::new();
        run_dump(&mut out, tags::MDCT_OUT, input.path()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "MDCT_OUT: 1,2.5\n");
    }
}
