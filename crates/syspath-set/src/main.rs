//! 系统 PATH 设置工具（syspath-set）。
//!
//! 职责：
//! - 接收一个分号分隔的路径串，校验、去重后生成规范 PATH 值
//! - 写入 HKLM 机器级 `Path`（`REG_EXPAND_SZ`），随后广播环境变量变更
//!
//! 权限要求：
//! - 必须以管理员权限运行；权限不足时注册表写入失败，错误直接返回并以非 0 退出
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use syspath_core::apply::{apply_system_path, ChangeBroadcaster, PathStore};
use syspath_core::{normalize_with_report, NormalizeError, NormalizeReport};
use tracing::debug;

const PROGRAM: &str = "syspath-set";

/// 参数错误时输出到 stdout 的用法提示。
const USAGE: &str = "Usage: syspath-set \"new system path to set s...;...;\"\nMake sure to call this as admin.";

/// 命令行参数。
///
/// 说明：
/// - `paths` 为唯一的位置参数；数量不对时仅打印用法，不做任何修改
/// - `dry_run` 只输出规范化结果，不写注册表、不广播
#[derive(Debug, Parser)]
#[command(name = PROGRAM, version, after_help = "Make sure to call this as admin.")]
struct Cli {
    /// 分号分隔的新系统 PATH。
    ///
    /// 以 `-` 开头的值同样视为路径；非 UTF-8 字符按替换字符处理，随后在校验中被丢弃。
    #[arg(allow_hyphen_values = true)]
    paths: OsString,

    /// 仅预览规范化结果。
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// 预览时以 JSON 输出明细（含被丢弃的段）。
    #[arg(long, default_value_t = false, requires = "dry_run")]
    json: bool,

    /// 成功后输出确认信息。
    #[arg(long, default_value_t = false)]
    confirm: bool,

    /// 环境变量变更广播方式。
    #[arg(long, value_enum, default_value_t = BroadcastMethod::Setx)]
    broadcast: BroadcastMethod,
}

/// 广播方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BroadcastMethod {
    /// `setx /M USERNAME %USERNAME%`。
    Setx,
    /// 直接发送 `WM_SETTINGCHANGE`。
    Native,
}

/// 程序入口：解析参数并执行。
///
/// 异常处理：
/// - 参数错误、无合法路径：输出提示后正常退出
/// - 注册表/广播失败：返回 `Err`，进程以非 0 状态退出
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            debug!("参数解析失败: {e}");
            println!("{USAGE}");
            return Ok(());
        }
    };
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let raw = cli.paths.to_string_lossy();
    let report = match normalize_with_report(&raw) {
        Ok(report) => report,
        Err(e @ NormalizeError::NoValidPaths) => {
            println!("{e}");
            return Ok(());
        }
    };

    if cli.dry_run {
        return preview(&report, cli.json);
    }

    let (store, broadcaster) = system_collaborators(cli.broadcast)?;
    apply_system_path(&report.value, store.as_ref(), broadcaster.as_ref())?;
    if cli.confirm {
        println!("System PATH updated ({} entries).", report.accepted.len());
    }
    Ok(())
}

/// 输出预览（不做任何系统修改）。
fn preview(report: &NormalizeReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("序列化预览 JSON 失败")?;
        println!("{text}");
    } else {
        println!("{}", report.value);
    }
    Ok(())
}

type Collaborators = (Box<dyn PathStore>, Box<dyn ChangeBroadcaster>);

#[cfg(windows)]
fn system_collaborators(method: BroadcastMethod) -> Result<Collaborators> {
    use syspath_windows::broadcast::{NativeBroadcaster, SetxBroadcaster};
    use syspath_windows::registry::RegistryPathStore;

    let broadcaster: Box<dyn ChangeBroadcaster> = match method {
        BroadcastMethod::Setx => Box::new(SetxBroadcaster::default()),
        BroadcastMethod::Native => Box::new(NativeBroadcaster::default()),
    };
    Ok((Box::new(RegistryPathStore::machine()), broadcaster))
}

#[cfg(not(windows))]
fn system_collaborators(_method: BroadcastMethod) -> Result<Collaborators> {
    Err(anyhow::anyhow!(
        "{PROGRAM} 仅支持 Windows：当前平台无法写入系统 PATH（可使用 --dry-run 预览）"
    ))
}
