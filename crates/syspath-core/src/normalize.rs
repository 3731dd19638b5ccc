//! 候选路径串的校验、去重与规范化。
//!
//! 规则：
//! - 输入按 `;` 拆分为若干段，空段（含末尾分隔符产生的空段）一律丢弃
//! - 每段必须非空，且所有字符均在白名单内（ASCII 字母、数字及少量符号）
//! - 按字符串完全相等去重，保留首次出现的顺序
//! - 输出以 `;` 连接并以 `;` 结尾
//!
//! 说明：
//! - 段由 `;` 拆分得到，因此段内不可能再出现 `;`，不接受“段内嵌分隔符”的写法
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::path_list::{PathList, SEPARATOR};

/// 白名单中的非字母数字符号。
pub const ALLOWED_SYMBOLS: &str = "!@#%^&()_,.{}`~'[]-$ \\/:";

/// 规范化失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// 输入为空，或所有段都未通过校验。
    #[error("No valid paths found.")]
    NoValidPaths,
}

/// 单个段被丢弃的原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectReason {
    /// 空段。
    Empty,
    /// 含白名单外字符；`index` 为字符（非字节）下标。
    InvalidChar { ch: char, index: usize },
    /// 与前面已接受的段完全相同。
    Duplicate,
}

/// 被丢弃的段及其在输入中的位置（从 0 开始的段序号）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedSegment {
    pub position: usize,
    pub segment: String,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// 规范化结果明细（用于 `--dry-run` 预览与日志）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// 最终写入注册表的值。
    pub value: String,
    /// 按顺序保留的段。
    pub accepted: Vec<String>,
    /// 被丢弃的段。
    pub rejected: Vec<RejectedSegment>,
}

/// 判断单个字符是否在白名单内。
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_SYMBOLS.contains(c)
}

/// 校验单个段。
///
/// 返回值：
/// - `Ok(())`：合法
/// - `Err(reason)`：空段或首个非法字符
pub fn check_segment(segment: &str) -> Result<(), RejectReason> {
    if segment.is_empty() {
        return Err(RejectReason::Empty);
    }
    match segment.chars().enumerate().find(|(_, c)| !is_allowed_char(*c)) {
        Some((index, ch)) => Err(RejectReason::InvalidChar { ch, index }),
        None => Ok(()),
    }
}

/// 段是否合法（非空且全部字符在白名单内）。
pub fn is_valid_segment(segment: &str) -> bool {
    check_segment(segment).is_ok()
}

/// 规范化候选路径串。
///
/// 参数：
/// - `raw`：分号分隔的候选路径串，允许含空段、末尾分隔符与非法段
///
/// 返回值：
/// - 成功：以 `;` 结尾、无重复、每段均合法的 PATH 值
///
/// 异常处理：
/// - 没有任何合法段时返回 [`NormalizeError::NoValidPaths`]
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    normalize_with_report(raw).map(|report| report.value)
}

/// 与 [`normalize`] 规则相同，额外返回每个被丢弃段的原因。
pub fn normalize_with_report(raw: &str) -> Result<NormalizeReport, NormalizeError> {
    let mut list = PathList::new();
    let mut rejected = Vec::new();

    for (position, segment) in raw.split(SEPARATOR).enumerate() {
        let verdict = check_segment(segment).and_then(|()| {
            if list.push(segment) {
                Ok(())
            } else {
                Err(RejectReason::Duplicate)
            }
        });
        match verdict {
            Ok(()) => debug!("接受路径段 #{position}: {segment}"),
            Err(reason) => {
                // 空段很常见（末尾分隔符、连续分隔符），不值得告警
                if reason != RejectReason::Empty {
                    warn!("丢弃路径段 #{position} ({reason:?}): {segment}");
                }
                rejected.push(RejectedSegment {
                    position,
                    segment: segment.to_string(),
                    reason,
                });
            }
        }
    }

    if list.is_empty() {
        return Err(NormalizeError::NoValidPaths);
    }
    let value = list.to_path_value();
    Ok(NormalizeReport {
        value,
        accepted: list.into_vec(),
        rejected,
    })
}
