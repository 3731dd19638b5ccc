//! 写入系统 PATH 的外部协作者抽象及执行顺序。
//!
//! 顺序约定：
//! 1) 将规范化后的值写入持久存储（注册表）
//! 2) 写入成功后广播环境变量变更
//!
//! 任一步失败立即返回错误，不重试；写入失败时不会广播。
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use anyhow::{Context, Result};
use tracing::info;

/// 系统 PATH 的持久存储。
pub trait PathStore {
    /// 存储位置的可读描述（用于日志/错误信息）。
    fn describe(&self) -> String;

    /// 以可展开字符串的形式写入完整 PATH 值。
    fn write_path(&self, value: &str) -> Result<()>;
}

/// 环境变量变更通知。
///
/// 实现只负责触发通知，不传递任何环境变量内容。
pub trait ChangeBroadcaster {
    fn broadcast_environment_change(&self) -> Result<()>;
}

/// 写入 PATH 并广播变更。
///
/// 参数：
/// - `value`：已规范化的 PATH 值（应来自 [`crate::normalize`]）
/// - `store`：持久存储
/// - `broadcaster`：变更通知
///
/// 异常处理：
/// - 写入失败：返回错误，不执行广播
/// - 广播失败：返回错误（此时注册表已写入）
pub fn apply_system_path(
    value: &str,
    store: &dyn PathStore,
    broadcaster: &dyn ChangeBroadcaster,
) -> Result<()> {
    info!("写入 PATH: {} ({} 字节)", store.describe(), value.len());
    store
        .write_path(value)
        .with_context(|| format!("写入 PATH 失败: {}", store.describe()))?;
    broadcaster
        .broadcast_environment_change()
        .context("广播环境变量变更失败")?;
    info!("已广播环境变量变更");
    Ok(())
}
