//! Windows 平台能力封装（系统 PATH 注册表写入、环境变量变更广播）。
//!
//! 目标：
//! - 为 `syspath-core` 中的 `PathStore` / `ChangeBroadcaster` 提供 Windows 实现
//! - 统一错误处理风格（以 `anyhow::Result` 形式向上返回）
//!
//! 权限要求：
//! - 写入 HKLM 环境变量键、执行 `setx /M` 均需要管理员权限
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

pub mod broadcast;
#[cfg(windows)]
pub mod registry;
