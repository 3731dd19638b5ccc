//! 环境变量变更广播（`WM_SETTINGCHANGE`）。
//!
//! 说明：
//! - 默认通过 `setx /M USERNAME <当前值>` 触发广播：`setx` 在写入后会发送 `WM_SETTINGCHANGE`，
//!   把一个无关变量设为其自身即可只得到广播效果
//! - `setx` 写入的值超过 1024 字符会被截断，因此绝不能用它传递 PATH 本身
//! - Windows 上也可直接调用 `SendMessageTimeoutW` 广播（[`NativeBroadcaster`]）
//!
//! 权限要求：
//! - `setx /M` 写机器级变量，需要管理员权限
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use std::process::Command;

use anyhow::{anyhow, Context, Result};
use syspath_core::apply::ChangeBroadcaster;
use tracing::debug;

/// 默认用于触发广播的变量。
pub const DEFAULT_SETX_VARIABLE: &str = "USERNAME";

/// 通过 `setx /M <VAR> <VAR 当前值>` 触发广播。
#[derive(Debug, Clone)]
pub struct SetxBroadcaster {
    variable: String,
}

impl Default for SetxBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_SETX_VARIABLE)
    }
}

impl SetxBroadcaster {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    /// 组装 `setx` 参数（不包含程序名）。
    ///
    /// 异常处理：
    /// - 当前进程环境中不存在该变量时返回错误，避免把变量写成空值。
    pub fn setx_args(&self) -> Result<Vec<String>> {
        let current = std::env::var(&self.variable)
            .with_context(|| format!("读取环境变量失败: {}", self.variable))?;
        Ok(vec!["/M".to_string(), self.variable.clone(), current])
    }
}

impl ChangeBroadcaster for SetxBroadcaster {
    fn broadcast_environment_change(&self) -> Result<()> {
        let args = self.setx_args()?;
        debug!("通过 setx 触发广播: {}", self.variable);
        run_setx(&args)
    }
}

/// 执行 `setx` 并将失败输出汇总为 `anyhow::Error`。
///
/// 异常处理：
/// - 启动失败：返回错误（通常是系统缺失或 PATH 异常）
/// - 退出码非 0：返回错误并携带 stdout/stderr
fn run_setx(args: &[String]) -> Result<()> {
    let out = Command::new("setx")
        .args(args)
        .output()
        .context("执行 setx 失败")?;
    if out.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    Err(anyhow!(
        "setx 执行失败: {}\n{}\n{}",
        out.status,
        stdout,
        stderr
    ))
}

/// 直接向所有顶层窗口发送 `WM_SETTINGCHANGE("Environment")`。
#[cfg(windows)]
#[derive(Debug, Clone)]
pub struct NativeBroadcaster {
    timeout_ms: u32,
}

#[cfg(windows)]
impl Default for NativeBroadcaster {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

#[cfg(windows)]
impl ChangeBroadcaster for NativeBroadcaster {
    fn broadcast_environment_change(&self) -> Result<()> {
        use windows::core::w;
        use windows::Win32::Foundation::{LPARAM, WPARAM};
        use windows::Win32::UI::WindowsAndMessaging::{
            SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_SETTINGCHANGE,
        };

        let mut result = 0usize;
        let ret = unsafe {
            SendMessageTimeoutW(
                HWND_BROADCAST,
                WM_SETTINGCHANGE,
                WPARAM(0),
                LPARAM(w!("Environment").as_ptr() as isize),
                SMTO_ABORTIFHUNG,
                self.timeout_ms,
                Some(&mut result),
            )
        };
        if ret.0 == 0 {
            return Err(windows::core::Error::from_win32()).context("SendMessageTimeoutW 广播失败");
        }
        debug!("WM_SETTINGCHANGE 已广播");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setx_args_reassign_variable_to_itself() {
        let var = "SYSPATH_TEST_BROADCAST_VAR";
        std::env::set_var(var, "alice");
        let args = SetxBroadcaster::new(var).setx_args().unwrap();
        assert_eq!(args, vec!["/M", var, "alice"]);
    }

    #[test]
    fn missing_variable_fails_before_spawning() {
        let err = SetxBroadcaster::new("SYSPATH_TEST_SURELY_UNSET_VAR")
            .broadcast_environment_change()
            .unwrap_err();
        assert!(err.to_string().contains("SYSPATH_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn default_uses_username() {
        assert_eq!(SetxBroadcaster::default().variable, DEFAULT_SETX_VARIABLE);
    }
}
