//! 系统 PATH 注册表写入。
//!
//! 主要用途：
//! - 将规范化后的 PATH 写入 `HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment` 的 `Path` 值
//! - 值类型固定为 `REG_EXPAND_SZ`，保证 `%SystemRoot%` 等引用在读取时继续被系统展开
//!
//! 权限要求：
//! - 写入 HKLM 需要管理员权限；测试中可改为 HKCU 下的临时键
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use anyhow::{Context, Result};
use syspath_core::apply::PathStore;
use tracing::debug;
use winreg::enums::{RegType, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_SET_VALUE};
use winreg::{RegKey, RegValue};

/// 机器级环境变量所在子键。
pub const MACHINE_ENVIRONMENT_KEY: &str =
    "SYSTEM\\CurrentControlSet\\Control\\Session Manager\\Environment";

/// 系统 PATH 的值名。
pub const PATH_VALUE_NAME: &str = "Path";

/// 注册表根键。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHive {
    Hklm,
    Hkcu,
}

impl RegistryHive {
    fn predef(self) -> RegKey {
        match self {
            RegistryHive::Hklm => RegKey::predef(HKEY_LOCAL_MACHINE),
            RegistryHive::Hkcu => RegKey::predef(HKEY_CURRENT_USER),
        }
    }

    /// 可读名称（用于错误信息）。
    pub fn name(self) -> &'static str {
        match self {
            RegistryHive::Hklm => "HKLM",
            RegistryHive::Hkcu => "HKCU",
        }
    }
}

/// 以只写方式打开已有子键。
///
/// 返回的 [`RegKey`] 在 drop 时关闭句柄，包括出错提前返回的路径。
///
/// 异常处理：
/// - 键不存在或权限不足时返回错误。
pub fn open_for_write(hive: RegistryHive, key: &str) -> Result<RegKey> {
    hive.predef()
        .open_subkey_with_flags(key, KEY_SET_VALUE)
        .with_context(|| format!("打开注册表键失败: {}\\{}", hive.name(), key))
}

/// 将字符串编码为 `REG_EXPAND_SZ`（UTF-16LE，含结尾 NUL）。
pub fn expand_sz_value(value: &str) -> RegValue {
    let bytes = OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0u16))
        .flat_map(u16::to_le_bytes)
        .collect();
    RegValue {
        bytes,
        vtype: RegType::REG_EXPAND_SZ,
    }
}

/// 在已打开的键上写入 `REG_EXPAND_SZ` 值。
///
/// 异常处理：
/// - 写入失败返回错误（常见原因：句柄无 `KEY_SET_VALUE` 权限）。
pub fn set_expand_sz(key: &RegKey, name: &str, value: &str) -> Result<()> {
    key.set_raw_value(name, &expand_sz_value(value))
        .with_context(|| format!("写入 REG_EXPAND_SZ 值失败: {name}"))
}

/// 基于注册表的 [`PathStore`] 实现。
#[derive(Debug, Clone)]
pub struct RegistryPathStore {
    hive: RegistryHive,
    key: String,
    value_name: String,
}

impl RegistryPathStore {
    /// 机器级系统 PATH。
    pub fn machine() -> Self {
        Self::new(RegistryHive::Hklm, MACHINE_ENVIRONMENT_KEY, PATH_VALUE_NAME)
    }

    pub fn new(hive: RegistryHive, key: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self {
            hive,
            key: key.into(),
            value_name: value_name.into(),
        }
    }
}

impl PathStore for RegistryPathStore {
    fn describe(&self) -> String {
        format!("{}\\{} [{}]", self.hive.name(), self.key, self.value_name)
    }

    fn write_path(&self, value: &str) -> Result<()> {
        let key = open_for_write(self.hive, &self.key)?;
        set_expand_sz(&key, &self.value_name, value)?;
        debug!("已写入 {}", self.describe());
        Ok(())
    }
}
