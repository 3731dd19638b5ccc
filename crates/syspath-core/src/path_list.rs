//! 有序、去重的路径列表。
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

use std::collections::HashSet;

/// PATH 中各段之间的分隔符。
pub const SEPARATOR: char = ';';

/// 按首次出现顺序保存的路径集合。
///
/// 说明：
/// - 唯一性按字符串完全相等判断（区分大小写，不做文件系统等价归一）
/// - 重复插入时保留首次出现的位置
#[derive(Debug, Clone, Default)]
pub struct PathList {
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条路径。
    ///
    /// 返回值：
    /// - `true`：新路径已追加
    /// - `false`：与已有路径完全相同，被丢弃
    pub fn push(&mut self, entry: &str) -> bool {
        if self.seen.contains(entry) {
            return false;
        }
        self.seen.insert(entry.to_string());
        self.entries.push(entry.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// 生成注册表中保存的 PATH 值：各段以 `;` 连接，末尾再补一个 `;`。
    ///
    /// 空列表返回空字符串。
    pub fn to_path_value(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry);
            out.push(SEPARATOR);
        }
        out
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}
