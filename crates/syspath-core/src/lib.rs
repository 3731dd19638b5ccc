//! 系统 PATH 设置核心库（纯逻辑，平台无关）。
//!
//! 功能：
//! - 将分号分隔的候选路径串拆分、校验、去重，生成规范的 PATH 值
//! - 定义写入注册表与广播环境变更的抽象接口，并约定两者的执行顺序
//!
//! 约定：
//! - 本库不直接执行任何注册表/进程操作，Windows 实现位于 `syspath-windows`
//!
//! 作者：syspath 项目组
//! 创建时间：2026-10-19
//! 修改时间：2026-10-19

pub mod apply;
pub mod normalize;
pub mod path_list;

pub use normalize::{normalize, normalize_with_report, NormalizeError, NormalizeReport};
pub use path_list::PathList;
