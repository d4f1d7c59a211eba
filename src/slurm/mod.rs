//! # Slurm 脚本生成与提交
//!
//! - `writer`: 逐行写入脚本文件
//! - `render`: 通用指令渲染与默认日志文件名
//! - `preset`: 机器预设与脚本构建
//! - `submit`: 调用 sbatch
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`, `error.rs`

pub mod preset;
pub mod render;
pub mod submit;
pub mod writer;

pub use preset::build_script;
pub use submit::{SubmitOptions, SubmitOutcome};
pub use writer::ScriptWriter;
