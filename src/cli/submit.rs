//! # submit 子命令 CLI 定义
//!
//! 提交已有的 sbatch 脚本
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/submit.rs`

use super::SubmitFlags;

use clap::Args;
use std::path::PathBuf;

/// submit 子命令参数
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Script path handed to sbatch (not read by sbatchgen)
    pub script: PathBuf,

    #[command(flatten)]
    pub submit_flags: SubmitFlags,
}
