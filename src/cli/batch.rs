//! # batch 子命令 CLI 定义
//!
//! 从 CSV 清单批量生成 sbatch 脚本
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::SubmitFlags;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV manifest, one job per row (header: path,preset,time,tasks,cpus,...)
    pub manifest: PathBuf,

    /// Directory that relative script paths are resolved against
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Submit each script after generation
    #[arg(long, default_value_t = false)]
    pub submit: bool,

    #[command(flatten)]
    pub submit_flags: SubmitFlags,
}
