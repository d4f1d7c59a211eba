//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `slurm/`, `models/`, `utils/`
//! - 子模块: generate, submit, batch, presets

pub mod batch;
pub mod generate;
pub mod presets;
pub mod submit;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::ClusterConfig;

/// 执行命令
pub fn run(cmd: Commands, cluster: &ClusterConfig) -> Result<()> {
    match cmd {
        Commands::Generate(args) => generate::execute(args, cluster),
        Commands::Submit(args) => submit::execute(args, cluster),
        Commands::Batch(args) => batch::execute(args, cluster),
        Commands::Presets(args) => presets::execute(args, cluster),
    }
}
