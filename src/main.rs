//! # sbatchgen - Slurm 作业脚本生成工具
//!
//! 按机器预设（CPU、GPU、A100、A40、RTX3090、L40S、mini GPU）生成 sbatch 脚本，
//! 并可调用 sbatch 提交。
//!
//! ## 子命令
//! - `generate` - 生成单个脚本
//! - `submit`   - 提交已有脚本
//! - `batch`    - 从 CSV 清单批量生成/提交
//! - `presets`  - 列出预设
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── slurm/     (渲染、预设、写入、提交)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod slurm;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();

    let cluster = cli.cluster.to_config();
    if let Err(e) = commands::run(cli.command, &cluster) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
