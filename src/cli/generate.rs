//! # generate 子命令 CLI 定义
//!
//! 按预设生成单个 sbatch 脚本
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use super::{parse_kv, SubmitFlags};
use crate::models::{JobParams, Preset};

use clap::Args;
use std::path::PathBuf;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path of the script to write (overwritten if it exists)
    pub path: PathBuf,

    /// Machine preset
    #[arg(short, long, value_enum, default_value = "sbatch")]
    pub preset: Preset,

    #[command(flatten)]
    pub job: JobArgs,

    /// Command line appended after the directives (repeatable, kept in order)
    #[arg(long, allow_hyphen_values = true)]
    pub cmd: Vec<String>,

    /// Print the generated script
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Submit the script after generation
    #[arg(long, default_value_t = false)]
    pub submit: bool,

    #[command(flatten)]
    pub submit_flags: SubmitFlags,
}

// ─────────────────────────────────────────────────────────────
// 作业参数
// ─────────────────────────────────────────────────────────────

/// 作业参数覆盖（未给出时使用预设默认值）
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Wall-clock time limit (e.g., '1-00:00:00')
    #[arg(short, long)]
    pub time: Option<String>,

    /// Number of tasks
    #[arg(long)]
    pub tasks: Option<u32>,

    /// CPUs per task
    #[arg(short, long)]
    pub cpus: Option<u32>,

    /// Number of nodes
    #[arg(short = 'N', long)]
    pub nodes: Option<u32>,

    /// Standard output path (default depends on array / node count)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Standard error path
    #[arg(short, long)]
    pub error: Option<String>,

    /// Job array range (e.g., '0-9')
    #[arg(short, long)]
    pub array: Option<String>,

    /// Maximum number of simultaneously running array tasks
    #[arg(long)]
    pub array_throttle: Option<String>,

    /// GPU count (gpu, a100, a40 presets)
    #[arg(short, long)]
    pub gpus: Option<u32>,

    /// Total memory
    #[arg(long)]
    pub mem: Option<String>,

    /// Memory per GPU
    #[arg(long)]
    pub mem_per_gpu: Option<String>,

    /// Extra directive emitted as --KEY=VALUE (repeatable, kept in order)
    #[arg(long, value_parser = parse_kv)]
    pub extra: Vec<(String, String)>,
}

impl JobArgs {
    pub fn to_params(&self) -> JobParams {
        JobParams {
            time: self.time.clone(),
            tasks: self.tasks,
            cpus: self.cpus,
            nodes: self.nodes,
            output: self.output.clone(),
            error: self.error.clone(),
            array: self.array.clone(),
            array_throttle: self.array_throttle.clone(),
            gpus: self.gpus,
            mem: self.mem.clone(),
            mem_per_gpu: self.mem_per_gpu.clone(),
            extra: self.extra.clone(),
        }
    }
}
