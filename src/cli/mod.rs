//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 按预设生成单个 sbatch 脚本，可选提交
//! - `submit`: 提交已有脚本
//! - `batch`: 从 CSV 清单批量生成/提交
//! - `presets`: 列出可用预设
//!
//! 全局选项（队列名、sbatch 程序）可通过环境变量设置。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, submit, batch, presets

pub mod batch;
pub mod generate;
pub mod presets;
pub mod submit;

use crate::models::job::parse_key_value;
use crate::models::ClusterConfig;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sbatchgen - Slurm 作业脚本生成工具
#[derive(Parser)]
#[command(name = "sbatchgen")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Generate and submit Slurm batch scripts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate one sbatch script from a preset
    Generate(generate::GenerateArgs),

    /// Submit an existing script with sbatch
    Submit(submit::SubmitArgs),

    /// Generate (and optionally submit) every job listed in a CSV manifest
    Batch(batch::BatchArgs),

    /// List available presets
    Presets(presets::PresetsArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 集群配置参数
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Partition used by the CPU preset
    #[arg(
        long,
        global = true,
        env = "SBATCHGEN_CPU_QUEUE",
        default_value = "htc-el8"
    )]
    pub cpu_queue: String,

    /// Partition used by GPU presets
    #[arg(
        long,
        global = true,
        env = "SBATCHGEN_GPU_QUEUE",
        default_value = "gpu-el8"
    )]
    pub gpu_queue: String,

    /// Submission program (may include flags, e.g. 'sbatch --parsable')
    #[arg(
        long,
        global = true,
        env = "SBATCHGEN_SBATCH",
        default_value = "sbatch"
    )]
    pub sbatch: String,
}

impl ClusterArgs {
    pub fn to_config(&self) -> ClusterConfig {
        ClusterConfig {
            cpu_queue: self.cpu_queue.clone(),
            gpu_queue: self.gpu_queue.clone(),
            sbatch: self.sbatch.clone(),
        }
    }
}

/// 提交相关参数
#[derive(Args, Debug, Clone)]
pub struct SubmitFlags {
    /// Working directory for the sbatch process
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Extra environment variable for the sbatch process (KEY=VALUE, repeatable)
    #[arg(long = "env", value_parser = parse_kv)]
    pub env: Vec<(String, String)>,
}

/// clap 的 `KEY=VALUE` 解析器
pub fn parse_kv(raw: &str) -> Result<(String, String), String> {
    parse_key_value(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preset;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_command() {
        let cli = Cli::try_parse_from([
            "sbatchgen",
            "--gpu-queue",
            "accel",
            "generate",
            "job.sh",
            "--preset",
            "a100",
            "--gpus",
            "2",
            "--extra",
            "job-name=train",
            "--cmd",
            "nvidia-smi",
        ])
        .unwrap();

        assert_eq!(cli.cluster.to_config().gpu_queue, "accel");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.preset, Preset::A100);
                let params = args.job.to_params();
                assert_eq!(params.gpus, Some(2));
                assert_eq!(
                    params.extra,
                    vec![("job-name".to_string(), "train".to_string())]
                );
                assert_eq!(args.cmd, vec!["nvidia-smi"]);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cmd_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from([
            "sbatchgen",
            "generate",
            "job.sh",
            "--cmd",
            "-x",
            "--cmd",
            "-v",
            "--cmd",
            "srun ./app",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.cmd, vec!["-x", "-v", "srun ./app"]);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_kv_rejects_missing_equals() {
        assert!(parse_kv("FOO").is_err());
        assert_eq!(parse_kv("FOO=bar").unwrap(), ("FOO".into(), "bar".into()));
    }
}
