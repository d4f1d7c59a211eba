//! # 作业提交
//!
//! 通过 shell 调用 `sbatch <脚本路径>`。
//!
//! 提交策略：外部程序非零退出一律返回 `SbatchError::SubmitFailed`，
//! 无法启动 shell 时返回 `SbatchError::CommandNotFound`。不超时、不重试。
//!
//! ## 依赖关系
//! - 被 `slurm/writer.rs`, `commands/` 使用

use crate::error::{Result, SbatchError};

use log::{debug, info};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

/// `Submitted batch job 123` 或 `--parsable` 输出 `123;cluster`
const JOB_ID_PATTERN: &str = r"(?m)^\s*(?:Submitted batch job\s+)?(\d+)(?:;\S+)?\s*$";

static JOB_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(JOB_ID_PATTERN).unwrap());

/// 提交选项
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// 提交程序，可带参数（如 `sbatch --parsable`）
    pub program: String,
    /// 子进程工作目录
    pub workdir: Option<PathBuf>,
    /// 额外环境变量
    pub env: Vec<(String, String)>,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        SubmitOptions {
            program: "sbatch".to_string(),
            workdir: None,
            env: Vec::new(),
        }
    }
}

impl SubmitOptions {
    pub fn with_program(program: impl Into<String>) -> Self {
        SubmitOptions {
            program: program.into(),
            ..Default::default()
        }
    }
}

/// 提交结果
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub stdout: String,
    pub stderr: String,
    /// 从输出中解析到的作业号
    pub job_id: Option<u64>,
}

/// 提交脚本
///
/// 只把路径字符串交给外部程序，不检查文件是否存在。
pub fn submit_script(path: &Path, options: &SubmitOptions) -> Result<SubmitOutcome> {
    let command_line = format!("{} {}", options.program, path.display());
    info!("Submitting: {}", command_line);

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(format!("{} \"$1\"", options.program))
        .arg("sh")
        .arg(path);

    if let Some(dir) = &options.workdir {
        cmd.current_dir(dir);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    let spawned = cmd.output();
    let out = spawned.map_err(|e| SbatchError::CommandNotFound {
        command: "sh".to_string(),
        source: e,
    })?;

    let stdout = String::from_utf8_lossy(&out.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
    debug!("{} exited with {:?}", command_line, out.status.code());

    if !out.status.success() {
        return Err(SbatchError::SubmitFailed {
            command: command_line,
            code: out.status.code(),
            stderr,
        });
    }

    let job_id = parse_job_id(&stdout);
    Ok(SubmitOutcome {
        stdout,
        stderr,
        job_id,
    })
}

/// 从 sbatch 标准输出解析作业号
pub fn parse_job_id(stdout: &str) -> Option<u64> {
    JOB_ID
        .captures(stdout)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
