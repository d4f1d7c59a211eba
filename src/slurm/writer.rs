//! # sbatch 脚本写入器
//!
//! 逐行写入脚本文件：`write_header` 以截断模式写入解释器行，
//! 其余所有写入都以追加模式打开、写入、关闭。
//!
//! 写入器不持有文件句柄，同一路径只应有一个写入者。
//!
//! ## 依赖关系
//! - 被 `slurm/preset.rs`, `commands/` 使用
//! - 使用 `slurm/submit.rs` 提交脚本

use crate::error::{Result, SbatchError};
use crate::models::Directive;
use crate::slurm::submit::{self, SubmitOptions, SubmitOutcome};

use log::debug;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 脚本首行
pub const SHEBANG: &str = "#!/bin/bash";

/// 可作为一行或多行写入的值
///
/// 单个字符串是一行；切片、数组、`Vec` 中每个元素各占一行。
pub trait ScriptLines {
    fn into_lines(self) -> Vec<String>;
}

impl ScriptLines for &str {
    fn into_lines(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl ScriptLines for String {
    fn into_lines(self) -> Vec<String> {
        vec![self]
    }
}

impl ScriptLines for &String {
    fn into_lines(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> ScriptLines for Vec<S> {
    fn into_lines(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> ScriptLines for &[S] {
    fn into_lines(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> ScriptLines for [S; N] {
    fn into_lines(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

/// sbatch 脚本写入器
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    path: PathBuf,
}

impl ScriptWriter {
    /// 记录目标路径，不做任何 I/O
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScriptWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 截断写入 `#!/bin/bash`，必须是脚本的第一次写入
    pub fn write_header(&self) -> Result<()> {
        self.write_raw(SHEBANG, false)
    }

    /// 追加一行
    pub fn append_line(&self, line: &str) -> Result<()> {
        self.write_raw(line, true)
    }

    /// 追加一行或多行，保持输入顺序
    pub fn append_lines(&self, lines: impl ScriptLines) -> Result<()> {
        for line in lines.into_lines() {
            self.append_line(&line)?;
        }
        Ok(())
    }

    /// 追加一行 `#SBATCH` 指令
    pub fn write_directive(&self, directive: &Directive) -> Result<()> {
        self.append_line(&directive.to_line())
    }

    /// 提交脚本，不读取脚本内容
    pub fn submit(&self, options: &SubmitOptions) -> Result<SubmitOutcome> {
        submit::submit_script(&self.path, options)
    }

    fn write_raw(&self, line: &str, append: bool) -> Result<()> {
        debug!(
            "{} {}: {}",
            if append { "append" } else { "truncate" },
            self.path.display(),
            line
        );

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        writeln!(file, "{}", line).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: std::io::Error) -> SbatchError {
        SbatchError::FileWriteError {
            path: self.path.display().to_string(),
            source,
        }
    }
}
