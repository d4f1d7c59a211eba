//! # Slurm 指令模型
//!
//! 一行 `#SBATCH` 指令的三种语法形式。
//!
//! ## 依赖关系
//! - 被 `slurm/render.rs`, `slurm/preset.rs`, `slurm/writer.rs` 使用

use std::fmt;

/// sbatch 指令行前缀
pub const DIRECTIVE_PREFIX: &str = "#SBATCH";

/// 单条 sbatch 指令（不含前缀）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `--key=value`
    Long { key: String, value: String },
    /// `--key value`
    Spaced { key: String, value: String },
    /// `-x value`
    Short { flag: char, value: String },
}

impl Directive {
    pub fn long(key: impl Into<String>, value: impl ToString) -> Self {
        Directive::Long {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn spaced(key: impl Into<String>, value: impl ToString) -> Self {
        Directive::Spaced {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn short(flag: char, value: impl ToString) -> Self {
        Directive::Short {
            flag,
            value: value.to_string(),
        }
    }

    /// 带 `#SBATCH` 前缀的完整行
    pub fn to_line(&self) -> String {
        format!("{} {}", DIRECTIVE_PREFIX, self)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Long { key, value } => write!(f, "--{}={}", key, value),
            Directive::Spaced { key, value } => write!(f, "--{} {}", key, value),
            Directive::Short { flag, value } => write!(f, "-{} {}", flag, value),
        }
    }
}
