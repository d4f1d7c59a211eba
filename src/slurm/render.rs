//! # 通用指令渲染
//!
//! 将 `JobSpec` 转为有序的 sbatch 指令：
//! time, tasks, cpus-per-task, [-N], output, error, array, 额外指令。
//!
//! ## 依赖关系
//! - 被 `slurm/preset.rs` 使用
//! - 使用 `models/job.rs`, `models/directive.rs`

use crate::models::job::non_empty;
use crate::models::{Directive, JobSpec};

/// 指令集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveFamily {
    /// 输出 `-N <nodes>`
    Full,
    /// 不输出节点数；节点数仍参与默认文件名判断
    Compact,
}

impl std::fmt::Display for DirectiveFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectiveFamily::Full => write!(f, "full"),
            DirectiveFamily::Compact => write!(f, "compact"),
        }
    }
}

/// 默认的 (output, error) 文件名
///
/// `%j`, `%N`, `%A`, `%a` 由 Slurm 替换，这里原样写出。
pub fn default_log_names(is_array: bool, multi_node: bool) -> (&'static str, &'static str) {
    match (is_array, multi_node) {
        (false, false) => ("slurm-%j-%N.out.txt", "slurm-%j-%N.err.txt"),
        (false, true) => ("slurm-%j.out.txt", "slurm-%j.err.txt"),
        (true, false) => ("slurm-%A_%a_%N.out.txt", "slurm-%A_%a_%N.err.txt"),
        (true, true) => ("slurm-%A_%a.out.txt", "slurm-%A_%a.err.txt"),
    }
}

/// 渲染通用指令
pub fn render_directives(spec: &JobSpec, family: DirectiveFamily) -> Vec<Directive> {
    let (default_out, default_err) = default_log_names(spec.is_array(), spec.is_multi_node());

    let mut directives = vec![
        Directive::long("time", &spec.time),
        Directive::long("tasks", spec.tasks),
        Directive::long("cpus-per-task", spec.cpus_per_task),
    ];

    if family == DirectiveFamily::Full {
        directives.push(Directive::short('N', spec.nodes));
    }

    let output = non_empty(&spec.output).unwrap_or(default_out);
    let error = non_empty(&spec.error).unwrap_or(default_err);
    directives.push(Directive::spaced("output", output));
    directives.push(Directive::spaced("error", error));

    if let Some(array) = non_empty(&spec.array) {
        let value = match non_empty(&spec.array_throttle) {
            Some(throttle) => format!("{}%{}", array, throttle),
            None => array.to_string(),
        };
        directives.push(Directive::long("array", value));
    }

    for (key, value) in &spec.extra {
        directives.push(Directive::long(key.as_str(), value));
    }

    directives
}
