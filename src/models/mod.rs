//! # 数据模型模块
//!
//! 定义作业参数、Slurm 指令和机器预设的数据模型。
//!
//! ## 依赖关系
//! - 被 `slurm/` 和 `commands/` 使用
//! - 子模块: directive, job, preset

pub mod directive;
pub mod job;
pub mod preset;

pub use directive::{Directive, DIRECTIVE_PREFIX};
pub use job::{ClusterConfig, JobParams, JobSpec};
pub use preset::Preset;
