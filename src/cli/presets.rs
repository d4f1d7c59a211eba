//! # presets 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/presets.rs`

use crate::models::Preset;

use clap::Args;

/// presets 子命令参数
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Show the directives a preset renders with default parameters
    #[arg(long, value_enum)]
    pub show: Option<Preset>,
}
