//! # 机器预设
//!
//! 可选的作业预设名称。每个预设对应的默认值与尾部指令见 `slurm/preset.rs`。
//!
//! ## 依赖关系
//! - 被 `cli/`, `slurm/preset.rs`, `commands/` 使用

use clap::ValueEnum;
use serde::Deserialize;

/// 作业预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Plain sbatch header, no partition
    Sbatch,
    /// CPU-only queue
    Cpu,
    /// Generic GPU job with `--gres=gpu:<n>`
    Gpu,
    /// A100 node profile
    A100,
    /// A40 node profile
    A40,
    /// Single RTX 3090
    #[value(alias = "3090")]
    #[serde(alias = "3090")]
    Rtx3090,
    /// L40S with per-GPU memory
    L40s,
    /// Small single-GPU job
    MiniGpu,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Sbatch,
        Preset::Cpu,
        Preset::Gpu,
        Preset::A100,
        Preset::A40,
        Preset::Rtx3090,
        Preset::L40s,
        Preset::MiniGpu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Sbatch => "sbatch",
            Preset::Cpu => "cpu",
            Preset::Gpu => "gpu",
            Preset::A100 => "a100",
            Preset::A40 => "a40",
            Preset::Rtx3090 => "rtx3090",
            Preset::L40s => "l40s",
            Preset::MiniGpu => "mini-gpu",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_match_value_enum() {
        for preset in Preset::ALL {
            let parsed = Preset::from_str(preset.name(), true).unwrap();
            assert_eq!(parsed, preset);
        }
        assert_eq!(Preset::from_str("3090", true).unwrap(), Preset::Rtx3090);
    }
}
