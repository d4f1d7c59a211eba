//! # 预设配置
//!
//! 每个预设是一份 `Profile` 数据：指令集合、各字段的默认值（可覆盖或固定），
//! 以及追加在通用指令之后的尾部指令。所有预设共用同一个构建流程：
//!
//! 1. 用调用方覆盖值解析各字段，得到 `JobSpec`
//! 2. 未被尾部指令使用的内存参数作为前置额外指令（位于调用方额外指令之前）
//! 3. 通用渲染 + 尾部指令
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `slurm/render.rs`, `slurm/writer.rs`, `models/`

use crate::error::Result;
use crate::models::{ClusterConfig, Directive, JobParams, JobSpec, Preset};
use crate::slurm::render::{render_directives, DirectiveFamily};
use crate::slurm::writer::ScriptWriter;

use log::warn;
use std::fmt::Display;
use std::path::PathBuf;

/// 单个字段的预设值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<T> {
    pub value: Option<T>,
    pub pinned: bool,
}

impl<T: Clone + Display> Field<T> {
    /// 无默认值，调用方可设置
    pub fn open() -> Self {
        Field {
            value: None,
            pinned: false,
        }
    }

    /// 有默认值，调用方可覆盖
    pub fn default_to(value: T) -> Self {
        Field {
            value: Some(value),
            pinned: false,
        }
    }

    /// 固定值，忽略调用方设置
    pub fn pinned(value: T) -> Self {
        Field {
            value: Some(value),
            pinned: true,
        }
    }

    fn resolve(&self, preset: Preset, name: &str, requested: Option<T>) -> Option<T> {
        match requested {
            Some(v) if self.pinned => {
                warn!(
                    "{} preset pins {}; ignoring requested value {}",
                    preset, name, v
                );
                self.value.clone()
            }
            Some(v) => Some(v),
            None => self.value.clone(),
        }
    }
}

/// 尾部指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trailer {
    Fixed(Directive),
    /// `--gres=gpu:<gpus>`
    Gres,
    /// `--mem-per-gpu=<mem_per_gpu>`
    MemPerGpu,
    /// `--mem <mem>`
    Mem,
}

/// 解析后的 GPU 与内存参数
#[derive(Debug, Clone)]
struct Resources {
    gpus: Option<u32>,
    mem: Option<String>,
    mem_per_gpu: Option<String>,
}

impl Resources {
    fn trailer(&self, item: &Trailer) -> Option<Directive> {
        let directive = match item {
            Trailer::Fixed(d) => d.clone(),
            Trailer::Gres => Directive::long("gres", format!("gpu:{}", self.gpus?)),
            Trailer::MemPerGpu => Directive::long("mem-per-gpu", self.mem_per_gpu.as_ref()?),
            Trailer::Mem => Directive::spaced("mem", self.mem.as_ref()?),
        };
        Some(directive)
    }
}

/// 预设数据
#[derive(Debug, Clone)]
pub struct Profile {
    pub preset: Preset,
    pub family: DirectiveFamily,
    pub time: Field<String>,
    pub tasks: Field<u32>,
    pub cpus: Field<u32>,
    pub nodes: Field<u32>,
    pub gpus: Field<u32>,
    pub mem: Field<String>,
    pub mem_per_gpu: Field<String>,
    pub trailer: Vec<Trailer>,
}

impl Profile {
    fn base(preset: Preset, family: DirectiveFamily, time: &str, cpus: u32) -> Self {
        Profile {
            preset,
            family,
            time: Field::default_to(time.to_string()),
            tasks: Field::default_to(1),
            cpus: Field::default_to(cpus),
            nodes: Field::default_to(1),
            gpus: Field::open(),
            mem: Field::open(),
            mem_per_gpu: Field::open(),
            trailer: Vec::new(),
        }
    }

    fn uses(&self, item: &Trailer) -> bool {
        self.trailer.contains(item)
    }

    fn resources(&self, params: &JobParams) -> Resources {
        let preset = self.preset;
        let requested_mem = params.mem.clone();
        let per_gpu = params.mem_per_gpu.clone();

        Resources {
            gpus: self.gpus.resolve(preset, "gpus", params.gpus),
            mem: self.mem.resolve(preset, "mem", requested_mem),
            mem_per_gpu: self.mem_per_gpu.resolve(preset, "mem-per-gpu", per_gpu),
        }
    }

    /// 解析覆盖值，生成完整指令列表（不含 shebang）
    pub fn directives(&self, params: &JobParams) -> Vec<Directive> {
        let preset = self.preset;
        let fallback = JobSpec::default();
        let resources = self.resources(params);

        let mut extra = Vec::new();
        if let Some(m) = &resources.mem {
            if !self.uses(&Trailer::Mem) {
                extra.push(("mem".to_string(), m.clone()));
            }
        }
        if let Some(m) = &resources.mem_per_gpu {
            if !self.uses(&Trailer::MemPerGpu) {
                extra.push(("mem-per-gpu".to_string(), m.clone()));
            }
        }
        if let Some(g) = resources.gpus {
            if !self.uses(&Trailer::Gres) {
                warn!("{} preset has no GPU slot; ignoring gpus={}", preset, g);
            }
        }
        extra.extend(params.extra.iter().cloned());

        let time = self.time.resolve(preset, "time", params.time.clone());
        let tasks = self.tasks.resolve(preset, "tasks", params.tasks);
        let cpus = self.cpus.resolve(preset, "cpus", params.cpus);
        let nodes = self.nodes.resolve(preset, "nodes", params.nodes);

        let spec = JobSpec {
            time: time.unwrap_or(fallback.time),
            tasks: tasks.unwrap_or(fallback.tasks),
            cpus_per_task: cpus.unwrap_or(fallback.cpus_per_task),
            nodes: nodes.unwrap_or(fallback.nodes),
            output: params.output.clone(),
            error: params.error.clone(),
            array: params.array.clone(),
            array_throttle: params.array_throttle.clone(),
            extra,
        };

        let mut directives = render_directives(&spec, self.family);
        for item in &self.trailer {
            directives.extend(resources.trailer(item));
        }
        directives
    }

    /// 尾部指令的可读形式（用于 `presets` 列表）
    pub fn trailer_summary(&self) -> String {
        let show = |field: &Option<String>| field.clone().unwrap_or_default();
        let gpus = self.gpus.value.map(|g| g.to_string());

        self.trailer
            .iter()
            .map(|item| match item {
                Trailer::Fixed(d) => d.to_string(),
                Trailer::Gres => format!("--gres=gpu:<{}>", show(&gpus)),
                Trailer::MemPerGpu => format!("--mem-per-gpu=<{}>", show(&self.mem_per_gpu.value)),
                Trailer::Mem => format!("--mem <{}>", show(&self.mem.value)),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Preset {
    /// 预设对应的配置数据
    pub fn profile(&self, cluster: &ClusterConfig) -> Profile {
        use DirectiveFamily::{Compact, Full};

        let cpu_queue = || Trailer::Fixed(Directive::short('p', &cluster.cpu_queue));
        let gpu_queue = || Trailer::Fixed(Directive::short('p', &cluster.gpu_queue));
        let constraint = |c: &str| Trailer::Fixed(Directive::short('C', c));
        let one_gpu = || Trailer::Fixed(Directive::short('G', 1));

        match self {
            Preset::Sbatch => Profile::base(*self, Full, "1-00:00:00", 1),
            Preset::Cpu => Profile {
                trailer: vec![cpu_queue()],
                ..Profile::base(*self, Full, "1-00:00", 1)
            },
            Preset::Gpu => Profile {
                gpus: Field::default_to(1),
                trailer: vec![Trailer::Gres, gpu_queue()],
                ..Profile::base(*self, Full, "1-00:00", 1)
            },
            Preset::A100 => Profile {
                tasks: Field::pinned(1),
                cpus: Field::pinned(14),
                nodes: Field::pinned(1),
                gpus: Field::default_to(1),
                mem: Field::pinned("128789".to_string()),
                trailer: vec![Trailer::Gres, gpu_queue(), constraint("gpu=A100")],
                ..Profile::base(*self, Full, "7-00:00", 14)
            },
            Preset::A40 => Profile {
                tasks: Field::pinned(1),
                cpus: Field::pinned(64),
                nodes: Field::pinned(1),
                gpus: Field::default_to(1),
                mem: Field::pinned("514286".to_string()),
                trailer: vec![Trailer::Gres, gpu_queue(), constraint("gpu=A40")],
                ..Profile::base(*self, Full, "7-00:00", 64)
            },
            Preset::Rtx3090 => Profile {
                mem_per_gpu: Field::pinned("64283".to_string()),
                trailer: vec![
                    Trailer::Fixed(Directive::long("gres", "gpu:3090:1")),
                    Trailer::MemPerGpu,
                    gpu_queue(),
                ],
                ..Profile::base(*self, Full, "1-00:00", 16)
            },
            Preset::L40s => Profile {
                mem_per_gpu: Field::default_to("48300".to_string()),
                trailer: vec![
                    Trailer::MemPerGpu,
                    constraint("genoa,gpu=L40s"),
                    gpu_queue(),
                    one_gpu(),
                ],
                ..Profile::base(*self, Compact, "1-00:00:00", 4)
            },
            Preset::MiniGpu => Profile {
                mem: Field::default_to("20G".to_string()),
                trailer: vec![gpu_queue(), one_gpu(), Trailer::Mem],
                ..Profile::base(*self, Compact, "1-00:00:00", 4)
            },
        }
    }
}

/// 按预设写出脚本：shebang、通用指令、尾部指令
///
/// 返回的写入器可继续 `append_lines` 追加命令行，或直接 `submit`。
pub fn build_script(
    path: impl Into<PathBuf>,
    preset: Preset,
    params: &JobParams,
    cluster: &ClusterConfig,
) -> Result<ScriptWriter> {
    let writer = ScriptWriter::new(path);
    let profile = preset.profile(cluster);

    writer.write_header()?;
    for directive in profile.directives(params) {
        writer.write_directive(&directive)?;
    }

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn render(preset: Preset, params: &JobParams) -> Vec<String> {
        preset
            .profile(&ClusterConfig::default())
            .directives(params)
            .iter()
            .map(Directive::to_line)
            .collect()
    }

    fn read_lines(path: &std::path::Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_sbatch_preset_has_no_trailer() {
        let lines = render(Preset::Sbatch, &JobParams::default());
        assert_eq!(
            lines,
            vec![
                "#SBATCH --time=1-00:00:00",
                "#SBATCH --tasks=1",
                "#SBATCH --cpus-per-task=1",
                "#SBATCH -N 1",
                "#SBATCH --output slurm-%j-%N.out.txt",
                "#SBATCH --error slurm-%j-%N.err.txt",
            ]
        );
    }

    #[test]
    fn test_a100_with_two_gpus() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.sh");
        let params = JobParams {
            gpus: Some(2),
            ..Default::default()
        };

        build_script(&path, Preset::A100, &params, &ClusterConfig::default()).unwrap();

        assert_eq!(
            read_lines(&path),
            vec![
                "#!/bin/bash",
                "#SBATCH --time=7-00:00",
                "#SBATCH --tasks=1",
                "#SBATCH --cpus-per-task=14",
                "#SBATCH -N 1",
                "#SBATCH --output slurm-%j-%N.out.txt",
                "#SBATCH --error slurm-%j-%N.err.txt",
                "#SBATCH --mem=128789",
                "#SBATCH --gres=gpu:2",
                "#SBATCH -p gpu-el8",
                "#SBATCH -C gpu=A100",
            ]
        );
    }

    #[test]
    fn test_a100_ignores_pinned_overrides() {
        let params = JobParams {
            cpus: Some(32),
            nodes: Some(4),
            mem: Some("1G".into()),
            ..Default::default()
        };
        let lines = render(Preset::A100, &params);
        assert!(lines.contains(&"#SBATCH --cpus-per-task=14".to_string()));
        assert!(lines.contains(&"#SBATCH -N 1".to_string()));
        assert!(lines.contains(&"#SBATCH --mem=128789".to_string()));
        assert!(!lines.iter().any(|l| l.contains("1G")));
    }

    #[test]
    fn test_a40_profile() {
        let lines = render(Preset::A40, &JobParams::default());
        assert_eq!(
            &lines[..],
            &[
                "#SBATCH --time=7-00:00",
                "#SBATCH --tasks=1",
                "#SBATCH --cpus-per-task=64",
                "#SBATCH -N 1",
                "#SBATCH --output slurm-%j-%N.out.txt",
                "#SBATCH --error slurm-%j-%N.err.txt",
                "#SBATCH --mem=514286",
                "#SBATCH --gres=gpu:1",
                "#SBATCH -p gpu-el8",
                "#SBATCH -C gpu=A40",
            ]
        );
    }

    #[test]
    fn test_cpu_array_with_throttle() {
        let params = JobParams {
            array: Some("0-9".into()),
            array_throttle: Some("2".into()),
            ..Default::default()
        };
        let lines = render(Preset::Cpu, &params);
        assert_eq!(
            &lines[4..],
            &[
                "#SBATCH --output slurm-%A_%a_%N.out.txt",
                "#SBATCH --error slurm-%A_%a_%N.err.txt",
                "#SBATCH --array=0-9%2",
                "#SBATCH -p htc-el8",
            ]
        );
        assert_eq!(lines[0], "#SBATCH --time=1-00:00");
    }

    #[test]
    fn test_gpu_profile_extras_before_trailer() {
        let params = JobParams {
            gpus: Some(4),
            nodes: Some(2),
            mem: Some("64G".into()),
            extra: vec![("job-name".into(), "train".into())],
            ..Default::default()
        };
        let lines = render(Preset::Gpu, &params);
        assert_eq!(
            &lines[3..],
            &[
                "#SBATCH -N 2",
                "#SBATCH --output slurm-%j.out.txt",
                "#SBATCH --error slurm-%j.err.txt",
                "#SBATCH --mem=64G",
                "#SBATCH --job-name=train",
                "#SBATCH --gres=gpu:4",
                "#SBATCH -p gpu-el8",
            ]
        );
    }

    #[test]
    fn test_rtx3090_profile() {
        let params = JobParams {
            cpus: Some(8),
            ..Default::default()
        };
        let lines = render(Preset::Rtx3090, &params);
        assert_eq!(lines[0], "#SBATCH --time=1-00:00");
        assert_eq!(lines[2], "#SBATCH --cpus-per-task=8");
        assert_eq!(
            &lines[lines.len() - 3..],
            &[
                "#SBATCH --gres=gpu:3090:1",
                "#SBATCH --mem-per-gpu=64283",
                "#SBATCH -p gpu-el8",
            ]
        );
        let defaults = render(Preset::Rtx3090, &JobParams::default());
        assert_eq!(defaults[2], "#SBATCH --cpus-per-task=16");
    }

    #[test]
    fn test_l40s_profile_omits_nodes() {
        let params = JobParams {
            mem_per_gpu: Some("30000".into()),
            ..Default::default()
        };
        let lines = render(Preset::L40s, &params);
        assert_eq!(
            lines,
            vec![
                "#SBATCH --time=1-00:00:00",
                "#SBATCH --tasks=1",
                "#SBATCH --cpus-per-task=4",
                "#SBATCH --output slurm-%j-%N.out.txt",
                "#SBATCH --error slurm-%j-%N.err.txt",
                "#SBATCH --mem-per-gpu=30000",
                "#SBATCH -C genoa,gpu=L40s",
                "#SBATCH -p gpu-el8",
                "#SBATCH -G 1",
            ]
        );
        let defaults = render(Preset::L40s, &JobParams::default());
        assert_eq!(defaults[5], "#SBATCH --mem-per-gpu=48300");
    }

    #[test]
    fn test_mini_gpu_profile() {
        let defaults = render(Preset::MiniGpu, &JobParams::default());
        assert_eq!(
            &defaults[defaults.len() - 3..],
            &["#SBATCH -p gpu-el8", "#SBATCH -G 1", "#SBATCH --mem 20G"]
        );

        let params = JobParams {
            mem: Some("40G".into()),
            nodes: Some(2),
            ..Default::default()
        };
        let lines = render(Preset::MiniGpu, &params);
        assert!(lines.contains(&"#SBATCH --mem 40G".to_string()));
        assert_eq!(lines[3], "#SBATCH --output slurm-%j.out.txt");
        assert!(!lines.iter().any(|l| l.starts_with("#SBATCH -N")));
    }

    #[test]
    fn test_gpus_ignored_without_slot() {
        let params = JobParams {
            gpus: Some(2),
            ..Default::default()
        };
        let lines = render(Preset::Cpu, &params);
        assert!(!lines.iter().any(|l| l.contains("gres")));
    }

    #[test]
    fn test_custom_queues() {
        let cluster = ClusterConfig {
            cpu_queue: "short".into(),
            gpu_queue: "accel".into(),
            ..Default::default()
        };
        let params = JobParams::default();
        let cpu = Preset::Cpu.profile(&cluster).directives(&params);
        assert_eq!(cpu.last(), Some(&Directive::short('p', "short")));
        let gpu = Preset::Gpu.profile(&cluster).directives(&params);
        assert_eq!(gpu.last(), Some(&Directive::short('p', "accel")));
    }

    #[test]
    fn test_build_then_append_commands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submit.sbatch");
        fs::write(&path, "old content\n").unwrap();

        let cluster = ClusterConfig::default();
        let params = JobParams::default();
        let writer = build_script(&path, Preset::Cpu, &params, &cluster).unwrap();
        let commands = vec!["module load GCC", "python run.py"];
        writer.append_lines(commands).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], "#!/bin/bash");
        assert_eq!(lines.len(), 1 + 7 + 2);
        assert_eq!(
            &lines[lines.len() - 3..],
            &["#SBATCH -p htc-el8", "module load GCC", "python run.py"]
        );
    }

    #[test]
    fn test_trailer_summary() {
        let cluster = ClusterConfig::default();
        assert_eq!(
            Preset::A100.profile(&cluster).trailer_summary(),
            "--gres=gpu:<1>, -p gpu-el8, -C gpu=A100"
        );
        assert_eq!(Preset::Sbatch.profile(&cluster).trailer_summary(), "");
    }
}
