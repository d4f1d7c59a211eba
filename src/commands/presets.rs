//! # presets 命令实现
//!
//! 以表格列出所有预设的默认值与尾部指令；`--show` 打印某个预设的默认指令。
//!
//! ## 依赖关系
//! - 使用 `cli/presets.rs` 定义的参数
//! - 使用 `slurm/preset.rs`, `utils/output.rs`

use crate::cli::presets::PresetsArgs;
use crate::error::Result;
use crate::models::{ClusterConfig, JobParams, Preset};
use crate::slurm::preset::{Field, Profile};
use crate::slurm::writer::SHEBANG;
use crate::utils::output;

use std::fmt::Display;
use tabled::{Table, Tabled};

/// 预设表格行
#[derive(Debug, Clone, Tabled)]
struct PresetRow {
    #[tabled(rename = "Preset")]
    preset: String,
    #[tabled(rename = "Directives")]
    family: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "CPUs")]
    cpus: String,
    #[tabled(rename = "Tasks/Nodes")]
    tasks_nodes: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Trailer")]
    trailer: String,
}

/// 字段显示：固定值带 `(fixed)`，未设置为 `-`
fn show_field<T: Clone + Display>(field: &Field<T>) -> String {
    match &field.value {
        Some(v) if field.pinned => format!("{} (fixed)", v),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn preset_row(profile: &Profile) -> PresetRow {
    let memory = match (&profile.mem.value, &profile.mem_per_gpu.value) {
        (Some(_), _) => show_field(&profile.mem),
        (None, Some(_)) => format!("{} /GPU", show_field(&profile.mem_per_gpu)),
        (None, None) => "-".to_string(),
    };
    let tasks = show_field(&profile.tasks);
    let nodes = show_field(&profile.nodes);

    PresetRow {
        preset: profile.preset.to_string(),
        family: profile.family.to_string(),
        time: show_field(&profile.time),
        cpus: show_field(&profile.cpus),
        tasks_nodes: format!("{} / {}", tasks, nodes),
        memory,
        trailer: profile.trailer_summary(),
    }
}

/// 执行 presets 命令
pub fn execute(args: PresetsArgs, cluster: &ClusterConfig) -> Result<()> {
    if let Some(preset) = args.show {
        output::print_header(&format!("Preset '{}' with default parameters", preset));
        println!("{}", SHEBANG);
        for directive in preset.profile(cluster).directives(&JobParams::default()) {
            println!("{}", directive.to_line());
        }
        return Ok(());
    }

    output::print_header("Available Presets");

    let rows: Vec<PresetRow> = Preset::ALL
        .iter()
        .map(|p| preset_row(&p.profile(cluster)))
        .collect();
    println!("{}", Table::new(&rows));

    output::print_info(&format!(
        "CPU queue: {}, GPU queue: {}",
        cluster.cpu_queue, cluster.gpu_queue
    ));

    Ok(())
}
