//! # batch 命令实现
//!
//! 从 CSV 清单批量生成 sbatch 脚本，可选逐个提交。
//!
//! ## 清单格式
//! 必需列 `path`, `preset`；可选列 `time`, `tasks`, `cpus`, `nodes`, `output`,
//! `error`, `array`, `array_throttle`, `gpus`, `mem`, `mem_per_gpu`,
//! `extra`（每行一个 `KEY=VALUE`）, `commands`（每行一条命令）。
//! 多行单元格用 CSV 引号包裹，命令中的 `;` 和 `,` 原样保留。
//! 空单元格视为未设置。
//!
//! 单行失败只记录并计数，不中断其他行。脚本已写出但提交失败的行
//! 同时计入 generated 和 failed。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `slurm/preset.rs`, `commands/submit.rs`, `utils/output.rs`, `utils/progress.rs`

use crate::cli::batch::BatchArgs;
use crate::commands::submit::{describe_outcome, submit_options};
use crate::error::{Result, SbatchError};
use crate::models::job::parse_key_value;
use crate::models::{ClusterConfig, JobParams, Preset};
use crate::slurm::{build_script, SubmitOptions};
use crate::utils::{output, progress};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 清单中的一行
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRow {
    pub path: PathBuf,
    pub preset: Preset,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub tasks: Option<u32>,
    #[serde(default)]
    pub cpus: Option<u32>,
    #[serde(default)]
    pub nodes: Option<u32>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub array: Option<String>,
    #[serde(default)]
    pub array_throttle: Option<String>,
    #[serde(default)]
    pub gpus: Option<u32>,
    #[serde(default)]
    pub mem: Option<String>,
    #[serde(default)]
    pub mem_per_gpu: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub commands: Option<String>,
}

impl ManifestRow {
    pub fn to_params(&self) -> Result<JobParams> {
        let extra = cell_lines(self.extra.as_deref())
            .into_iter()
            .map(|item| {
                parse_key_value(item.trim()).ok_or_else(|| {
                    SbatchError::InvalidArgument(format!(
                        "extra directive '{}' for {} is not KEY=VALUE",
                        item,
                        self.path.display()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(JobParams {
            time: self.time.clone(),
            tasks: self.tasks,
            cpus: self.cpus,
            nodes: self.nodes,
            output: self.output.clone(),
            error: self.error.clone(),
            array: self.array.clone(),
            array_throttle: self.array_throttle.clone(),
            gpus: self.gpus,
            mem: self.mem.clone(),
            mem_per_gpu: self.mem_per_gpu.clone(),
            extra,
        })
    }

    /// 追加在指令之后的命令行，保留行内缩进
    pub fn command_lines(&self) -> Vec<String> {
        cell_lines(self.commands.as_deref())
    }
}

/// 按行拆分单元格，跳过空白行
fn cell_lines(cell: Option<&str>) -> Vec<String> {
    cell.unwrap_or("")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// 读取 CSV 清单
pub fn read_manifest(path: &Path) -> Result<Vec<csv::Result<ManifestRow>>> {
    if !path.exists() {
        return Err(SbatchError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    Ok(reader.deserialize().collect())
}

/// 批处理计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// 已写出的脚本数
    pub generated: usize,
    /// 提交成功的脚本数
    pub submitted: usize,
    /// 失败的行数（生成或提交失败）
    pub failed: usize,
}

/// 已写出脚本的一行
struct RowOutcome {
    path: PathBuf,
    /// 未要求提交时为 `None`
    submission: Option<Result<String>>,
}

/// 生成单行对应的脚本；生成失败返回 `Err`，提交结果单独记录
fn process_row(
    row: &ManifestRow,
    root: Option<&Path>,
    cluster: &ClusterConfig,
    submit: Option<&SubmitOptions>,
) -> Result<RowOutcome> {
    let params = row.to_params()?;
    let path = match root {
        Some(root) if row.path.is_relative() => root.join(&row.path),
        _ => row.path.clone(),
    };

    let writer = build_script(&path, row.preset, &params, cluster)?;
    writer.append_lines(row.command_lines())?;

    let submission = submit.map(|options| {
        writer
            .submit(options)
            .map(|outcome| describe_outcome(&writer, &outcome))
    });

    Ok(RowOutcome { path, submission })
}

/// 逐行生成（并提交），返回计数
pub fn process_manifest(args: &BatchArgs, cluster: &ClusterConfig) -> Result<BatchSummary> {
    let rows = read_manifest(&args.manifest)?;
    output::print_info(&format!(
        "Loaded {} rows from {}",
        rows.len(),
        args.manifest.display()
    ));

    let flags = &args.submit_flags;
    let options = args.submit.then(|| submit_options(cluster, flags));

    let pb = progress::create_progress_bar(rows.len() as u64, "Generating");
    let mut summary = BatchSummary::default();

    for (i, row) in rows.into_iter().enumerate() {
        // 表头占第 1 行
        let line_no = i + 2;
        let root = args.root.as_deref();
        let result = match row {
            Ok(row) => process_row(&row, root, cluster, options.as_ref()),
            Err(e) => Err(SbatchError::from(e)),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                summary.failed += 1;
                pb.suspend(|| output::print_error(&format!("Row {}: {}", line_no, e)));
                pb.inc(1);
                continue;
            }
        };

        summary.generated += 1;
        let path = outcome.path.display();
        pb.suspend(|| match outcome.submission {
            None => output::print_success(&format!("Generated {}", path)),
            Some(Ok(msg)) => {
                summary.submitted += 1;
                output::print_success(&msg);
            }
            Some(Err(e)) => {
                summary.failed += 1;
                output::print_error(&format!(
                    "Row {}: generated {} but submission failed: {}",
                    line_no, path, e
                ));
            }
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs, cluster: &ClusterConfig) -> Result<()> {
    output::print_header("Batch Script Generation");

    let summary = process_manifest(&args, cluster)?;

    output::print_separator();
    output::print_done(&format!(
        "Generated {} scripts, submitted {}, failed rows {}",
        summary.generated, summary.submitted, summary.failed
    ));
    if summary.failed > 0 {
        output::print_warning(&format!("{} rows failed, see above", summary.failed));
    }

    Ok(())
}
