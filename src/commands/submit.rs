//! # submit 命令实现
//!
//! 将已有脚本交给 sbatch。脚本本身不会被读取或检查。
//!
//! ## 依赖关系
//! - 使用 `cli/submit.rs` 定义的参数
//! - 使用 `slurm/submit.rs`, `utils/output.rs`, `utils/progress.rs`

use crate::cli::submit::SubmitArgs;
use crate::cli::SubmitFlags;
use crate::error::Result;
use crate::models::ClusterConfig;
use crate::slurm::{ScriptWriter, SubmitOptions, SubmitOutcome};
use crate::utils::{output, progress};

/// 执行 submit 命令
pub fn execute(args: SubmitArgs, cluster: &ClusterConfig) -> Result<()> {
    output::print_header("Submit Batch Script");

    let writer = ScriptWriter::new(&args.script);
    submit_with_spinner(&writer, cluster, &args.submit_flags)?;
    Ok(())
}

/// 由集群配置和命令行参数组装提交选项
pub fn submit_options(cluster: &ClusterConfig, flags: &SubmitFlags) -> SubmitOptions {
    SubmitOptions {
        workdir: flags.workdir.clone(),
        env: flags.env.clone(),
        ..SubmitOptions::with_program(cluster.sbatch.clone())
    }
}

/// 提交并显示 spinner，成功后打印作业号
pub fn submit_with_spinner(
    writer: &ScriptWriter,
    cluster: &ClusterConfig,
    flags: &SubmitFlags,
) -> Result<SubmitOutcome> {
    let options = submit_options(cluster, flags);
    let label = format!("{} {}", options.program, writer.path().display());
    let spinner = progress::create_spinner(&label);

    let result = writer.submit(&options);
    spinner.finish_and_clear();

    let outcome = result?;
    if !outcome.stderr.is_empty() {
        output::print_warning(&outcome.stderr);
    }
    output::print_success(&describe_outcome(writer, &outcome));
    Ok(outcome)
}

/// 提交结果的单行描述
pub fn describe_outcome(writer: &ScriptWriter, outcome: &SubmitOutcome) -> String {
    match outcome.job_id {
        Some(id) => format!("Submitted {} as job {}", writer.path().display(), id),
        None if outcome.stdout.is_empty() => format!("Submitted {}", writer.path().display()),
        None => format!("Submitted {} - {}", writer.path().display(), outcome.stdout),
    }
}
