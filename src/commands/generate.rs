//! # generate 命令实现
//!
//! 按预设写出 sbatch 脚本，追加命令行，可选打印与提交。
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `slurm/preset.rs`, `commands/submit.rs`, `utils/output.rs`

use crate::cli::generate::GenerateArgs;
use crate::commands::submit::submit_with_spinner;
use crate::error::{Result, SbatchError};
use crate::models::ClusterConfig;
use crate::slurm::build_script;
use crate::utils::output;

use std::fs;

/// 执行 generate 命令
pub fn execute(args: GenerateArgs, cluster: &ClusterConfig) -> Result<()> {
    output::print_header("Generate Batch Script");

    let params = args.job.to_params();
    let writer = build_script(&args.path, args.preset, &params, cluster)?;
    writer.append_lines(args.cmd.as_slice())?;

    output::print_success(&format!(
        "Wrote {} ({} preset, {} command lines)",
        writer.path().display(),
        args.preset,
        args.cmd.len()
    ));

    if args.print {
        let path = writer.path();
        let content = fs::read_to_string(path).map_err(|e| SbatchError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        output::print_separator();
        output::print_script(&content);
        output::print_separator();
    }

    if args.submit {
        submit_with_spinner(&writer, cluster, &args.submit_flags)?;
    } else {
        output::print_info("Not submitted (use --submit)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::generate::JobArgs;
    use crate::cli::SubmitFlags;
    use crate::models::Preset;
    use tempfile::tempdir;

    #[test]
    fn test_generate_writes_directives_then_commands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.sbatch");
        let args = GenerateArgs {
            path: path.clone(),
            preset: Preset::Gpu,
            job: JobArgs {
                gpus: Some(2),
                time: Some("12:00:00".into()),
                ..Default::default()
            },
            cmd: vec!["module load CUDA".into(), "python train.py".into()],
            print: false,
            submit: true,
            submit_flags: SubmitFlags {
                workdir: None,
                env: Vec::new(),
            },
        };
        let cluster = ClusterConfig {
            sbatch: "true".into(),
            ..Default::default()
        };

        execute(args, &cluster).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "#!/bin/bash");
        assert_eq!(lines[1], "#SBATCH --time=12:00:00");
        assert_eq!(
            &lines[lines.len() - 4..],
            &[
                "#SBATCH --gres=gpu:2",
                "#SBATCH -p gpu-el8",
                "module load CUDA",
                "python train.py",
            ]
        );
    }

    #[test]
    fn test_generate_submit_failure_propagates() {
        let dir = tempdir().unwrap();
        let args = GenerateArgs {
            path: dir.path().join("job.sh"),
            preset: Preset::Cpu,
            job: JobArgs::default(),
            cmd: Vec::new(),
            print: true,
            submit: true,
            submit_flags: SubmitFlags {
                workdir: None,
                env: Vec::new(),
            },
        };
        let cluster = ClusterConfig {
            sbatch: "false".into(),
            ..Default::default()
        };

        let err = execute(args, &cluster).unwrap_err();
        assert!(matches!(err, SbatchError::SubmitFailed { .. }));
        assert!(dir.path().join("job.sh").exists());
    }
}
