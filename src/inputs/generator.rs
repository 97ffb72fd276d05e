//! # 输入文件生成
//!
//! 按计算布局逐个写出 Q-Chem 输入文件。已存在的输入只有在覆盖条件
//! 命中其当前状态时才会重写。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `inputs/layout.rs`, `inputs/template.rs`, `parsers/status.rs`

use crate::config::SystemConfig;
use crate::error::{A3edaError, Result};
use crate::inputs::layout::{calculation_specs, CalculationSpec};
use crate::inputs::template::TemplateSet;
use crate::models::{Job, StatusCriteria, StatusResult};
use crate::parsers::status::{check_job, current_status};

use std::fs;
use std::path::Path;
use tracing::debug;

/// 单个输入的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// 已存在且不满足覆盖条件
    Kept,
}

#[derive(Debug, Clone)]
pub struct GeneratedInput {
    pub spec: CalculationSpec,
    /// 写入前的状态
    pub prior: StatusResult,
    /// 处理后的状态；重写的输入重新检查，保留的输入沿用 `prior`
    pub status: StatusResult,
    pub outcome: WriteOutcome,
}

/// 生成体系的全部输入文件
///
/// 所有模板先校验，缺失任何一个时不写入任何文件。
pub fn write_inputs(
    config: &SystemConfig,
    system_dir: &Path,
    overwrite: Option<StatusCriteria>,
) -> Result<Vec<GeneratedInput>> {
    let specs = calculation_specs(config, system_dir);
    let templates = TemplateSet::load(&system_dir.join("templates"), &specs)?;

    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        let job = Job::new(&spec.input);
        let prior = current_status(&job);

        let rewrite = overwrite.is_some_and(|c| c.matches(prior.status));
        let (outcome, status) = if job.input.exists() && !rewrite {
            debug!(
                "Keeping existing input '{}' ({})",
                job.input.display(),
                prior.status
            );
            (WriteOutcome::Kept, prior.clone())
        } else {
            debug!(
                "Rendering {} input ({})",
                spec.stage.as_str(),
                spec.calc_type.map_or("no_cat", |ct| ct.as_str())
            );
            write_input(&job.input, &templates.render(&spec))?;
            (WriteOutcome::Written, check_job(&job))
        };

        results.push(GeneratedInput {
            spec,
            prior,
            status,
            outcome,
        });
    }

    Ok(results)
}

fn write_input(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| A3edaError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }
    fs::write(path, format!("{}\n", content)).map_err(|e| A3edaError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("Wrote input '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
methods = ["wB97X-D"]
bases = ["def2-SVP"]
catalysts = ["BF3"]
reactant1 = "acrolein"
reactant2 = "butadiene"
"#;

    fn write_templates(system: &Path) {
        let t = system.join("templates");
        fs::create_dir_all(t.join("rem")).unwrap();
        fs::create_dir_all(t.join("molecule")).unwrap();
        fs::write(
            t.join("base_template.in"),
            "$molecule\n{molecule_section}\n$end\n\n$rem\n{rem_section}\n$end",
        )
        .unwrap();
        fs::write(
            t.join("rem/rem_base.rem"),
            "JOBTYPE {jobtype}\nMETHOD {method}\nBASIS {basis}",
        )
        .unwrap();
        for ct in ["full_cat", "pol_cat", "frz_cat"] {
            fs::write(t.join(format!("rem/rem_{}.rem", ct)), format!("! {}", ct)).unwrap();
        }
        for name in [
            "acrolein",
            "butadiene",
            "no_cat_product",
            "no_cat_ts",
            "BF3",
            "BF3_reactant",
            "BF3_product",
            "BF3_ts",
        ] {
            fs::write(t.join(format!("molecule/{}.mol", name)), "0 1\nC 0 0 0\nH 0 0 1\n").unwrap();
        }
    }

    fn config() -> SystemConfig {
        SystemConfig::from_toml(CONFIG, Path::new("system.toml")).unwrap()
    }

    #[test]
    fn test_writes_every_input() {
        let dir = tempdir().unwrap();
        write_templates(dir.path());

        let results = write_inputs(&config(), dir.path(), None).unwrap();
        assert_eq!(results.len(), 14);
        assert!(results.iter().all(|r| r.outcome == WriteOutcome::Written));
        assert!(results.iter().all(|r| r.prior.status == JobStatus::Absent));
        assert!(results.iter().all(|r| r.status.status == JobStatus::NoFile));

        let ts = dir
            .path()
            .join("wB97X-D_def2-SVP/BF3/ts/frz_cat_ts/ts_frz_cat_opt.in");
        let text = fs::read_to_string(ts).unwrap();
        assert!(text.contains("JOBTYPE ts"));
        assert!(text.contains("METHOD wB97X-D"));
        assert!(text.ends_with("! frz_cat\n$end\n"));
    }

    #[test]
    fn test_overwrite_only_matching_status() {
        let dir = tempdir().unwrap();
        write_templates(dir.path());
        write_inputs(&config(), dir.path(), None).unwrap();

        let r1 = dir
            .path()
            .join("wB97X-D_def2-SVP/no_cat/reactants/acrolein/acrolein_opt.in");
        fs::write(&r1, "edited").unwrap();
        fs::write(r1.with_extension("out"), "Running on node01\nThank you very much").unwrap();

        let results = write_inputs(
            &config(),
            dir.path(),
            Some(StatusCriteria::Only(JobStatus::Crash)),
        )
        .unwrap();
        assert!(results.iter().all(|r| r.outcome == WriteOutcome::Kept));
        assert_eq!(fs::read_to_string(&r1).unwrap(), "edited");
        assert_eq!(results[0].prior.status, JobStatus::Successful);

        let results = write_inputs(
            &config(),
            dir.path(),
            Some(StatusCriteria::Only(JobStatus::Successful)),
        )
        .unwrap();
        assert_eq!(results[0].outcome, WriteOutcome::Written);
        assert_eq!(results[1].outcome, WriteOutcome::Kept);
        assert!(fs::read_to_string(&r1).unwrap().contains("JOBTYPE opt"));
    }

    #[test]
    fn test_missing_templates_write_nothing() {
        let dir = tempdir().unwrap();
        write_templates(dir.path());
        fs::remove_file(dir.path().join("templates/rem/rem_pol_cat.rem")).unwrap();

        let err = write_inputs(&config(), dir.path(), None).unwrap_err();
        assert!(matches!(err, A3edaError::TemplateMissing(_)));
        assert!(!dir.path().join("wB97X-D_def2-SVP").exists());
    }

    #[test]
    fn test_fresh_inputs_match_nofile_after_writing() {
        let dir = tempdir().unwrap();
        write_templates(dir.path());

        let results = write_inputs(&config(), dir.path(), None).unwrap();
        let nofile = StatusCriteria::Only(JobStatus::NoFile);
        let queued = results
            .iter()
            .filter(|r| r.outcome == WriteOutcome::Written && nofile.matches(r.status.status))
            .count();
        assert_eq!(queued, 14);
    }

    #[test]
    fn test_kept_input_keeps_prior_status() {
        let dir = tempdir().unwrap();
        write_templates(dir.path());
        write_inputs(&config(), dir.path(), None).unwrap();

        let results = write_inputs(&config(), dir.path(), None).unwrap();
        assert!(results.iter().all(|r| r.outcome == WriteOutcome::Kept));
        assert!(results.iter().all(|r| r.status == r.prior));
        assert!(results.iter().all(|r| r.status.status == JobStatus::NoFile));
    }
}
