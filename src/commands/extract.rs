//! # extract 命令实现
//!
//! 对每个 催化剂 × 方法 × 基组 组合：
//! 1. 递归收集 `*.out`，按路径与作业状态筛选
//! 2. 并行提取热化学记录，按标签排序
//! 3. 导出原始数据、原始剖面与组合剖面 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`, `profiles/`
//! - 使用 `utils/output.rs`

use crate::batch::{relative_label, BatchRunner, FileCollector, ProcessResult};
use crate::cli::extract::ExtractArgs;
use crate::config::{sanitize_filename, SystemConfig};
use crate::error::{A3edaError, Result};
use crate::inputs::layout::method_basis_dir;
use crate::models::{CalculationRecord, Job, ProfileEntry, StatusCriteria};
use crate::parsers::qchem_out::{self, ENERGY, FREE_ENERGY, KCAL_MOL};
use crate::parsers::{read_text, status::check_job};
use crate::profiles::{compose, export, standard_recipes, LabelResolver};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 执行 extract 命令
pub fn execute(args: &ExtractArgs, config: &SystemConfig, system_dir: &Path) -> Result<()> {
    output::print_header("Extracting Q-Chem Results");

    let raw_dir = system_dir.join("data").join("raw");
    let profiles_dir = system_dir.join("data").join("profiles");
    for dir in [&raw_dir, &profiles_dir] {
        fs::create_dir_all(dir).map_err(|e| A3edaError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let criteria = StatusCriteria::from(args.status);
    let runner = BatchRunner::new(args.jobs);
    let resolver = resolver_for(config);

    for catalyst in &config.catalysts {
        let cat = sanitize_filename(catalyst);
        let recipes = standard_recipes(&cat, resolver.reactant1(), resolver.reactant2());

        for (method, basis) in config.method_basis_pairs() {
            let method_basis = format!("{}_{}", method, basis);
            let mb_dir = method_basis_dir(system_dir, &method, &basis);
            if !mb_dir.is_dir() {
                warn!("Directory '{}' does not exist. Skipping.", mb_dir.display());
                continue;
            }
            info!("Processing {} for catalyst {}", method_basis, catalyst);

            let files = group_outputs(&mb_dir, &cat, &resolver);
            let (mut records, summary) =
                runner.run(files, |f| process_output(f, &mb_dir, criteria));
            for (path, err) in &summary.failures {
                warn!("Skipped {}: {}", path, err);
            }
            debug!("{} of {} outputs extracted", summary.success, summary.total());
            if records.is_empty() {
                output::print_info(&format!(
                    "No data was extracted for '{}' with catalyst '{}'",
                    method_basis, catalyst
                ));
                continue;
            }
            records.sort_by(|a, b| a.label.cmp(&b.label));

            let stem = format!(
                "{}_{}",
                mb_dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
                cat
            );

            let raw_path = raw_dir.join(format!("{}.csv", stem));
            export::records_to_csv(&records, &method_basis, &raw_path)?;
            output::print_success(&format!(
                "{} records ({} skipped by status, {} failed) -> '{}'",
                records.len(),
                summary.skipped,
                summary.failed,
                raw_path.display()
            ));

            let entries = profile_entries(&records, &resolver);
            let raw_profile = profiles_dir.join(format!("{}_raw_profile.csv", stem));
            export::raw_profile_to_csv(&entries, &method_basis, &raw_profile)?;
            info!("Saved raw profile to '{}'", raw_profile.display());

            let combined = compose(&entries, &recipes);
            if combined.is_empty() {
                warn!("No composite profiles resolved for {}", stem);
                output::print_warning(&format!("No combined profile for {}", stem));
                continue;
            }
            let combined_path = profiles_dir.join(format!("{}_combined_profile.csv", stem));
            export::combined_profile_to_csv(&combined, &combined_path)?;
            output::print_success(&format!(
                "{} composite profiles -> '{}'",
                combined.len(),
                combined_path.display()
            ));
        }
    }

    output::print_done("Extraction finished");
    Ok(())
}

/// 标签解析器使用与目录名一致的转义名称
fn resolver_for(config: &SystemConfig) -> LabelResolver {
    let catalysts: Vec<String> = config.catalysts.iter().map(|c| sanitize_filename(c)).collect();
    LabelResolver::new(
        &sanitize_filename(&config.reactant1),
        &sanitize_filename(&config.reactant2),
        &catalysts,
    )
}

/// 属于某个催化剂组的输出文件：无催化剂计算或路径中提到该催化剂
fn group_outputs(mb_dir: &Path, catalyst: &str, resolver: &LabelResolver) -> Vec<PathBuf> {
    let catalyst = catalyst.to_lowercase();
    FileCollector::new(mb_dir)
        .with_pattern("*.out")
        .recursive(true)
        .collect()
        .into_iter()
        .filter(|f| {
            let rel = relative_label(f, mb_dir).to_lowercase();
            (rel.contains("no_cat") || rel.contains("nocat") || rel.contains(&catalyst))
                && resolver.is_calculation_path(&rel)
        })
        .collect()
}

/// 处理单个输出文件
fn process_output(
    output: &Path,
    mb_dir: &Path,
    criteria: StatusCriteria,
) -> ProcessResult<CalculationRecord> {
    let name = output.display().to_string();

    let status = check_job(&Job::from_output(output));
    if !criteria.matches(status.status) {
        debug!("Skipping {} ({})", name, status.status);
        return ProcessResult::Skipped(name);
    }

    let content = match read_text(output) {
        Ok(c) => c,
        Err(e) => return ProcessResult::Failed(name, e.to_string()),
    };
    let label = output
        .parent()
        .map(|dir| relative_label(dir, mb_dir))
        .unwrap_or_default();

    match qchem_out::extract(&content, &label) {
        Some(record) => ProcessResult::Success(record),
        None => ProcessResult::Failed(name, "No energy value found".to_string()),
    }
}

/// 原始剖面行；路径或阶段无法识别的记录不进入剖面
fn profile_entries(records: &[CalculationRecord], resolver: &LabelResolver) -> Vec<ProfileEntry> {
    records
        .iter()
        .filter_map(|r| {
            let ps = resolver.resolve(&r.label);
            if !ps.is_known() {
                debug!("Label '{}' does not map to a profile component", r.label);
                return None;
            }
            Some(ProfileEntry {
                label: r.label.clone(),
                path: ps.path,
                stage: ps.stage,
                energy: r.quantity(ENERGY, KCAL_MOL)?,
                free_energy: r.quantity(FREE_ENERGY, KCAL_MOL),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::extract::StatusFilter;
    use crate::models::{PathKind, Stage};

    const CONFIG: &str = r#"
methods = ["wB97X-D"]
bases = ["def2-SVP"]
catalysts = ["BF3"]
reactant1 = "acrolein"
reactant2 = "butadiene"
"#;

    fn log(energy: f64) -> String {
        format!(
            "Running on node01\n Final energy is   {energy:.10}\n\
 STANDARD THERMODYNAMIC QUANTITIES AT   298.15 K  AND     1.00 ATM\n\
 QRRHO-Total Enthalpy:   10.000 kcal/mol\n\
 QRRHO-Total Entropy:   50.000 cal/mol.K\n\
 Total job time:  12.34s(wall)\n Thank you very much for using Q-Chem.\n"
        )
    }

    fn write_job(mb: &Path, rel: &str, content: &str) {
        let path = mb.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_extract_writes_raw_and_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let config = SystemConfig::from_toml(CONFIG, Path::new("system.toml")).unwrap();
        let mb = dir.path().join("wB97X-D_def2-SVP");

        write_job(&mb, "no_cat/reactants/acrolein/acrolein_opt.out", &log(-1.0));
        write_job(&mb, "no_cat/reactants/butadiene/butadiene_opt.out", &log(-2.0));
        write_job(&mb, "BF3/reactants/BF3/BF3_opt.out", &log(-3.0));
        write_job(&mb, "BF3/ts/frz_cat_ts/ts_frz_cat_opt.out", "Running on node01\n");
        write_job(&mb, "templates/stray.out", &log(-9.0));

        let args = ExtractArgs {
            status: StatusFilter::Successful,
            jobs: 2,
        };
        execute(&args, &config, dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join("data/raw/wB97X-D_def2-SVP_BF3.csv")).unwrap();
        let mut lines = raw.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("wB97X-D_def2-SVP,E (Ha),E (kcal/mol)"));
        assert!(header.ends_with("Fallback Used"));
        let labels: Vec<&str> = lines.map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(
            labels,
            vec![
                "BF3/reactants/BF3",
                "no_cat/reactants/acrolein",
                "no_cat/reactants/butadiene"
            ]
        );

        let combined = fs::read_to_string(
            dir.path()
                .join("data/profiles/wB97X-D_def2-SVP_BF3_combined_profile.csv"),
        )
        .unwrap();
        let rows: Vec<&str> = combined.lines().collect();
        assert_eq!(rows[0], "Structure,E (kcal/mol),G (kcal/mol)");
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("bf3+acrolein+butadiene,"));
    }

    #[test]
    fn test_profile_entries_drop_unknown_labels() {
        let config = SystemConfig::from_toml(CONFIG, Path::new("system.toml")).unwrap();
        let resolver = resolver_for(&config);
        let known = qchem_out::extract(&log(-1.0), "no_cat/ts").unwrap();
        let unknown = qchem_out::extract(&log(-1.0), "templates/x").unwrap();

        let entries = profile_entries(&[known, unknown], &resolver);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathKind::NoCatalyst);
        assert_eq!(entries[0].stage, Stage::TransitionState);
        assert!(entries[0].free_energy.is_some());
    }
}
