//! # Q-Chem 输入模板
//!
//! 读取 `templates/` 下的模板，填充 `{占位符}` 并拼出完整输入文件。
//!
//! ## 模板文件
//! - `base_template.in`: `{molecule_section}`, `{rem_section}`
//! - `rem/rem_base.rem`: `{method}`, `{basis}`, `{jobtype}`
//! - `rem/rem_<ct>.rem`: 催化剂计算类型的附加 REM
//! - `molecule/<name>.mol`: 分子片段（首行为电荷/自旋多重度）
//!
//! ## 依赖关系
//! - 被 `inputs/generator.rs` 使用
//! - 使用 `inputs/layout.rs`

use crate::error::{A3edaError, Result};
use crate::inputs::layout::{CalcStage, CalcType, CalculationSpec};
use crate::parsers::read_text;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::error;

/// 用给定的键值替换 `{key}` 占位符；未知占位符原样保留
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

/// 分子片段中的原子数（首行是电荷/多重度）
pub fn count_atoms(molecule_section: &str) -> usize {
    let lines = molecule_section
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count();
    if lines == 0 {
        error!("Empty molecule section");
        return 0;
    }
    lines - 1
}

/// 作业类型：过渡态为 ts，单原子为 sp，其余为 opt
pub fn job_type(stage: CalcStage, molecule_section: &str) -> &'static str {
    if stage == CalcStage::Ts {
        "ts"
    } else if count_atoms(molecule_section) == 1 {
        "sp"
    } else {
        "opt"
    }
}

/// 已加载的模板集合
#[derive(Debug, Clone)]
pub struct TemplateSet {
    base: String,
    rem_base: String,
    rem_additions: HashMap<&'static str, String>,
    molecules: HashMap<String, String>,
}

impl TemplateSet {
    /// 校验并加载生成 `specs` 所需的全部模板
    ///
    /// 缺少任何一个模板时报告全部缺失项并返回错误，不写入任何文件。
    pub fn load(template_dir: &Path, specs: &[CalculationSpec]) -> Result<Self> {
        let mut required: Vec<PathBuf> = vec![
            template_dir.join("base_template.in"),
            template_dir.join("rem").join("rem_base.rem"),
        ];
        for ct in CalcType::ALL {
            required.push(template_dir.join("rem").join(ct.rem_template()));
        }
        let mut molecule_names: Vec<&str> = Vec::new();
        for spec in specs {
            for name in spec.molecule.template_names() {
                if !molecule_names.contains(&name) {
                    molecule_names.push(name);
                }
            }
        }
        for name in &molecule_names {
            required.push(molecule_path(template_dir, name));
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|p| !p.is_file())
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            for m in &missing {
                error!("Missing template file: {}", m);
            }
            return Err(A3edaError::TemplateMissing(missing));
        }

        let mut rem_additions = HashMap::new();
        for ct in CalcType::ALL {
            rem_additions.insert(
                ct.as_str(),
                read_text(&template_dir.join("rem").join(ct.rem_template()))?,
            );
        }
        let mut molecules = HashMap::new();
        for name in molecule_names {
            molecules.insert(
                name.to_string(),
                read_text(&molecule_path(template_dir, name))?,
            );
        }

        Ok(TemplateSet {
            base: read_text(&template_dir.join("base_template.in"))?,
            rem_base: read_text(&template_dir.join("rem").join("rem_base.rem"))?,
            rem_additions,
            molecules,
        })
    }

    fn molecule(&self, name: &str) -> &str {
        self.molecules.get(name).map(String::as_str).unwrap_or("")
    }

    /// 拼出某个计算的完整输入文件内容
    pub fn render(&self, spec: &CalculationSpec) -> String {
        let molecule_section = spec
            .molecule
            .template_names()
            .into_iter()
            .map(|name| self.molecule(name))
            .collect::<Vec<_>>()
            .join("\n");

        let rem_template = match spec.calc_type {
            Some(ct) => format!(
                "{}\n{}",
                self.rem_base,
                self.rem_additions
                    .get(ct.as_str())
                    .map(String::as_str)
                    .unwrap_or("")
            ),
            None => self.rem_base.clone(),
        };
        let rem_section = fill(
            &rem_template,
            &[
                ("method", spec.method.as_str()),
                ("basis", spec.basis.as_str()),
                ("jobtype", job_type(spec.stage, &molecule_section)),
            ],
        );

        fill(
            &self.base,
            &[
                ("molecule_section", molecule_section.trim()),
                ("rem_section", rem_section.trim_end()),
            ],
        )
    }
}

fn molecule_path(template_dir: &Path, name: &str) -> PathBuf {
    template_dir.join("molecule").join(format!("{}.mol", name))
}
