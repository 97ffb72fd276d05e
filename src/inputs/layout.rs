//! # 计算目录布局
//!
//! 根据体系配置列出所有计算的输入文件路径及其分子来源。
//!
//! ```text
//! <method>_<basis>/
//!   no_cat/reactants/<r1>/<r1>_opt.in
//!   no_cat/reactants/<r2>/<r2>_opt.in
//!   no_cat/product/no_cat_product_opt.in
//!   no_cat/ts/no_cat_ts_opt.in
//!   <cat>/reactants/<cat>/<cat>_opt.in
//!   <cat>/reactants/<r1>/<ct>/<r1>_<ct>_opt.in     (ct = full_cat, pol_cat, frz_cat)
//!   <cat>/product/<ct>_product/product_<ct>_opt.in
//!   <cat>/ts/<ct>_ts/ts_<ct>_opt.in
//! ```
//!
//! ## 依赖关系
//! - 被 `inputs/generator.rs`, `commands/` 使用
//! - 使用 `config.rs`

use crate::config::{sanitize_filename, SystemConfig};
use std::path::{Path, PathBuf};

/// 催化剂计算类型（对应附加的 REM 模板）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcType {
    FullCat,
    PolCat,
    FrzCat,
}

impl CalcType {
    pub const ALL: [CalcType; 3] = [CalcType::FullCat, CalcType::PolCat, CalcType::FrzCat];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalcType::FullCat => "full_cat",
            CalcType::PolCat => "pol_cat",
            CalcType::FrzCat => "frz_cat",
        }
    }

    /// 对应的 REM 附加模板文件名
    pub fn rem_template(&self) -> String {
        format!("rem_{}.rem", self.as_str())
    }
}

/// 生成输入时的反应阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcStage {
    Reactants,
    Product,
    Ts,
}

impl CalcStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalcStage::Reactants => "reactants",
            CalcStage::Product => "product",
            CalcStage::Ts => "ts",
        }
    }
}

/// 一个计算的分子片段来源（`templates/molecule/<name>.mol`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoleculeSource {
    Single(String),
    /// 催化剂片段 + 底物片段
    Complex(String, String),
}

impl MoleculeSource {
    pub fn template_names(&self) -> Vec<&str> {
        match self {
            MoleculeSource::Single(name) => vec![name.as_str()],
            MoleculeSource::Complex(a, b) => vec![a.as_str(), b.as_str()],
        }
    }
}

/// 单个计算的完整描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationSpec {
    pub input: PathBuf,
    pub method: String,
    pub basis: String,
    pub stage: CalcStage,
    pub calc_type: Option<CalcType>,
    pub molecule: MoleculeSource,
}

/// 方法_基组 目录名
pub fn method_basis_dir(system_dir: &Path, method: &str, basis: &str) -> PathBuf {
    system_dir.join(format!(
        "{}_{}",
        sanitize_filename(method),
        sanitize_filename(basis)
    ))
}

/// 列出体系中所有计算
pub fn calculation_specs(config: &SystemConfig, system_dir: &Path) -> Vec<CalculationSpec> {
    let r1 = sanitize_filename(&config.reactant1);
    let r2 = sanitize_filename(&config.reactant2);
    let mut specs = Vec::new();

    for (method, basis) in config.method_basis_pairs() {
        let mb_dir = method_basis_dir(system_dir, &method, &basis);
        let spec = |input: PathBuf, stage, calc_type, molecule| CalculationSpec {
            input,
            method: method.clone(),
            basis: basis.clone(),
            stage,
            calc_type,
            molecule,
        };

        let no_cat = mb_dir.join("no_cat");
        specs.push(spec(
            no_cat.join(format!("reactants/{r1}/{r1}_opt.in")),
            CalcStage::Reactants,
            None,
            MoleculeSource::Single(config.reactant1.clone()),
        ));
        specs.push(spec(
            no_cat.join(format!("reactants/{r2}/{r2}_opt.in")),
            CalcStage::Reactants,
            None,
            MoleculeSource::Single(config.reactant2.clone()),
        ));
        specs.push(spec(
            no_cat.join("product/no_cat_product_opt.in"),
            CalcStage::Product,
            None,
            MoleculeSource::Single("no_cat_product".to_string()),
        ));
        specs.push(spec(
            no_cat.join("ts/no_cat_ts_opt.in"),
            CalcStage::Ts,
            None,
            MoleculeSource::Single("no_cat_ts".to_string()),
        ));

        for catalyst in &config.catalysts {
            let cat = sanitize_filename(catalyst);
            let cat_dir = mb_dir.join(&cat);

            specs.push(spec(
                cat_dir.join(format!("reactants/{cat}/{cat}_opt.in")),
                CalcStage::Reactants,
                None,
                MoleculeSource::Single(catalyst.clone()),
            ));

            for ct in CalcType::ALL {
                let ct_name = ct.as_str();
                specs.push(spec(
                    cat_dir.join(format!("reactants/{r1}/{ct_name}/{r1}_{ct_name}_opt.in")),
                    CalcStage::Reactants,
                    Some(ct),
                    MoleculeSource::Complex(
                        format!("{catalyst}_reactant"),
                        config.reactant1.clone(),
                    ),
                ));
                specs.push(spec(
                    cat_dir.join(format!("product/{ct_name}_product/product_{ct_name}_opt.in")),
                    CalcStage::Product,
                    Some(ct),
                    MoleculeSource::Complex(
                        format!("{catalyst}_product"),
                        "no_cat_product".to_string(),
                    ),
                ));
                specs.push(spec(
                    cat_dir.join(format!("ts/{ct_name}_ts/ts_{ct_name}_opt.in")),
                    CalcStage::Ts,
                    Some(ct),
                    MoleculeSource::Complex(format!("{catalyst}_ts"), "no_cat_ts".to_string()),
                ));
            }
        }
    }

    specs
}
