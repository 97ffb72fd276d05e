//! # 计算标签解析
//!
//! 把层级标签（如 `bf3/ts/frz_cat_ts`）解析为（结构路径, 反应阶段）。
//! 标签按 `/` 拆分并转为小写，逐段匹配，先命中者优先。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `profiles/composer.rs` 使用
//! - 使用 `models/profile.rs`

use crate::models::{PathKind, PathStage, Stage};

/// 标签解析器，持有体系中的反应物与催化剂名称（已小写）
#[derive(Debug, Clone)]
pub struct LabelResolver {
    reactant1: String,
    reactant2: String,
    catalysts: Vec<String>,
}

impl LabelResolver {
    pub fn new(reactant1: &str, reactant2: &str, catalysts: &[String]) -> Self {
        LabelResolver {
            reactant1: reactant1.to_lowercase(),
            reactant2: reactant2.to_lowercase(),
            catalysts: catalysts.iter().map(|c| c.to_lowercase()).collect(),
        }
    }

    pub fn reactant1(&self) -> &str {
        &self.reactant1
    }

    pub fn reactant2(&self) -> &str {
        &self.reactant2
    }

    fn fragments(label: &str) -> Vec<String> {
        label
            .to_lowercase()
            .split('/')
            .map(|p| p.trim().to_string())
            .collect()
    }

    /// 解析标签
    pub fn resolve(&self, label: &str) -> PathStage {
        let parts = Self::fragments(label);
        PathStage {
            path: self.resolve_path(&parts),
            stage: resolve_stage(&parts),
        }
    }

    fn resolve_path(&self, parts: &[String]) -> PathKind {
        let any = |pred: &dyn Fn(&str) -> bool| parts.iter().any(|p| pred(p.as_str()));

        if any(&|p| p.contains("frz")) {
            return PathKind::Frozen;
        }
        if any(&|p| p.contains("pol")) {
            return PathKind::Polarized;
        }
        if any(&|p| p.contains("full")) {
            return PathKind::Full;
        }
        if !self.reactant1.is_empty() && any(&|p| p.contains(self.reactant1.as_str())) {
            return PathKind::Reactant1(self.reactant1.clone());
        }
        if !self.reactant2.is_empty() && any(&|p| p.contains(self.reactant2.as_str())) {
            return PathKind::Reactant2(self.reactant2.clone());
        }
        if any(&|p| p.contains("no_cat") || p.contains("nocat")) {
            return PathKind::NoCatalyst;
        }
        self.catalysts
            .iter()
            .find(|cat| parts.iter().any(|p| p == *cat))
            .map(|cat| PathKind::Catalyst(cat.clone()))
            .unwrap_or(PathKind::Unknown)
    }

    /// 判断输出文件的相对路径是否属于标准计算目录
    pub fn is_calculation_path(&self, relative_path: &str) -> bool {
        let path_str = relative_path.to_lowercase();
        let parts = Self::fragments(&path_str);

        parts.iter().any(|p| {
            p.contains("no_cat")
                || p.contains("nocat")
                || p == "product"
                || p == "ts"
                || p.contains("frz")
                || p.contains("pol")
                || p.contains("full")
        }) || self.catalysts.iter().any(|c| parts.iter().any(|p| p == c))
            || (!self.reactant1.is_empty() && path_str.contains(&self.reactant1))
            || (!self.reactant2.is_empty() && path_str.contains(&self.reactant2))
    }
}

fn resolve_stage(parts: &[String]) -> Stage {
    if parts.iter().any(|p| p.contains("reactants")) {
        Stage::Reactants
    } else if parts.iter().any(|p| p.contains("ts")) {
        Stage::TransitionState
    } else if parts.iter().any(|p| p.contains("product")) {
        Stage::Product
    } else {
        Stage::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LabelResolver {
        LabelResolver::new("Acrolein", "Butadiene", &["BF3".to_string()])
    }

    #[test]
    fn test_no_cat_ts() {
        let r = resolver().resolve("no_cat/ts/no_cat_ts_opt");
        assert_eq!(r.path, PathKind::NoCatalyst);
        assert_eq!(r.stage, Stage::TransitionState);
        assert!(r.is_known());
    }

    #[test]
    fn test_templates_unknown() {
        let r = resolver().resolve("templates/molecule");
        assert_eq!(r.path, PathKind::Unknown);
        assert_eq!(r.stage, Stage::Unknown);
        assert!(!r.is_known());
    }

    #[test]
    fn test_reactant_paths() {
        let r = resolver().resolve("no_cat/reactants/acrolein");
        assert_eq!(r.path, PathKind::Reactant1("acrolein".into()));
        assert_eq!(r.stage, Stage::Reactants);

        let r = resolver().resolve("no_cat/reactants/butadiene");
        assert_eq!(r.path, PathKind::Reactant2("butadiene".into()));
    }

    #[test]
    fn test_catalyst_variants_take_precedence() {
        let r = resolver().resolve("bf3/reactants/acrolein/frz_cat");
        assert_eq!(r.path, PathKind::Frozen);
        assert_eq!(r.stage, Stage::Reactants);

        let r = resolver().resolve("bf3/ts/pol_cat_ts");
        assert_eq!(r.path, PathKind::Polarized);
        assert_eq!(r.stage, Stage::TransitionState);

        let r = resolver().resolve("bf3/product/full_cat_product");
        assert_eq!(r.path, PathKind::Full);
        assert_eq!(r.stage, Stage::Product);
    }

    #[test]
    fn test_catalyst_exact_fragment() {
        let r = resolver().resolve("BF3/reactants/BF3");
        assert_eq!(r.path, PathKind::Catalyst("bf3".into()));
        assert_eq!(r.stage, Stage::Reactants);

        let r = resolver().resolve("bf3x/reactants/bf3x");
        assert_eq!(r.path, PathKind::Unknown);
    }

    #[test]
    fn test_calculation_path_filter() {
        let res = resolver();
        assert!(res.is_calculation_path("no_cat/ts/no_cat_ts_opt.out"));
        assert!(res.is_calculation_path("bf3/reactants/bf3/bf3_opt.out"));
        assert!(!res.is_calculation_path("templates/molecule/junk.out"));
    }
}
