//! # 能量剖面组合
//!
//! 按配方把多个独立计算的 E、G 相加，得到用于比较反应路径的组合结构能量。
//!
//! 任一组分缺少 E 或 G 时整个组合条目被省略，并记录缺失的组分；
//! 不会用 0 代替缺失的能量。
//! 同一 (路径, 阶段) 有多条记录时取标签排序后的第一条，并发出警告。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/profile.rs`

use crate::models::{CompositeProfile, PathKind, ProfileEntry, Recipe, Stage};
use tracing::warn;

/// 为一个催化剂生成标准配方集
pub fn standard_recipes(catalyst: &str, reactant1: &str, reactant2: &str) -> Vec<Recipe> {
    let cat = catalyst.to_lowercase();
    let r1 = reactant1.to_lowercase();
    let r2 = reactant2.to_lowercase();

    let c = || PathKind::Catalyst(cat.clone());
    let p1 = || PathKind::Reactant1(r1.clone());
    let p2 = || PathKind::Reactant2(r2.clone());
    use Stage::{Product as P, Reactants as R, TransitionState as TS};

    vec![
        Recipe::new(format!("{cat}+{r1}+{r2}"), vec![(c(), R), (p1(), R), (p2(), R)]),
        Recipe::new(format!("Frz-{cat}-{r1}+{r2}"), vec![(PathKind::Frozen, R), (p2(), R)]),
        Recipe::new(format!("Pol-{cat}-{r1}+{r2}"), vec![(PathKind::Polarized, R), (p2(), R)]),
        Recipe::new(format!("Full-{cat}-{r1}+{r2}"), vec![(PathKind::Full, R), (p2(), R)]),
        Recipe::new(format!("ts-{r1}-{r2}+{cat}"), vec![(PathKind::NoCatalyst, TS), (c(), R)]),
        Recipe::new(format!("Ts-{cat}-frz-{r1}-{r2}"), vec![(PathKind::Frozen, TS)]),
        Recipe::new(format!("Ts-{cat}-pol-{r1}-{r2}"), vec![(PathKind::Polarized, TS)]),
        Recipe::new(format!("Ts-{cat}-full-{r1}-{r2}"), vec![(PathKind::Full, TS)]),
        Recipe::new(format!("product+{cat}"), vec![(PathKind::NoCatalyst, P), (c(), R)]),
        Recipe::new(format!("{cat}-frz-product"), vec![(PathKind::Frozen, P)]),
        Recipe::new(format!("{cat}-pol-product"), vec![(PathKind::Polarized, P)]),
        Recipe::new(format!("{cat}-full-product"), vec![(PathKind::Full, P)]),
    ]
}

/// 查找 (路径, 阶段) 对应的 E、G
fn lookup(entries: &[ProfileEntry], path: &PathKind, stage: Stage) -> Option<(f64, f64)> {
    let mut matches = entries
        .iter()
        .filter(|e| &e.path == path && e.stage == stage);
    let first = matches.next()?;

    let others: Vec<&str> = matches.map(|e| e.label.as_str()).collect();
    if !others.is_empty() {
        warn!(
            "Multiple records for ({}, {}): using '{}', ignoring {:?}",
            path, stage, first.label, others
        );
    }

    first.free_energy.map(|g| (first.energy, g))
}

/// 按配方组合能量剖面
///
/// `entries` 的顺序决定重复键的取舍，调用方应先按标签排序。
pub fn compose(entries: &[ProfileEntry], recipes: &[Recipe]) -> Vec<CompositeProfile> {
    let mut combined = Vec::new();

    'recipe: for recipe in recipes {
        let mut e_sum = 0.0;
        let mut g_sum = 0.0;

        for (path, stage) in &recipe.components {
            match lookup(entries, path, *stage) {
                Some((e, g)) => {
                    e_sum += e;
                    g_sum += g;
                }
                None => {
                    warn!(
                        "Missing energy values for {}: path={}, stage={}",
                        recipe.name, path, stage
                    );
                    continue 'recipe;
                }
            }
        }

        combined.push(CompositeProfile {
            name: recipe.name.clone(),
            energy: e_sum,
            free_energy: g_sum,
        });
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, path: PathKind, stage: Stage, e: f64, g: Option<f64>) -> ProfileEntry {
        ProfileEntry {
            label: label.to_string(),
            path,
            stage,
            energy: e,
            free_energy: g,
        }
    }

    #[test]
    fn test_missing_component_omits_only_that_composite() {
        let a = PathKind::Catalyst("a".into());
        let b = PathKind::Catalyst("b".into());
        let entries = vec![entry("a", a.clone(), Stage::Reactants, -10.0, Some(-12.0))];
        let recipes = vec![
            Recipe::new("a+b", vec![(a.clone(), Stage::Reactants), (b, Stage::Reactants)]),
            Recipe::new("a", vec![(a, Stage::Reactants)]),
        ];

        let out = compose(&entries, &recipes);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "a");
        assert_eq!(out[0].energy, -10.0);
        assert_eq!(out[0].free_energy, -12.0);
    }

    #[test]
    fn test_component_without_free_energy_is_missing() {
        let entries = vec![entry("x", PathKind::Frozen, Stage::TransitionState, -5.0, None)];
        let recipes = vec![Recipe::new("ts", vec![(PathKind::Frozen, Stage::TransitionState)])];
        assert!(compose(&entries, &recipes).is_empty());
    }

    #[test]
    fn test_sums_components() {
        let entries = vec![
            entry(
                "bf3/reactants/bf3",
                PathKind::Catalyst("bf3".into()),
                Stage::Reactants,
                -100.0,
                Some(-110.0),
            ),
            entry(
                "no_cat/reactants/acr",
                PathKind::Reactant1("acr".into()),
                Stage::Reactants,
                -20.0,
                Some(-25.0),
            ),
            entry(
                "no_cat/reactants/but",
                PathKind::Reactant2("but".into()),
                Stage::Reactants,
                -30.0,
                Some(-33.0),
            ),
        ];
        let recipes = standard_recipes("BF3", "acr", "but");
        let out = compose(&entries, &recipes);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "bf3+acr+but");
        assert!((out[0].energy - (-150.0)).abs() < 1e-9);
        assert!((out[0].free_energy - (-168.0)).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_key_uses_first() {
        let entries = vec![
            entry("first", PathKind::Full, Stage::Product, -1.0, Some(-2.0)),
            entry("second", PathKind::Full, Stage::Product, -3.0, Some(-4.0)),
        ];
        let recipes = vec![Recipe::new("p", vec![(PathKind::Full, Stage::Product)])];
        let out = compose(&entries, &recipes);
        assert_eq!(out[0].energy, -1.0);
    }

    #[test]
    fn test_standard_recipe_names() {
        let names: Vec<String> = standard_recipes("BF3", "Acr", "But")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "bf3+acr+but");
        assert_eq!(names[4], "ts-acr-but+bf3");
        assert_eq!(names[11], "bf3-full-product");
    }
}
